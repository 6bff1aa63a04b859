//! Output formatting: JSON, compact JSON, YAML.
//!
//! Responses are untyped JSON, so every command renders the server's
//! value as-is in the format selected by `--output`.

use std::io::{self, Write};

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a response value in the chosen format.
pub fn render(format: OutputFormat, data: &Value) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(render_error)?,
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(render_error)?,
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(render_error)?,
    };
    Ok(rendered.trim_end().to_owned())
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Write raw text (CSV) to stdout without a trailing newline of our own.
pub fn print_raw(text: &str, quiet: bool) {
    if quiet {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
}

fn render_error(err: impl std::fmt::Display) -> CliError {
    CliError::Render(err.to_string())
}
