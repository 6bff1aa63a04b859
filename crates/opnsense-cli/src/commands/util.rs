//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use opnsense_api::Payload;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Load a JSON object payload from a file, or from stdin when the path is `-`.
pub fn read_payload(source: &Path) -> Result<Payload, CliError> {
    let contents = if source.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|err| CliError::Io {
                path: "<stdin>".into(),
                source: err,
            })?;
        buf
    } else {
        std::fs::read_to_string(source).map_err(|err| CliError::Io {
            path: source.display().to_string(),
            source: err,
        })?
    };

    parse_payload(&contents)
}

fn parse_payload(contents: &str) -> Result<Payload, CliError> {
    match serde_json::from_str::<Value>(contents) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::Validation {
            field: "payload".into(),
            reason: "expected a JSON object".into(),
        }),
        Err(e) => Err(CliError::Validation {
            field: "payload".into(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// Render a response in the selected format and print it.
pub fn emit(value: &Value, global: &GlobalOpts) -> Result<(), CliError> {
    let rendered = output::render(global.output, value)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
