use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::DataIssue;
use crate::ledger::load::REQUIRED_HEADERS;

pub(crate) const DATA_HELP_COMMAND: &str = "loanchat catalog --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `loanchat {cmd} --help` for usage."),
            None => "Run `loanchat --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn data_file_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "data_file_not_found",
            &format!("No loan data file found at `{location}`."),
            vec![
                "Pass the ledger explicitly with `--data <path>`.".to_string(),
                "Or set `LOANCHAT_DATA` to the CSV path.".to_string(),
                "Or place `loan_data.csv` in the current directory.".to_string(),
            ],
        )
        .with_data(json!({
            "data_path": location,
            "help_command": DATA_HELP_COMMAND,
        }))
    }

    pub fn data_file_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "data_file_unreadable",
            &format!("Could not read loan data at `{location}`: {detail}"),
            vec![format!("Verify `{location}` is a readable UTF-8 CSV file.")],
        )
        .with_data(json!({
            "data_path": location,
        }))
    }

    pub fn data_source_empty() -> Self {
        Self::new(
            "data_source_empty",
            "Loan data source is empty.",
            vec![format!(
                "Provide a CSV with a header row: {}.",
                REQUIRED_HEADERS.join(",")
            )],
        )
    }

    pub fn data_malformed(detail: &str) -> Self {
        Self::new(
            "data_malformed",
            &format!("Loan data CSV is malformed: {detail}"),
            vec![
                "Check that every row has the same number of columns as the header.".to_string(),
                "Save the file as UTF-8.".to_string(),
            ],
        )
    }

    pub fn data_schema_mismatch(actual_headers: Vec<String>) -> Self {
        let required_headers = REQUIRED_HEADERS
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<String>>();
        let missing_headers = required_headers
            .iter()
            .filter(|required| !actual_headers.iter().any(|actual| actual == *required))
            .cloned()
            .collect::<Vec<String>>();

        Self::new(
            "data_schema_mismatch",
            "CSV headers do not include every required loan data column.",
            vec![
                format!("Include all required headers: {}.", required_headers.join(", ")),
                "Extra columns are allowed and ignored.".to_string(),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "missing_headers": missing_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn data_validation_failed(rows_read: i64, issues: Vec<DataIssue>) -> Self {
        let issue_count = issues.len();
        Self::new(
            "data_validation_failed",
            &format!(
                "Loan data failed validation: {issue_count} issues across {rows_read} rows. Nothing was loaded."
            ),
            vec![
                "Fix the listed rows in your source file.".to_string(),
                "Dates must use YYYY-MM-DD; amounts must be non-negative numbers.".to_string(),
            ],
        )
        .with_data(json!({
            "rows_read": rows_read,
            "issues": issues,
        }))
    }

    pub fn config_invalid(variable: &str, detail: &str) -> Self {
        Self::new(
            "config_invalid",
            &format!("Configuration value `{variable}` is invalid: {detail}"),
            vec![format!("Unset `{variable}` or set it to a valid value.")],
        )
        .with_data(json!({
            "variable": variable,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
