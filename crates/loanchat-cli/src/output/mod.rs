mod catalog_text;
mod error_text;
mod format;
mod json;
mod mode;
mod query_text;

use std::io;

use loanchat_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

/// Prints one answer inside an interactive session. JSON answers stay on a
/// single line; text answers are followed by a blank separator line.
pub fn print_session_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_stdout_line(&json::render_success_json_line(success)?),
        OutputMode::Text => write_stdout_line(&format!("{}\n", render_text_success(success)?)),
    }
}

pub fn print_session_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_stdout_line(&json::render_error_json_line(error)?),
        OutputMode::Text => write_stdout_line(&format!("{}\n", error_text::render_error(error))),
    }
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "ask" => query_text::render_query(&success.data),
        "catalog" => catalog_text::render_catalog(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
