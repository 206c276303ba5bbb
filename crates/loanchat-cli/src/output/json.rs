use std::io;

use loanchat_client::{ClientError, FailureEnvelope, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(&success_value(success)?)
}

/// Single-line form used by `chat --json`, one object per answered line.
pub fn render_success_json_line(success: &SuccessEnvelope) -> io::Result<String> {
    serde_json::to_string(&success_value(success)?).map_err(io::Error::other)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&FailureEnvelope::from(error))
}

pub fn render_error_json_line(error: &ClientError) -> io::Result<String> {
    serde_json::to_string(&FailureEnvelope::from(error)).map_err(io::Error::other)
}

fn success_value(success: &SuccessEnvelope) -> io::Result<Value> {
    match success.command.as_str() {
        "ask" | "catalog" => Ok(json!({
            "ok": true,
            "version": JSON_VERSION,
            "data": success.data.clone()
        })),
        _ => Err(io::Error::other(format!(
            "JSON output is not supported for command `{}`",
            success.command
        ))),
    }
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
