use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use loanchat_client::ClientError;
use loanchat_client::commands::session::Session;
use tracing::{debug, warn};

use crate::output::{self, OutputMode};

const PROMPT: &str = "loanchat> ";
const FILTERING_NOTICE: &str = "Filtering data...";

/// Loads the ledger once, then answers one query per stdin line until EOF.
pub fn run(data_flag: Option<&str>, mode: OutputMode) -> Result<ExitCode, ExitCode> {
    let session = match Session::open(data_flag) {
        Ok(session) => session,
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(crate::exit_code_for_error(&error));
        }
    };

    let interactive = io::stdin().is_terminal() && io::stderr().is_terminal();
    let mut input = io::stdin().lock();
    let mut buffer = Vec::new();
    let mut answered = 0_usize;

    loop {
        if interactive {
            write_stderr(PROMPT);
        }
        buffer.clear();
        match input.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => {
                warn!(%error, answered, "stopped reading queries from stdin");
                let failure = ClientError::new(
                    "internal_stdin_unreadable",
                    &format!("Could not read the next query from stdin: {error}"),
                    vec!["Restart `loanchat chat` and retry the query.".to_string()],
                );
                let _ = output::print_session_failure(&failure, mode);
                return Err(ExitCode::from(2));
            }
        }
        let line = decode_line(&buffer);

        if interactive {
            write_stderr(FILTERING_NOTICE);
        }
        let answer = session.ask(&line);
        if interactive {
            write_stderr(&format!("\r{}\r", " ".repeat(FILTERING_NOTICE.len())));
        }

        let printed = match &answer {
            Ok(success) => output::print_session_success(success, mode),
            Err(error) => output::print_session_failure(error, mode),
        };
        if printed.is_err() {
            return Err(ExitCode::from(2));
        }
        if let Err(error) = answer {
            return Err(crate::exit_code_for_error(&error));
        }
        answered += 1;
    }

    debug!(answered, "chat session ended");
    Ok(ExitCode::SUCCESS)
}

/// Undecodable bytes become U+FFFD so the rest of the line is still asked.
fn decode_line(bytes: &[u8]) -> String {
    let trimmed = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let trimmed = trimmed.strip_suffix(b"\r").unwrap_or(trimmed);
    String::from_utf8_lossy(trimmed).into_owned()
}

fn write_stderr(text: &str) {
    let mut stderr = io::stderr().lock();
    let _ = stderr.write_all(text.as_bytes());
    let _ = stderr.flush();
}

#[cfg(test)]
mod tests {
    use super::decode_line;

    #[test]
    fn line_endings_are_removed() {
        assert_eq!(decode_line(b"gold loan\n"), "gold loan");
        assert_eq!(decode_line(b"gold loan\r\n"), "gold loan");
        assert_eq!(decode_line(b"gold loan"), "gold loan");
        assert_eq!(decode_line(b"\n"), "");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        assert_eq!(decode_line(b"\xff\xfe gold\n"), "\u{FFFD}\u{FFFD} gold");
    }
}
