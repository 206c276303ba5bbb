mod chat;
mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use loanchat_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "loanchat - ask plain-language questions about a loan ledger

Usage:
  loanchat <command>

Start here:
  loanchat catalog
  loanchat ask gold loan on 25 May 2025
  loanchat chat
";

const TOP_LEVEL_HELP: &str = "loanchat - ask plain-language questions about a loan ledger

USAGE: loanchat <command>

Ask a question:
  loanchat ask                                   Show every record with totals
  loanchat ask gold loan                         Only rows for one product
  loanchat ask 2025-05-24                        Only rows for one report date
  loanchat ask gold loan on 25 May 2025          Both filters at once

Keep asking against one load of the ledger:
  loanchat chat                                  One question per line, Ctrl-D to finish

See what you can ask about:
  loanchat catalog                               Report dates and product names

Every command accepts:
  --data <path>                                  Ledger CSV (default: ./loan_data.csv)
  --json                                         Machine-readable output

Environment:
  LOANCHAT_DATA       Ledger CSV path when --data is not given
  LOANCHAT_HOME       Home directory for the fallback ledger (default ~/.loanchat)
  LOANCHAT_CURRENCY   Currency symbol for totals (default ₹)
  LOANCHAT_LOG        Log filter for stderr diagnostics (default warn)

Run `loanchat <command> --help` for command usage.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => return handle_parse_error(&err, &raw_args),
    };

    logging::init();
    let mode = output::mode_for_command(&cli.command);

    if matches!(cli.command, cli::Commands::Chat { .. }) {
        return chat::run(cli.command.data_flag(), mode);
    }

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> Result<ExitCode, ExitCode> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let text = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            if write_stdout_text(&text).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        ErrorKind::DisplayVersion => {
            if write_stdout_text(&err.to_string()).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        kind => {
            let command_hint = if matches!(
                kind,
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
            ) {
                command_path_from_args(raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint);
            let mode = infer_requested_output_mode(raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(ExitCode::from(1))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing Usage line and "For more information" hint so the
/// recovery steps are the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// The subcommand named on the command line, for help hints.
fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))
        .and_then(|value| match value.as_str() {
            "ask" => Some("ask"),
            "chat" => Some("chat"),
            "catalog" => Some("catalog"),
            _ => None,
        })
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
}
