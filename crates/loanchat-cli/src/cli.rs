use clap::{Parser, Subcommand};

pub fn parse_data_path(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("data path must not be blank".to_string());
    }
    Ok(value.to_string())
}

/// Extended help shown after `loanchat ask --help`.
pub const ASK_AFTER_HELP: &str = "\
How questions are read:
  A question may name a date, a product, both, or neither.
  Dates: `25 May 2025`, `May 25th, 2025`, `2025-05-24`, `24/05/2025`.
    Dates outside the ledger's years are ignored.
  Products: any product label from the ledger, matched case-insensitively
    anywhere in the question. Run `loanchat catalog` to see the labels.
  Both present: only rows matching the date AND the product are shown.
  Neither present: every row is shown.
  No question at all: every row is shown.

Examples:
  loanchat ask gold loan on 25 May 2025
  loanchat ask 2025-05-24
  loanchat ask \"business loan\" --json
  loanchat ask

Data file lookup:
  1. --data <path>
  2. LOANCHAT_DATA
  3. ./loan_data.csv
  4. $LOANCHAT_HOME/loan_data.csv (default home: ~/.loanchat)

Data file format:
  CSV with headers `Date`, `Product Type`, `Amount`.
  Date,Product Type,Amount
  2025-05-24,Gold Loan,1000
";

#[derive(Debug, Parser)]
#[command(
    name = "loanchat",
    version,
    about = "ask plain-language questions about a loan ledger",
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Filter the ledger by a free-text question and show totals
    #[command(after_long_help = ASK_AFTER_HELP)]
    Ask {
        /// Question words; omit to show all data
        query: Vec<String>,
        /// Path to the loan data CSV
        #[arg(long, value_parser = parse_data_path)]
        data: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Answer one question per stdin line against a single load of the ledger
    Chat {
        /// Path to the loan data CSV
        #[arg(long, value_parser = parse_data_path)]
        data: Option<String>,
        /// Emit one JSON object per answered line
        #[arg(long)]
        json: bool,
    },
    /// List the report dates and products available to ask about
    Catalog {
        /// Path to the loan data CSV
        #[arg(long, value_parser = parse_data_path)]
        data: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn data_flag(&self) -> Option<&str> {
        match self {
            Self::Ask { data, .. } | Self::Chat { data, .. } | Self::Catalog { data, .. } => {
                data.as_deref()
            }
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 10] = [
            vec!["loanchat", "ask"],
            vec!["loanchat", "ask", "gold", "loan"],
            vec!["loanchat", "ask", "gold loan on 25 may 2025"],
            vec!["loanchat", "ask", "2025-05-24", "--json"],
            vec!["loanchat", "ask", "--data", "./loan_data.csv", "gold"],
            vec!["loanchat", "chat"],
            vec!["loanchat", "chat", "--json"],
            vec!["loanchat", "chat", "--data", "ledger.csv"],
            vec!["loanchat", "catalog"],
            vec!["loanchat", "catalog", "--json", "--data", "ledger.csv"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn ask_collects_every_question_word() {
        let parsed = parse_from(["loanchat", "ask", "gold", "loan", "on", "25", "may", "2025"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(cli.command, Commands::Ask { json: false, .. }));
            if let Commands::Ask { query, data, .. } = cli.command {
                assert_eq!(query.join(" "), "gold loan on 25 may 2025");
                assert_eq!(data, None);
            }
        }
    }

    #[test]
    fn data_flag_is_shared_across_commands() {
        for command in ["ask", "chat", "catalog"] {
            let parsed = parse_from(["loanchat", command, "--data", "ledger.csv"]);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(cli.command.data_flag(), Some("ledger.csv"));
            }
        }
    }

    #[test]
    fn blank_data_path_is_rejected() {
        let parsed = parse_from(["loanchat", "catalog", "--data", "  "]);
        assert!(parsed.is_err());
    }

    #[test]
    fn bare_invocation_shows_help() {
        let parsed = parse_from(["loanchat"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(
                err.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["loanchat", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn ask_help_uses_clap_display_help() {
        let parsed = parse_from(["loanchat", "ask", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        let parsed = parse_from(["loanchat", "import"]);
        assert!(parsed.is_err());
    }
}
