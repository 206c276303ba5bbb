use loanchat_client::commands;
use loanchat_client::commands::ask::AskOptions;
use loanchat_client::{ClientError, ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Ask { query, data, .. } => commands::ask::run_with_options(AskOptions {
            query: join_query(query),
            data_path: data.clone(),
        }),
        Commands::Catalog { data, .. } => commands::catalog::run(data.as_deref()),
        Commands::Chat { .. } => Err(ClientError::invalid_argument_for_command(
            "`chat` runs an interactive session and has no single response.",
            Some("chat"),
        )),
    }
}

fn join_query(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        return None;
    }
    Some(joined)
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    use super::{dispatch, join_query};

    #[test]
    fn query_words_join_with_single_spaces() {
        let words = ["gold", "loan", "on", "25", "may", "2025"]
            .iter()
            .map(|word| word.to_string())
            .collect::<Vec<String>>();
        assert_eq!(
            join_query(&words).as_deref(),
            Some("gold loan on 25 may 2025")
        );
    }

    #[test]
    fn no_words_means_no_query() {
        assert_eq!(join_query(&[]), None);
        assert_eq!(join_query(&["  ".to_string()]), None);
    }

    #[test]
    fn missing_data_file_surfaces_client_error() {
        let parsed = parse_from([
            "loanchat",
            "ask",
            "--data",
            "/nonexistent/loanchat/loan_data.csv",
            "gold",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_err());
            if let Err(error) = response {
                assert_eq!(error.code, "data_file_not_found");
            }
        }
    }

    #[test]
    fn chat_is_not_dispatchable_as_a_single_response() {
        let parsed = parse_from(["loanchat", "chat"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(dispatch(&cli).is_err());
        }
    }
}
