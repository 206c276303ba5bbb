use crate::ClientResult;
use crate::commands::session::Session;
use crate::contracts::envelope::SuccessEnvelope;

#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    pub query: Option<String>,
    pub data_path: Option<String>,
}

pub fn run_with_options(options: AskOptions) -> ClientResult<SuccessEnvelope> {
    let session = Session::open(options.data_path.as_deref())?;
    session.ask(options.query.as_deref().unwrap_or(""))
}
