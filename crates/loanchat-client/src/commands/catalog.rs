use crate::ClientResult;
use crate::commands::session::Session;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CatalogData;
use crate::query::date::format_iso_date;

pub fn run(data_path: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let session = Session::open(data_path)?;
    describe(&session)
}

/// Lists what a query can refer to: report dates and product labels.
pub fn describe(session: &Session) -> ClientResult<SuccessEnvelope> {
    let store = session.store();
    let data = CatalogData {
        data_path: session.data_path().display().to_string(),
        record_count: store.len() as i64,
        report_dates: store.report_dates().iter().map(format_iso_date).collect(),
        products: store.product_vocabulary().to_vec(),
        year_span: store.year_span(),
    };
    success("catalog", data)
}
