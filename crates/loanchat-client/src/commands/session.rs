use std::path::Path;

use crate::ClientResult;
use crate::config::{Settings, resolve_settings};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{PredicateData, ProductTotalRow, QueryData, RecordRow};
use crate::ledger::RecordStore;
use crate::ledger::load::load_store;
use crate::query::aggregate::aggregate;
use crate::query::date::format_iso_date;
use crate::query::resolve::{Resolution, resolve_query};

/// A loaded ledger that answers any number of queries.
#[derive(Debug, Clone)]
pub struct Session {
    store: RecordStore,
    settings: Settings,
}

impl Session {
    pub fn open(data_flag: Option<&str>) -> ClientResult<Self> {
        let settings = resolve_settings(data_flag)?;
        Self::open_with_settings(settings)
    }

    pub fn open_with_settings(settings: Settings) -> ClientResult<Self> {
        let store = load_store(&settings.data_path)?;
        Ok(Self::from_parts(store, settings))
    }

    pub fn from_parts(store: RecordStore, settings: Settings) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn data_path(&self) -> &Path {
        &self.settings.data_path
    }

    pub fn ask(&self, query: &str) -> ClientResult<SuccessEnvelope> {
        let resolution = resolve_query(&self.store, query);
        success("ask", self.query_data(&resolution))
    }

    fn query_data(&self, resolution: &Resolution<'_>) -> QueryData {
        let totals = aggregate(resolution.view.iter().copied());
        QueryData {
            query: resolution.query.clone(),
            state: resolution.state.as_str().to_string(),
            predicate: PredicateData {
                date: resolution.predicate.date.as_ref().map(format_iso_date),
                product: resolution.predicate.product.clone(),
            },
            record_count: resolution.view.len() as i64,
            total_amount: totals.total_amount,
            per_product_totals: totals
                .per_product_totals
                .into_iter()
                .map(|group| ProductTotalRow {
                    product_type: group.product_type,
                    amount: group.amount,
                })
                .collect(),
            rows: resolution
                .view
                .iter()
                .map(|record| RecordRow {
                    date: format_iso_date(&record.date),
                    product_type: record.product_type.clone(),
                    amount: record.amount,
                })
                .collect(),
            currency_symbol: self.settings.currency_symbol.clone(),
            data_path: self.settings.data_path.display().to_string(),
        }
    }
}
