use chrono::NaiveDate;
use tracing::debug;

use crate::ledger::{LoanRecord, RecordStore};
use crate::query::date::{DateExtractor, FuzzyDateExtractor};
use crate::query::product::match_product;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPredicate {
    pub date: Option<NaiveDate>,
    pub product: Option<String>,
}

impl ResolvedPredicate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.product.is_none()
    }

    pub fn matches(&self, record: &LoanRecord) -> bool {
        if let Some(date) = self.date
            && record.date != date
        {
            return false;
        }
        if let Some(product) = &self.product
            && &record.product_type != product
        {
            return false;
        }
        true
    }
}

/// How a view relates to the query that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Blank query; the whole store is shown.
    NoQuery,
    /// Query present but neither a date nor a product was recognized.
    Unresolved,
    Matched,
    /// Non-blank query with an empty view.
    NoMatch,
}

impl ViewState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoQuery => "no_query",
            Self::Unresolved => "unresolved",
            Self::Matched => "matched",
            Self::NoMatch => "no_match",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub query: Option<String>,
    pub predicate: ResolvedPredicate,
    pub view: Vec<&'a LoanRecord>,
    pub state: ViewState,
}

pub fn resolve_query<'a>(store: &'a RecordStore, query: &str) -> Resolution<'a> {
    resolve_query_with(store, query, &FuzzyDateExtractor::today())
}

pub fn resolve_query_with<'a, E>(store: &'a RecordStore, query: &str, extractor: &E) -> Resolution<'a>
where
    E: DateExtractor + ?Sized,
{
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Resolution {
            query: None,
            predicate: ResolvedPredicate::default(),
            view: store.records().iter().collect(),
            state: ViewState::NoQuery,
        };
    }

    let predicate = ResolvedPredicate {
        date: extractor.extract(trimmed, store.year_span()),
        product: match_product(trimmed, store.product_vocabulary()).map(str::to_string),
    };

    let view = store
        .records()
        .iter()
        .filter(|record| predicate.matches(record))
        .collect::<Vec<&LoanRecord>>();

    let state = if view.is_empty() {
        ViewState::NoMatch
    } else if predicate.is_empty() {
        ViewState::Unresolved
    } else {
        ViewState::Matched
    };

    debug!(
        date = ?predicate.date,
        product = ?predicate.product,
        matched = view.len(),
        state = state.as_str(),
        "resolved query"
    );

    Resolution {
        query: Some(trimmed.to_string()),
        predicate,
        view,
        state,
    }
}
