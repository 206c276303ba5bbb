use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::YearSpan;

#[derive(Debug, Clone, Serialize)]
pub struct RecordRow {
    pub date: String,
    pub product_type: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductTotalRow {
    pub product_type: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredicateData {
    pub date: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryData {
    pub query: Option<String>,
    pub state: String,
    pub predicate: PredicateData,
    pub record_count: i64,
    pub total_amount: Decimal,
    pub per_product_totals: Vec<ProductTotalRow>,
    pub rows: Vec<RecordRow>,
    pub currency_symbol: String,
    pub data_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogData {
    pub data_path: String,
    pub record_count: i64,
    pub report_dates: Vec<String>,
    pub products: Vec<String>,
    pub year_span: Option<YearSpan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}
