use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::contracts::types::DataIssue;
use crate::ledger::{LoanRecord, RecordStore};
use crate::query::date::parse_iso_date;
use crate::{ClientError, ClientResult};

pub const DATE_HEADER: &str = "Date";
pub const PRODUCT_HEADER: &str = "Product Type";
pub const AMOUNT_HEADER: &str = "Amount";
pub const REQUIRED_HEADERS: [&str; 3] = [DATE_HEADER, PRODUCT_HEADER, AMOUNT_HEADER];

pub fn load_store(path: &Path) -> ClientResult<RecordStore> {
    let content = fs::read_to_string(path).map_err(|error| {
        if error.kind() == ErrorKind::NotFound {
            return ClientError::data_file_not_found(path);
        }
        ClientError::data_file_unreadable(path, &error.to_string())
    })?;

    let store = match parse_store(&content) {
        Ok(value) => value,
        Err(error) => {
            warn!(path = %path.display(), code = %error.code, "rejected loan data");
            return Err(error);
        }
    };

    info!(
        path = %path.display(),
        records = store.len(),
        products = store.product_vocabulary().len(),
        "loaded loan data"
    );
    Ok(store)
}

/// Parses CSV text into a store. Any invalid row rejects the whole source.
pub fn parse_store(content: &str) -> ClientResult<RecordStore> {
    if content.trim().is_empty() {
        return Err(ClientError::data_source_empty());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| ClientError::data_malformed(&error.to_string()))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    if REQUIRED_HEADERS
        .iter()
        .any(|required| !index_by_name.contains_key(*required))
    {
        return Err(ClientError::data_schema_mismatch(headers));
    }

    let mut records = Vec::new();
    let mut issues = Vec::new();
    let mut rows_read = 0i64;
    // Sum of every accepted amount; `None` once it no longer fits a Decimal.
    let mut running_total = Some(Decimal::ZERO);
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|error| ClientError::data_malformed(&error.to_string()))?;
        rows_read += 1;
        let row = (row_index as i64) + 1;

        let date_raw = value_for(&record, &index_by_name, DATE_HEADER);
        let product_raw = value_for(&record, &index_by_name, PRODUCT_HEADER);
        let amount_raw = value_for(&record, &index_by_name, AMOUNT_HEADER);

        let date = parse_record_date(&date_raw);
        if date.is_none() {
            issues.push(issue(
                row,
                DATE_HEADER,
                "invalid_date",
                "Date must be a real calendar date in YYYY-MM-DD form.",
                &date_raw,
            ));
        }

        let product_type = product_raw.trim().to_string();
        if product_type.is_empty() {
            issues.push(issue(
                row,
                PRODUCT_HEADER,
                "missing_product_type",
                "Product Type must not be blank.",
                &product_raw,
            ));
        }

        let amount = match parse_amount(&amount_raw) {
            Some(value) if value.is_sign_negative() && !value.is_zero() => {
                issues.push(issue(
                    row,
                    AMOUNT_HEADER,
                    "negative_amount",
                    "Amount must not be negative.",
                    &amount_raw,
                ));
                None
            }
            Some(value) => Some(value),
            None => {
                issues.push(issue(
                    row,
                    AMOUNT_HEADER,
                    "invalid_amount",
                    "Amount must be a decimal number.",
                    &amount_raw,
                ));
                None
            }
        };

        if let Some(value) = amount
            && let Some(total) = running_total
        {
            running_total = total.checked_add(value);
            if running_total.is_none() {
                issues.push(issue(
                    row,
                    AMOUNT_HEADER,
                    "amount_overflow",
                    "Amounts in this file add up to more than can be totaled exactly.",
                    &amount_raw,
                ));
            }
        }

        if let (Some(date), Some(amount)) = (date, amount)
            && !product_type.is_empty()
        {
            records.push(LoanRecord::new(date, product_type, amount));
        }
    }

    if !issues.is_empty() {
        return Err(ClientError::data_validation_failed(rows_read, issues));
    }

    Ok(RecordStore::new(records))
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> String {
    index_by_name
        .get(field_name)
        .and_then(|index| record.get(*index))
        .unwrap_or("")
        .to_string()
}

/// Accepts `YYYY-MM-DD` with an optional trailing time component.
fn parse_record_date(value: &str) -> Option<chrono::NaiveDate> {
    let trimmed = value.trim();
    let date_part = match trimmed.find([' ', 'T']) {
        Some(position) => &trimmed[..position],
        None => trimmed,
    };
    parse_iso_date(date_part)
}

fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned = value
        .trim()
        .chars()
        .filter(|character| *character != ',')
        .collect::<String>();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

fn issue(row: i64, field: &str, code: &str, description: &str, received: &str) -> DataIssue {
    DataIssue {
        row,
        field: field.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        received: Some(received.to_string()),
    }
}
