use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_catalog(data: &Value) -> io::Result<String> {
    let record_count = data
        .get("record_count")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let data_path = data.get("data_path").and_then(Value::as_str).unwrap_or("");
    let years = match data.get("year_span") {
        Some(span) if !span.is_null() => {
            let min = span.get("min").and_then(Value::as_i64).unwrap_or(0);
            let max = span.get("max").and_then(Value::as_i64).unwrap_or(0);
            if min == max {
                min.to_string()
            } else {
                format!("{min} to {max}")
            }
        }
        _ => "none".to_string(),
    };

    let mut lines = vec!["Loan ledger".to_string(), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Data file:", data_path.to_string()),
            ("Records:", record_count.to_string()),
            ("Years:", years),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Available Report Dates".to_string());
    lines.extend(bulleted(data.get("report_dates")));

    lines.push(String::new());
    lines.push("Available Products".to_string());
    lines.extend(bulleted(data.get("products")));

    Ok(lines.join("\n"))
}

fn bulleted(values: Option<&Value>) -> Vec<String> {
    let items = values
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(|entry| format!("  - {entry}"))
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();

    if items.is_empty() {
        return vec!["  (none)".to_string()];
    }
    items
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_catalog;

    #[test]
    fn lists_dates_and_products_in_payload_order() {
        let data = json!({
            "data_path": "/tmp/loan_data.csv",
            "record_count": 3,
            "report_dates": ["2025-05-24", "2025-05-25"],
            "products": ["Gold Loan", "Business Loan"],
            "year_span": {"min": 2025, "max": 2025}
        });

        let rendered = render_catalog(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Records:    3"));
            assert!(text.contains("Years:      2025"));
            assert!(text.contains("Available Report Dates\n  - 2025-05-24\n  - 2025-05-25"));
            assert!(text.contains("Available Products\n  - Gold Loan\n  - Business Loan"));
        }
    }

    #[test]
    fn empty_ledger_says_none() {
        let data = json!({
            "data_path": "/tmp/loan_data.csv",
            "record_count": 0,
            "report_dates": [],
            "products": [],
            "year_span": null
        });

        let rendered = render_catalog(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Years:      none"));
            assert!(text.contains("Available Products\n  (none)"));
        }
    }

    #[test]
    fn multi_year_span_is_a_range() {
        let data = json!({
            "record_count": 2,
            "report_dates": ["2024-12-31", "2025-01-01"],
            "products": ["Gold Loan"],
            "year_span": {"min": 2024, "max": 2025}
        });

        let rendered = render_catalog(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("2024 to 2025"));
        }
    }
}
