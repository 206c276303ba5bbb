use std::io;

use rust_decimal::Decimal;
use serde_json::Value;

use super::format::{
    Align, Column, format_money, group_thousands, key_value_rows, parse_amount, render_bar_chart,
    render_table_or_blocks, terminal_width,
};

const RECORD_COLUMNS: [Column<'static>; 3] = [
    Column {
        name: "Date",
        align: Align::Left,
    },
    Column {
        name: "Product Type",
        align: Align::Left,
    },
    Column {
        name: "Amount",
        align: Align::Right,
    },
];

pub fn render_query(data: &Value) -> io::Result<String> {
    render_query_with_width(data, terminal_width())
}

fn render_query_with_width(data: &Value, width: usize) -> io::Result<String> {
    let state = data.get("state").and_then(Value::as_str).unwrap_or("");
    let symbol = data
        .get("currency_symbol")
        .and_then(Value::as_str)
        .unwrap_or("");

    let (heading, total_label, chart_title) = match state {
        "no_query" => (
            "Showing all data.",
            "Total Amount in All Data:",
            "Amount by Product Type (All Data)",
        ),
        "matched" | "unresolved" => (
            "Showing filtered data:",
            "Total Amount in Filtered Data:",
            "Amount by Product Type (Filtered)",
        ),
        "no_match" => {
            let mut lines = vec!["No data matches your query.".to_string()];
            lines.extend(filter_lines(data));
            return Ok(lines.join("\n"));
        }
        other => {
            return Err(io::Error::other(format!("unknown query state `{other}`")));
        }
    };

    let mut lines = vec![heading.to_string()];
    if state == "matched" {
        lines.extend(filter_lines(data));
    }
    if state == "unresolved" {
        lines.push("  No date or product was recognized; every row is included.".to_string());
    }

    lines.push(String::new());
    lines.extend(render_table_or_blocks(
        &RECORD_COLUMNS,
        &record_rows(data),
        width,
        "Record",
    ));

    lines.push(String::new());
    lines.push(format!(
        "{total_label} {}",
        format_money(symbol, parse_amount(data.get("total_amount")))
    ));

    let groups = product_totals(data);
    if !groups.is_empty() {
        lines.push(String::new());
        lines.push(chart_title.to_string());
        lines.extend(render_bar_chart(&groups, symbol, width));
    }

    Ok(lines.join("\n"))
}

fn filter_lines(data: &Value) -> Vec<String> {
    let predicate = data.get("predicate");
    let field = |key: &str| {
        predicate
            .and_then(|value| value.get(key))
            .and_then(Value::as_str)
            .unwrap_or("any")
            .to_string()
    };
    key_value_rows(
        &[("Date:", field("date")), ("Product:", field("product"))],
        2,
    )
}

fn record_rows(data: &Value) -> Vec<Vec<String>> {
    data.get("rows")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    vec![
                        text_field(row, "date"),
                        text_field(row, "product_type"),
                        group_thousands(parse_amount(row.get("amount"))),
                    ]
                })
                .collect()
        })
        .unwrap_or_default()
}

fn product_totals(data: &Value) -> Vec<(String, Decimal)> {
    data.get("per_product_totals")
        .and_then(Value::as_array)
        .map(|groups| {
            groups
                .iter()
                .map(|group| {
                    (
                        text_field(group, "product_type"),
                        parse_amount(group.get("amount")),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

fn text_field(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
