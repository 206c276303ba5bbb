use std::cmp;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_COLUMN_WIDTH: usize = 6;
const BAR_GLYPH: char = '█';
const MAX_BAR_WIDTH: usize = 40;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Parses a decimal carried as a JSON string (or number) in a payload.
pub fn parse_amount(value: Option<&serde_json::Value>) -> Decimal {
    let Some(raw) = value else {
        return Decimal::ZERO;
    };
    if let Some(text) = raw.as_str() {
        return Decimal::from_str(text).unwrap_or(Decimal::ZERO);
    }
    Decimal::from_str(&raw.to_string()).unwrap_or(Decimal::ZERO)
}

/// `₹ 1,234,567.50`
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{symbol} {}", group_thousands(amount))
}

/// Two decimal places with comma grouping, e.g. `1,234.50`.
pub fn group_thousands(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let digits = whole.chars().collect::<Vec<char>>();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    format!("{sign}{grouped}.{fraction}")
}

/// Horizontal bar chart scaled so the largest value spans the full width.
pub fn render_bar_chart(entries: &[(String, Decimal)], symbol: &str, max_width: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let peak = entries
        .iter()
        .map(|(_, amount)| *amount)
        .max()
        .unwrap_or(Decimal::ZERO);
    let available = max_width.saturating_sub(INDENT + label_width + 2 + 24);
    let bar_width = cmp::max(cmp::min(available, MAX_BAR_WIDTH), 10);

    entries
        .iter()
        .map(|(label, amount)| {
            let length = bar_length(*amount, peak, bar_width);
            let bar = BAR_GLYPH.to_string().repeat(length);
            format!(
                "{}{label:<label_width$}  {bar:<bar_width$}  {}",
                " ".repeat(INDENT),
                format_money(symbol, *amount)
            )
        })
        .collect()
}

fn bar_length(amount: Decimal, peak: Decimal, width: usize) -> usize {
    if peak <= Decimal::ZERO || amount <= Decimal::ZERO {
        return 0;
    }
    let scaled = (amount / peak * Decimal::from(width)).round();
    let length = scaled.to_usize().unwrap_or(0);
    cmp::max(cmp::min(length, width), 1)
}

pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let natural = natural_widths(columns, rows);
    let budget = max_width
        .saturating_sub(INDENT)
        .saturating_sub(COLUMN_GAP * columns.len().saturating_sub(1));

    let Some(widths) = shrink_to_budget(&natural, columns, budget) else {
        return render_blocks(columns, rows, block_label);
    };

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];

    for row in rows {
        let wrapped = widths
            .iter()
            .enumerate()
            .map(|(index, width)| wrap_text(row.get(index).map(String::as_str).unwrap_or(""), *width))
            .collect::<Vec<Vec<String>>>();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line_index in 0..height {
            let cells = wrapped
                .iter()
                .map(|chunks| chunks.get(line_index).cloned().unwrap_or_default())
                .collect::<Vec<String>>();
            output.push(format_row(columns, &cells, &widths));
        }
    }

    output
}

fn natural_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();

    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    widths
}

/// Narrows the widest columns first until the row fits, never below the
/// header width or the minimum column width.
fn shrink_to_budget(natural: &[usize], columns: &[Column<'_>], budget: usize) -> Option<Vec<usize>> {
    let floors = columns
        .iter()
        .zip(natural)
        .map(|(column, natural_width)| {
            cmp::min(
                *natural_width,
                cmp::max(column.name.chars().count(), MIN_COLUMN_WIDTH),
            )
        })
        .collect::<Vec<usize>>();
    if floors.iter().sum::<usize>() > budget {
        return None;
    }

    let mut widths = natural.to_vec();
    let mut total = widths.iter().sum::<usize>();
    while total > budget {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > floors[*index])
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index)?;
        widths[widest] -= 1;
        total -= 1;
    }

    Some(widths)
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)))
        .trim_end()
        .to_string()
}

fn wrap_text(value: &str, width: usize) -> Vec<String> {
    if width == 0 || value.chars().count() <= width {
        return vec![value.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in value.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if !current.is_empty() && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if word_len <= width {
            current.push_str(word);
        } else {
            lines.extend(split_long_token(word, width));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn split_long_token(token: &str, width: usize) -> Vec<String> {
    token
        .chars()
        .collect::<Vec<char>>()
        .chunks(cmp::max(width, 1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(|label| label.chars().count()).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map(String::as_str).unwrap_or("");
            output.push(format!("    {label:<label_width$}  {value}"));
        }
    }

    output
}
