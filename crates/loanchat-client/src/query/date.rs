use chrono::{Datelike, Local, NaiveDate};

use crate::ledger::YearSpan;

/// Pulls a single calendar date out of free text.
///
/// Implementations only have to find a candidate; the year-span check is
/// shared so every parser gets the same false-positive guard.
pub trait DateExtractor {
    fn parse_candidate(&self, text: &str) -> Option<NaiveDate>;

    fn extract(&self, text: &str, span: Option<YearSpan>) -> Option<NaiveDate> {
        let candidate = self.parse_candidate(text)?;
        if span?.contains(candidate.year()) {
            return Some(candidate);
        }
        None
    }
}

/// Lenient scanner for dates embedded in sentences.
///
/// Tokens are scanned left to right and the first complete day/month/year
/// combination wins. When no complete date is present, a day and month
/// (`25 may`) take their year from `today`, and a month and year
/// (`may 2025`) take their day from `today`, clamped to the month's length.
/// A lone month name is not a date.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyDateExtractor {
    today: NaiveDate,
}

impl FuzzyDateExtractor {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Fills missing date parts from the local calendar date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    fn partial_date(&self, tokens: &[String]) -> Option<NaiveDate> {
        if tokens.len() < 2 {
            return None;
        }
        let (first, second) = (tokens[0].as_str(), tokens[1].as_str());

        if let (Some(day), Some(month)) = (parse_day(first), month_from_name(second)) {
            return NaiveDate::from_ymd_opt(self.today.year(), month, day);
        }
        if let (Some(month), Some(day)) = (month_from_name(first), parse_day(second)) {
            return NaiveDate::from_ymd_opt(self.today.year(), month, day);
        }
        if let (Some(month), Some(year)) = (month_from_name(first), parse_full_year(second)) {
            return clamped_date(year, month, self.today.day());
        }
        None
    }
}

impl Default for FuzzyDateExtractor {
    fn default() -> Self {
        Self::today()
    }
}

impl DateExtractor for FuzzyDateExtractor {
    fn parse_candidate(&self, text: &str) -> Option<NaiveDate> {
        let tokens = tokenize(text);
        let complete = (0..tokens.len()).find_map(|index| {
            let token = tokens[index].as_str();
            numeric_date(token)
                .or_else(|| joined_textual_date(token))
                .or_else(|| spaced_textual_date(&tokens[index..]))
        });
        if complete.is_some() {
            return complete;
        }
        (0..tokens.len()).find_map(|index| self.partial_date(&tokens[index..]))
    }
}

pub fn extract_date(text: &str, span: Option<YearSpan>) -> Option<NaiveDate> {
    FuzzyDateExtractor::today().extract(text, span)
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Strict `YYYY-MM-DD` parse used for ledger data.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .flat_map(|word| word.split(','))
        .map(|word| {
            word.trim_matches(|character: char| {
                !character.is_alphanumeric() && !matches!(character, '-' | '/' | '.')
            })
            .trim_matches(|character: char| matches!(character, '-' | '/' | '.'))
            .to_lowercase()
        })
        .filter(|word| !word.is_empty() && !is_filler(word))
        .collect()
}

fn is_filler(word: &str) -> bool {
    matches!(word, "of" | "the") || weekday_from_name(word)
}

fn weekday_from_name(word: &str) -> bool {
    matches!(
        word,
        "monday"
            | "mon"
            | "tuesday"
            | "tue"
            | "tues"
            | "wednesday"
            | "wed"
            | "thursday"
            | "thu"
            | "thur"
            | "thurs"
            | "friday"
            | "fri"
            | "saturday"
            | "sat"
            | "sunday"
            | "sun"
    )
}

/// `2025-05-24`, `2025/05/24`, `05/24/2025`, `24.05.2025`, `20250524`.
fn numeric_date(token: &str) -> Option<NaiveDate> {
    if token.len() == 8 && token.bytes().all(|byte| byte.is_ascii_digit()) {
        let year = token[..4].parse::<i32>().ok()?;
        let month = token[4..6].parse::<u32>().ok()?;
        let day = token[6..].parse::<u32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let separator = token.chars().find(|character| matches!(character, '-' | '/' | '.'))?;
    let parts = token.split(separator).collect::<Vec<&str>>();
    if parts.len() != 3
        || parts
            .iter()
            .any(|part| part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()))
    {
        return None;
    }

    if parts[0].len() == 4 {
        let year = parts[0].parse::<i32>().ok()?;
        let month = parts[1].parse::<u32>().ok()?;
        let day = parts[2].parse::<u32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if parts[2].len() == 4 && parts[0].len() <= 2 && parts[1].len() <= 2 {
        let first = parts[0].parse::<u32>().ok()?;
        let second = parts[1].parse::<u32>().ok()?;
        let year = parts[2].parse::<i32>().ok()?;
        let (month, day) = if first <= 12 {
            (first, second)
        } else {
            (second, first)
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// `25-may-2025`, `may/25/2025`.
fn joined_textual_date(token: &str) -> Option<NaiveDate> {
    let parts = token.split(['-', '/']).collect::<Vec<&str>>();
    if parts.len() != 3 {
        return None;
    }
    day_month_year(parts[0], parts[1], parts[2])
        .or_else(|| day_month_year(parts[1], parts[0], parts[2]))
}

/// `25 may 2025`, `25th may 2025`, `may 25 2025`.
fn spaced_textual_date(tokens: &[String]) -> Option<NaiveDate> {
    if tokens.len() < 3 {
        return None;
    }
    day_month_year(&tokens[0], &tokens[1], &tokens[2])
        .or_else(|| day_month_year(&tokens[1], &tokens[0], &tokens[2]))
}

fn day_month_year(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day = parse_day(day)?;
    let month = month_from_name(month)?;
    let year = parse_full_year(year)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Steps the day back until it fits the month (`31` in February becomes `28`).
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|candidate| NaiveDate::from_ymd_opt(year, month, candidate))
}

fn parse_day(value: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
        .unwrap_or(value);
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|byte| byte.is_ascii_digit())
    {
        return None;
    }
    let day = digits.parse::<u32>().ok()?;
    if (1..=31).contains(&day) {
        return Some(day);
    }
    None
}

fn parse_full_year(value: &str) -> Option<i32> {
    if value.len() != 4 || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse::<i32>().ok()
}

fn month_from_name(value: &str) -> Option<u32> {
    let month = match value {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{DateExtractor, FuzzyDateExtractor, extract_date, format_iso_date, parse_iso_date};
    use crate::ledger::YearSpan;

    const SPAN_2025: Option<YearSpan> = Some(YearSpan {
        min: 2025,
        max: 2025,
    });

    fn extractor() -> Option<FuzzyDateExtractor> {
        NaiveDate::from_ymd_opt(2025, 6, 30).map(FuzzyDateExtractor::new)
    }

    fn candidate(text: &str) -> Option<String> {
        extractor()?
            .parse_candidate(text)
            .map(|date| format_iso_date(&date))
    }

    #[test]
    fn finds_dates_inside_sentences() {
        let cases = [
            ("gold loan on 25 may 2025", "2025-05-25"),
            ("2025-05-24", "2025-05-24"),
            ("show me 2025/05/24 please", "2025-05-24"),
            ("loans on 25th May, 2025?", "2025-05-25"),
            ("what about May 25th, 2025", "2025-05-25"),
            ("the 3rd of june 2025", "2025-06-03"),
            ("Sunday, 25 May 2025", "2025-05-25"),
            ("report 25-May-2025", "2025-05-25"),
            ("report 20250524", "2025-05-24"),
            ("sept 9 2025 totals", "2025-09-09"),
            ("(2025-05-24)", "2025-05-24"),
        ];

        for (text, expected) in cases {
            assert_eq!(candidate(text).as_deref(), Some(expected), "query: {text}");
        }
    }

    #[test]
    fn slash_dates_prefer_month_first_unless_impossible() {
        assert_eq!(candidate("05/06/2025").as_deref(), Some("2025-05-06"));
        assert_eq!(candidate("24/05/2025").as_deref(), Some("2025-05-24"));
        assert_eq!(candidate("24.05.2025").as_deref(), Some("2025-05-24"));
    }

    #[test]
    fn rejects_text_without_a_complete_date() {
        let cases = [
            "",
            "   ",
            "personal loan",
            "may I see gold loan",
            "loans in may",
            "call 9876543210",
            "amount 5000",
            "12345678",
            "31 june",
        ];

        for text in cases {
            assert_eq!(candidate(text), None, "query: {text}");
        }
    }

    #[test]
    fn partial_dates_borrow_missing_parts_from_today() {
        let cases = [
            ("gold loan on 25 may", "2025-05-25"),
            ("may 24th gold loan", "2025-05-24"),
            ("25 may 25", "2025-05-25"),
            ("loans in may 2024", "2024-05-30"),
            ("february 2024", "2024-02-29"),
            ("february 2025 totals", "2025-02-28"),
        ];

        for (text, expected) in cases {
            assert_eq!(candidate(text).as_deref(), Some(expected), "query: {text}");
        }
    }

    #[test]
    fn complete_dates_win_over_earlier_partial_ones() {
        assert_eq!(
            candidate("24 may or 2025-05-25").as_deref(),
            Some("2025-05-25")
        );
    }

    #[test]
    fn partial_dates_still_face_the_year_span() {
        let extracted = extractor().and_then(|value| value.extract("25 may", SPAN_2025));
        assert_eq!(extracted, NaiveDate::from_ymd_opt(2025, 5, 25));

        let span_2024 = Some(YearSpan {
            min: 2024,
            max: 2024,
        });
        let extracted = extractor().and_then(|value| value.extract("25 may", span_2024));
        assert_eq!(extracted, None);
    }

    #[test]
    fn invalid_calendar_values_are_not_found() {
        assert_eq!(candidate("2025-02-30"), None);
        assert_eq!(candidate("31 june 2025"), None);
        assert_eq!(candidate("13/13/2025"), None);
    }

    #[test]
    fn first_date_wins_when_several_are_present() {
        assert_eq!(
            candidate("from 2025-05-24 to 2025-05-25").as_deref(),
            Some("2025-05-24")
        );
    }

    #[test]
    fn out_of_span_years_are_not_found() {
        assert!(extract_date("2025-05-24", SPAN_2025).is_some());
        assert_eq!(extract_date("1999-05-24", SPAN_2025), None);
        assert_eq!(extract_date("24 may 2030", SPAN_2025), None);
        assert_eq!(extract_date("2025-05-24", None), None);
    }

    #[test]
    fn strict_iso_parser_requires_exact_shape() {
        assert_eq!(
            parse_iso_date("2025-05-24"),
            NaiveDate::from_ymd_opt(2025, 5, 24)
        );
        assert_eq!(parse_iso_date("2025-5-24"), None);
        assert_eq!(parse_iso_date("2025/05/24"), None);
        assert_eq!(parse_iso_date("2025-13-01"), None);
    }
}
