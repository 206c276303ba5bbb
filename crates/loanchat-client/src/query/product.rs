/// Returns the first vocabulary entry contained in `text`, ignoring case.
///
/// Vocabulary order decides ties: when "Loan" precedes "Gold Loan", a query
/// for "gold loan" resolves to "Loan".
pub fn match_product<'a>(text: &str, vocabulary: &'a [String]) -> Option<&'a str> {
    let lowered = text.to_lowercase();
    vocabulary
        .iter()
        .find(|product| {
            let needle = product.to_lowercase();
            !needle.trim().is_empty() && lowered.contains(&needle)
        })
        .map(String::as_str)
}
