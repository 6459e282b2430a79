// Utility helpers for cell cleaning and console formatting.
//
// The loader and the month aggregation both lean on these so the rest of
// the code can assume trimmed, non-blank labels.
use num_format::{Locale, ToFormattedString};

/// Trim a raw cell and turn blank values into `None`.
pub fn clean_cell(s: Option<&str>) -> Option<String> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    Some(s.to_string())
}

/// Title-case every whitespace-separated word: first character upper case,
/// the rest lower case. Runs of whitespace collapse to a single space.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}
