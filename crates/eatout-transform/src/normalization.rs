//! Column header normalization.
//!
//! A header is split into words at separators and at case boundaries, each
//! word is title-cased, the words are concatenated, and the result is
//! converted to snake_case. "Restaurant ID" becomes `restaurant_id` and
//! "Average Cost for two" becomes `average_cost_for_two`. Normalizing an
//! already-normalized name returns it unchanged.

use std::collections::HashMap;

use polars::prelude::{Column, DataFrame, PolarsResult};

use crate::error::NormalizeError;

/// Normalize one header. Returns an empty string when the header holds no
/// letters or digits.
pub fn normalize_header(raw: &str) -> String {
    header_words(raw)
        .iter()
        .map(|word| lower_word(word))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Lowercase a word, keeping only caseless or lowercase letters and digits.
/// Lowercasing can emit combining marks ('İ' becomes "i\u{307}") and some
/// uppercase letters have no lowercase form; both are dropped so a second
/// pass finds nothing to split.
fn lower_word(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() && !c.is_uppercase())
        .collect()
}

/// Split a header into words. Any character that is not a letter or digit
/// separates words; inside a run, a word starts at an uppercase letter that
/// follows a lowercase letter or digit, or that ends an acronym before a
/// lowercase letter ("HTMLParser" is `HTML` + `Parser`).
fn header_words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in raw.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();
        for (idx, &ch) in chars.iter().enumerate() {
            if idx > 0 && ch.is_uppercase() {
                let prev = chars[idx - 1];
                let next_is_lower = chars.get(idx + 1).is_some_and(|c| c.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(ch);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}

/// Normalize a full header row, in order.
///
/// Fails when two distinct raw headers collapse to the same name or when a
/// header normalizes to nothing.
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>, NormalizeError> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(raw.len());
    let mut normalized = Vec::with_capacity(raw.len());
    for header in raw {
        let header = header.as_ref();
        let name = normalize_header(header);
        if name.is_empty() {
            return Err(NormalizeError::EmptyHeader {
                raw: header.to_string(),
            });
        }
        if let Some(first) = seen.get(&name) {
            return Err(NormalizeError::HeaderCollision {
                first: (*first).to_string(),
                second: header.to_string(),
                normalized: name,
            });
        }
        seen.insert(name.clone(), header);
        normalized.push(name);
    }
    Ok(normalized)
}

/// Rename every column of a frame to its normalized header.
pub fn normalize_frame_columns(df: &DataFrame) -> Result<DataFrame, crate::PipelineError> {
    let raw: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let normalized = normalize_headers(&raw)?;
    let renamed = rename_all(df, &normalized)?;
    let changed = raw.iter().zip(&normalized).filter(|(a, b)| a != b).count();
    tracing::debug!(columns = raw.len(), renamed = changed, "headers normalized");
    Ok(renamed)
}

fn rename_all(df: &DataFrame, names: &[String]) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .zip(names)
        .map(|(column, name)| column.clone().with_name(name.as_str().into()))
        .collect();
    DataFrame::new(columns)
}
