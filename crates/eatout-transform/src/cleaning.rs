//! Row cleaning: incomplete rows out first, then exact duplicates.
//!
//! The order matters. Two rows that differ only in a missing cell are not
//! duplicates of each other until the incomplete one is gone.

use std::collections::HashSet;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, PolarsResult};
use serde::Serialize;

use crate::frame_utils::{is_missing, value_text};

/// Row counts for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub dropped_incomplete: usize,
    pub dropped_duplicates: usize,
    pub rows_out: usize,
}

/// Drop every row with a missing value in any column.
pub fn drop_incomplete_rows(df: &DataFrame) -> PolarsResult<(DataFrame, usize)> {
    let columns = df.get_columns();
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut complete = true;
        for column in columns {
            if is_missing(&column.get(idx)?) {
                complete = false;
                break;
            }
        }
        keep.push(complete);
    }
    filter_rows(df, &keep)
}

/// Drop rows identical to an earlier row across every column, keeping the
/// first occurrence.
pub fn drop_duplicate_rows(df: &DataFrame) -> PolarsResult<(DataFrame, usize)> {
    let columns = df.get_columns();
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut key = Vec::with_capacity(columns.len());
        for column in columns {
            key.push(value_text(&column.get(idx)?));
        }
        keep.push(seen.insert(key));
    }
    filter_rows(df, &keep)
}

/// Run both cleaning steps and report what each removed.
pub fn clean_listings(df: &DataFrame) -> PolarsResult<(DataFrame, CleaningReport)> {
    let rows_in = df.height();
    let (complete, dropped_incomplete) = drop_incomplete_rows(df)?;
    let (unique, dropped_duplicates) = drop_duplicate_rows(&complete)?;
    let report = CleaningReport {
        rows_in,
        dropped_incomplete,
        dropped_duplicates,
        rows_out: unique.height(),
    };
    if dropped_incomplete > 0 || dropped_duplicates > 0 {
        tracing::debug!(
            rows_in,
            dropped_incomplete,
            dropped_duplicates,
            rows_out = report.rows_out,
            "listings cleaned"
        );
    }
    Ok((unique, report))
}

fn filter_rows(df: &DataFrame, keep: &[bool]) -> PolarsResult<(DataFrame, usize)> {
    let removed = keep.iter().filter(|kept| !**kept).count();
    if removed == 0 {
        return Ok((df.clone(), 0));
    }
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok((df.filter(&mask)?, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_blank_strings_count_as_missing() {
        let df = df! {
            "city" => &[Some("Goa"), Some("  "), Some("Rio")],
            "votes" => &[Some(1i64), Some(2), None],
        }
        .unwrap();
        let (cleaned, removed) = drop_incomplete_rows(&df).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(cleaned.height(), 1);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let df = df! {
            "id" => &[1i64, 2, 1, 1],
            "city" => &["Goa", "Rio", "Goa", "Pune"],
        }
        .unwrap();
        let (cleaned, removed) = drop_duplicate_rows(&df).unwrap();
        assert_eq!(removed, 1);
        let cities = cleaned.column("city").unwrap();
        let cities: Vec<_> = cities.str().unwrap().into_iter().flatten().collect();
        assert_eq!(cities, ["Goa", "Rio", "Pune"]);
    }

    #[test]
    fn test_missing_rows_go_before_dedupe() {
        let df = df! {
            "id" => &[Some(1i64), Some(1), Some(1)],
            "city" => &[None, Some("Goa"), Some("Goa")],
        }
        .unwrap();
        let (cleaned, report) = clean_listings(&df).unwrap();
        assert_eq!(cleaned.height(), 1);
        assert_eq!(
            report,
            CleaningReport {
                rows_in: 3,
                dropped_incomplete: 1,
                dropped_duplicates: 1,
                rows_out: 1,
            }
        );
    }
}
