//! Listing CSV reading into a Polars DataFrame.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::encoding::decode_text;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Validate DataFrame shape after loading.
///
/// Checks for:
/// - Empty DataFrame (no rows)
/// - Empty column names
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Parse listing CSV bytes. Headers are kept exactly as written; header
/// normalization happens in the transform stage.
///
/// The whole file is scanned for schema inference so that a single odd
/// value late in a numeric column turns it into text instead of a parse
/// failure. Enrichment reports such values precisely.
pub fn parse_listing_csv(bytes: &[u8], path: &Path) -> Result<DataFrame> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let (text, _) = decode_text(bytes, path)?;
    let cursor = Cursor::new(text.into_owned().into_bytes());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_dataframe_shape(&df, path)?;
    Ok(df)
}

/// Reads a listing CSV file into a DataFrame.
pub fn read_listing_table(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    parse_listing_csv(&bytes, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_listing_table_keeps_raw_headers() {
        let file = create_temp_csv(b"Restaurant ID,City,Aggregate rating\n1,Rio,4.5\n2,Goa,3.0\n");
        let df = read_listing_table(file.path()).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["Restaurant ID", "City", "Aggregate rating"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_read_listing_table_quoted_commas() {
        let file = create_temp_csv(b"Name,Cuisines\nCasa,\"Italian, Pizza\"\n");
        let df = read_listing_table(file.path()).unwrap();
        let cuisines = df.column("Cuisines").unwrap().str().unwrap();
        assert_eq!(cuisines.get(0), Some("Italian, Pizza"));
    }

    #[test]
    fn test_read_listing_table_latin1() {
        let file = create_temp_csv(b"City,Votes\nS\xE3o Paulo,10\n");
        let df = read_listing_table(file.path()).unwrap();
        let city = df.column("City").unwrap().str().unwrap();
        assert_eq!(city.get(0), Some("São Paulo"));
    }

    #[test]
    fn test_read_listing_table_header_only() {
        let file = create_temp_csv(b"A,B,C\n");
        let result = read_listing_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_listing_table_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_listing_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_check_file_size_with_limit() {
        let file = create_temp_csv(b"A\n1\n");
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
        let result = check_file_size_with_limit(file.path(), 2);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = read_listing_table(Path::new("/nonexistent/zomato.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
