//! Exchange-rate snapshot loading.

use std::path::Path;

use eatout_model::ExchangeRateTable;

use crate::error::{IngestError, Result};

/// Parse exchange-rate JSON bytes.
pub fn parse_exchange_rates(bytes: &[u8], path: &Path) -> Result<ExchangeRateTable> {
    let text = String::from_utf8_lossy(bytes);
    let table =
        ExchangeRateTable::from_json_str(&text).map_err(|source| IngestError::RatesParse {
            path: path.to_path_buf(),
            source,
        })?;
    if table.is_empty() {
        return Err(IngestError::EmptyRates {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(
        path = %path.display(),
        rate_count = table.len(),
        base_code = table.reporting_currency(),
        "exchange rates loaded"
    );
    Ok(table)
}

/// Read and parse an exchange-rate JSON file.
pub fn load_exchange_rates(path: &Path) -> Result<ExchangeRateTable> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    parse_exchange_rates(&bytes, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rate_object_is_rejected() {
        let err = parse_exchange_rates(b"{}", Path::new("rates.json")).unwrap_err();
        assert!(matches!(err, IngestError::EmptyRates { .. }));
    }

    #[test]
    fn malformed_json_is_reported_with_path() {
        let err = parse_exchange_rates(b"{\"BRL\":", Path::new("rates.json")).unwrap_err();
        assert!(matches!(err, IngestError::RatesParse { .. }));
        assert!(err.to_string().contains("rates.json"));
    }
}
