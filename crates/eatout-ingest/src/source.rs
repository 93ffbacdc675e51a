//! Source snapshots: the raw bytes of one listing export and one rate file,
//! identified by their content hash.

use std::fmt;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use sha2::{Digest, Sha256};

use eatout_model::ExchangeRateTable;

use crate::csv::{check_file_size, parse_listing_csv};
use crate::error::{IngestError, Result};
use crate::rates::parse_exchange_rates;

/// Content identity of a listing + rate snapshot.
///
/// `sha256(listings || 0x00 || rates)`, hex encoded. Two loads of unchanged
/// files yield the same identity regardless of path or modification time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(String);

impl SnapshotId {
    pub fn from_bytes(listings: &[u8], rates: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(listings);
        hasher.update([0u8]);
        hasher.update(rates);
        let digest: [u8; 32] = hasher.finalize().into();
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw snapshot bytes, read but not yet parsed.
#[derive(Debug, Clone)]
pub struct SourceFiles {
    pub listings_path: PathBuf,
    pub rates_path: PathBuf,
    listings: Vec<u8>,
    rates: Vec<u8>,
    snapshot: SnapshotId,
}

impl SourceFiles {
    /// Read both files from disk. No retries: a failed read aborts the load.
    pub fn read(listings_path: &Path, rates_path: &Path) -> Result<Self> {
        check_file_size(listings_path)?;
        let listings =
            std::fs::read(listings_path).map_err(|e| IngestError::io(listings_path, e))?;
        let rates = std::fs::read(rates_path).map_err(|e| IngestError::io(rates_path, e))?;
        Ok(Self::from_bytes(listings_path, rates_path, listings, rates))
    }

    /// Build a snapshot from in-memory bytes; the paths only label errors.
    pub fn from_bytes(
        listings_path: impl Into<PathBuf>,
        rates_path: impl Into<PathBuf>,
        listings: Vec<u8>,
        rates: Vec<u8>,
    ) -> Self {
        let snapshot = SnapshotId::from_bytes(&listings, &rates);
        Self {
            listings_path: listings_path.into(),
            rates_path: rates_path.into(),
            listings,
            rates,
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &SnapshotId {
        &self.snapshot
    }

    /// Parse the listing CSV and the rate JSON.
    pub fn parse(&self) -> Result<ListingSource> {
        let listings = parse_listing_csv(&self.listings, &self.listings_path)?;
        let rates = parse_exchange_rates(&self.rates, &self.rates_path)?;
        tracing::debug!(
            snapshot = self.snapshot.short(),
            rows = listings.height(),
            columns = listings.width(),
            "source parsed"
        );
        Ok(ListingSource {
            listings,
            rates,
            snapshot: self.snapshot.clone(),
        })
    }
}

/// Parsed snapshot: raw listing frame plus its rate table.
#[derive(Debug, Clone)]
pub struct ListingSource {
    pub listings: DataFrame,
    pub rates: ExchangeRateTable,
    pub snapshot: SnapshotId,
}

/// Read and parse a listing export and its rate file.
pub fn load_source(listings_path: &Path, rates_path: &Path) -> Result<ListingSource> {
    SourceFiles::read(listings_path, rates_path)?.parse()
}
