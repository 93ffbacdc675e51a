//! Listing ingestion.
//!
//! This crate reads the restaurant listing export and the exchange-rate
//! snapshot the dashboard converts prices with.
//!
//! # Features
//!
//! - **CSV Loading**: read the listing export into a Polars DataFrame,
//!   tolerating a UTF-8 BOM and Windows-1252 encoded files
//! - **Exchange Rates**: parse flat or API-envelope rate JSON
//! - **Snapshots**: identify a listing + rate pair by content hash so the
//!   transform stage can memoize its output
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use eatout_ingest::SourceFiles;
//!
//! let files = SourceFiles::read(Path::new("data/zomato.csv"), Path::new("data/rates.json"))?;
//! println!("snapshot {}", files.snapshot());
//! let source = files.parse()?;
//! ```

mod csv;
mod error;
mod rates;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, SourceEncoding, check_file_size, check_file_size_with_limit, decode_text,
    parse_listing_csv, read_listing_table, validate_dataframe_shape, validate_encoding,
};

// === Exchange Rates ===
pub use rates::{load_exchange_rates, parse_exchange_rates};

// === Snapshots ===
pub use source::{ListingSource, SnapshotId, SourceFiles, load_source};
