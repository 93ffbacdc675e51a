//! CSV reading utilities.

mod encoding;
mod reader;

pub use encoding::{SourceEncoding, decode_text, validate_encoding};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, parse_listing_csv,
    read_listing_table, validate_dataframe_shape,
};
