//! FLYTTDATA
//! Scrapes sold listings from Hemnet and aggregates them into a CSV table.

mod error;
pub mod listing;
mod macros;
pub mod parse;
pub mod process;
mod request;

pub use error::{Error, Result};

/// Sold "bostadsrätt" listings in Solna. Page selection is done by
/// appending `&page=N` to this query.
const SOLD_URL: &str =
    "https://www.hemnet.se/salda/bostader?location_ids%5B%5D=18028&item_types%5B%5D=bostadsratt";
const FILE_PATH: &str = "listings.csv";
