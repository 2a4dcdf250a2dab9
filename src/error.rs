use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseBadSelector(String),

    #[error("Listing is missing a required element. Selector: {0}")]
    MissingElement(&'static str),

    #[error("Couldn't parse {field} out of {text:?}")]
    MalformedField { field: &'static str, text: String },

    #[error("No usable pagination control found on the first results page.")]
    MissingPagination,

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
