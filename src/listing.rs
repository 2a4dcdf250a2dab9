/// One sold listing, extracted from a single listing block on a results
/// page. Immutable once built, written out as one CSV row.
///
/// Optional fields mirror the markup: Hemnet renders the same logical field
/// in several shapes and some sub-elements are simply missing on older
/// listings.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub link: String,
    pub location_area: Option<String>,
    pub location_adress: String,
    pub floor: Option<String>,
    pub location_street: String,
    pub price_end: i64,
    pub sold_day: String,
    pub sold_month: String,
    pub sold_year: String,
    pub price_change: i64,
    pub size: f64,
    pub rooms: Option<f64>,
    pub fee: Option<i64>,
    pub price_per_m2: i64,
    pub fee_per_m2: Option<f64>,
}

impl Listing {
    /// Header row of the output table. The leading unnamed column holds the
    /// row index.
    pub const COLUMNS: [&'static str; 16] = [
        "",
        "link",
        "location_area",
        "location_adress",
        "floor",
        "location_street",
        "price_end",
        "sold_day",
        "sold_month",
        "sold_year",
        "price_change",
        "size",
        "rooms",
        "fee",
        "price_per_m2",
        "fee_per_m2",
    ];

    /// One CSV row in [`Self::COLUMNS`] order. Absent optionals render as
    /// empty cells.
    pub fn csv_row(&self, index: usize) -> Vec<String> {
        vec![
            index.to_string(),
            self.link.clone(),
            self.location_area.clone().unwrap_or_default(),
            self.location_adress.clone(),
            self.floor.clone().unwrap_or_default(),
            self.location_street.clone(),
            self.price_end.to_string(),
            self.sold_day.clone(),
            self.sold_month.clone(),
            self.sold_year.clone(),
            self.price_change.to_string(),
            self.size.to_string(),
            self.rooms.map(|r| r.to_string()).unwrap_or_default(),
            self.fee.map(|f| f.to_string()).unwrap_or_default(),
            self.price_per_m2.to_string(),
            self.fee_per_m2.map(|f| f.to_string()).unwrap_or_default(),
        ]
    }
}

/// Price per square meter, computed when the page doesn't provide one.
/// Truncates toward zero.
pub fn price_per_m2(price_end: i64, size: f64) -> i64 {
    (price_end as f64 / size) as i64
}

/// Fee per square meter. An absent fee propagates as an absent result, it
/// is never divided.
pub fn fee_per_m2(fee: Option<i64>, size: f64) -> Option<f64> {
    fee.map(|fee| fee as f64 / size)
}
