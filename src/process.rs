use std::path::Path;

use chrono::Local;
use reqwest::Client;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::listing::Listing;
use crate::parse::{parse_page_count, parse_sold_listings};
use crate::request::{request_page_html, request_results_page};
use crate::{info_time, Result, FILE_PATH, SOLD_URL};

/// Runs the `sold` command: derives the page count, scrapes every results
/// page in order and overwrites the CSV in the working directory.
/// With `debug` set the run is limited to a single page and the table is
/// echoed to stdout before being written.
pub async fn run_sold(debug: bool) -> Result<()> {
    let start_time = Local::now();
    let client = Client::new();

    info_time!("Started scraping");

    let pages = if debug {
        1
    } else {
        let html = request_page_html(&client, SOLD_URL).await?;
        parse_page_count(&html)?
    };

    let listings = collect_listings(&client, pages).await?;
    info_time!(
        start_time,
        "Scraped {} listings from {} page(s).",
        listings.len(),
        pages
    );

    if debug {
        dump_table(&listings);
    }

    let local_now = Local::now();
    write_csv(Path::new(FILE_PATH), &listings).await?;
    info_time!(local_now, "Wrote the results to file: {FILE_PATH}");

    Ok(())
}

/// Walks the results pages in order, one fetch at a time, and
/// accumulates the listings from each. Page order and in-page order are
/// preserved.
async fn collect_listings(client: &Client, pages: usize) -> Result<Vec<Listing>> {
    let mut listings = Vec::new();
    for page_nr in 1..=pages {
        info_time!("Page {}/{}", page_nr, pages);
        let html = request_results_page(client, page_nr).await?;
        listings.append(&mut parse_sold_listings(&html)?);
    }
    Ok(listings)
}

/// Renders the listings as a CSV table: header row, then one row per
/// listing with a leading 0-based index column.
pub fn render_csv(listings: &[Listing]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(Listing::COLUMNS)?;
        for (index, listing) in listings.iter().enumerate() {
            wtr.write_record(listing.csv_row(index))?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

/// Renders the table and overwrites `path` with it.
pub async fn write_csv(path: &Path, listings: &[Listing]) -> Result<()> {
    let bytes = render_csv(listings)?;
    let mut file = File::create(path).await?;
    file.write_all(&bytes).await?;
    Ok(())
}

/// Plain-text dump of the table for debug runs.
fn dump_table(listings: &[Listing]) {
    println!("{}", Listing::COLUMNS.join("\t"));
    for (index, listing) in listings.iter().enumerate() {
        println!("{}", listing.csv_row(index).join("\t"));
    }
}
