use reqwest::Client;

use crate::{Result, SOLD_URL};

/// Requests the results page with the given 1-based page number.
pub(crate) async fn request_results_page(client: &Client, page_nr: usize) -> Result<String> {
    request_page_html(client, &format!("{SOLD_URL}&page={page_nr}")).await
}

/// Requests a page and returns a `Result<String>` containing the HTML.
/// A non-success status is a hard error, there is no retry.
pub(crate) async fn request_page_html(client: &Client, url: &str) -> Result<String> {
    let res = client.get(url).send().await?.error_for_status()?;
    let html = res.text().await?;
    Ok(html)
}
