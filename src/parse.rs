use scraper::{ElementRef, Html, Selector};

use crate::listing::{self, Listing};
use crate::{Error, Result};

/// Finds every listing block on one results page and extracts a [`Listing`]
/// from each. A single malformed block fails the whole page: its raw HTML is
/// dumped to stderr and the error propagates.
pub fn parse_sold_listings(html: &str) -> Result<Vec<Listing>> {
    let doc = Html::parse_document(html);
    let block_selector = create_selector("div.sold-property-listing")?;

    // Around 50 listings per results page.
    let mut listings = Vec::with_capacity(50);
    for block in doc.select(&block_selector) {
        match extract_listing(block) {
            Ok(listing) => listings.push(listing),
            Err(e) => {
                eprintln!("Failed to extract listing from block:\n{}", block.html());
                return Err(e);
            }
        }
    }
    Ok(listings)
}

/// Derives the total page count from the pagination control on the first
/// results page: the maximum of the numbered page links. The trailing link
/// is the "next" arrow and carries no number, so it is excluded.
pub fn parse_page_count(html: &str) -> Result<usize> {
    let doc = Html::parse_document(html);
    let pagination_selector = create_selector("div.pagination")?;
    let link_selector = create_selector("a")?;

    let pagination = doc
        .select(&pagination_selector)
        .next()
        .ok_or(Error::MissingPagination)?;
    let links: Vec<ElementRef> = pagination.select(&link_selector).collect();
    if links.len() < 2 {
        return Err(Error::MissingPagination);
    }

    let mut pages = 0;
    for link in &links[..links.len() - 1] {
        let text = element_text(*link);
        let page_nr: usize = text.parse().map_err(|_| Error::MalformedField {
            field: "page number",
            text,
        })?;
        pages = pages.max(page_nr);
    }
    Ok(pages)
}

/// Extracts one [`Listing`] from a single listing block.
///
/// The tolerated markup variations are handled by branching on the shape
/// actually observed (span count, newline parts, element presence). Anything
/// outside those branches is a hard error.
fn extract_listing(block: ElementRef) -> Result<Listing> {
    let link_selector = create_selector("a.item-link-container")?;
    let link = block
        .select(&link_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or(Error::MissingElement("a.item-link-container[href]"))?
        .to_string();

    // Location block: two item-link spans hold address + area, a single
    // span holds only the address.
    let location_selector = create_selector("div.sold-property-listing__location")?;
    let location = block
        .select(&location_selector)
        .next()
        .ok_or(Error::MissingElement("div.sold-property-listing__location"))?;
    let span_selector = create_selector("span.item-link")?;
    let spans: Vec<ElementRef> = location.select(&span_selector).collect();

    let (adress_span, location_area) = if spans.len() == 2 {
        let area = element_text(spans[1]).trim_matches(',').to_string();
        (spans[0], Some(area))
    } else {
        let first = *spans.first().ok_or(Error::MissingElement("span.item-link"))?;
        (first, None)
    };

    // "Framnäsbacken 4, 4 tr" carries a floor descriptor after the comma;
    // only its digits are kept, slash-joined.
    let raw_adress = element_text(adress_span);
    let adress_parts: Vec<&str> = raw_adress.split(',').collect();
    let (location_adress, floor) = if adress_parts.len() == 2 {
        let digits: Vec<String> = adress_parts[1]
            .chars()
            .filter(|c| c.is_ascii_digit())
            .map(String::from)
            .collect();
        (adress_parts[0].to_string(), Some(digits.join("/")))
    } else {
        (raw_adress, None)
    };

    // Drop the trailing house number to get the bare street name.
    let location_street = match location_adress.rsplit_once(' ') {
        Some((street, _nr)) => street.to_string(),
        None => String::new(),
    };

    let price_selector = create_selector("div.sold-property-listing__price")?;
    let subheading_selector = create_selector("span.sold-property-listing__subheading")?;
    let price_end = parse_price(&element_text(
        block
            .select(&price_selector)
            .next()
            .ok_or(Error::MissingElement("div.sold-property-listing__price"))?
            .select(&subheading_selector)
            .next()
            .ok_or(Error::MissingElement("span.sold-property-listing__subheading"))?,
    ))?;

    let date_selector = create_selector("div.sold-property-listing__sold-date")?;
    let raw_date = element_text(
        block
            .select(&date_selector)
            .next()
            .ok_or(Error::MissingElement("div.sold-property-listing__sold-date"))?,
    );
    let (sold_day, sold_month, sold_year) = parse_sold_date(&raw_date)?;

    // Optional, and unparsable values are also tolerated here: missing or
    // mangled price-change markup means "sold at asking price".
    let change_selector = create_selector("div.sold-property-listing__price-change")?;
    let price_change = block
        .select(&change_selector)
        .next()
        .and_then(|div| div.text().next())
        .map(parse_price_change)
        .unwrap_or(0);

    let size_selector = create_selector("div.sold-property-listing__size")?;
    let size_subheading_selector = create_selector("div.sold-property-listing__subheading")?;
    let raw_size = element_text(
        block
            .select(&size_selector)
            .next()
            .ok_or(Error::MissingElement("div.sold-property-listing__size"))?
            .select(&size_subheading_selector)
            .next()
            .ok_or(Error::MissingElement("div.sold-property-listing__subheading"))?,
    );
    let (size, rooms) = parse_size_rooms(&raw_size)?;

    let fee_selector = create_selector("div.sold-property-listing__fee")?;
    let fee = match block.select(&fee_selector).next() {
        Some(div) => Some(parse_fee(&element_text(div))?),
        None => None,
    };

    let ppm_selector = create_selector("div.sold-property-listing__price-per-m2")?;
    let price_per_m2 = match block.select(&ppm_selector).next() {
        Some(div) => parse_price_per_m2(&element_text(div))?,
        None => listing::price_per_m2(price_end, size),
    };

    Ok(Listing {
        link,
        location_area,
        location_adress,
        floor,
        location_street,
        price_end,
        sold_day,
        sold_month,
        sold_year,
        price_change,
        size,
        rooms,
        fee,
        price_per_m2,
        fee_per_m2: listing::fee_per_m2(fee, size),
    })
}

/// "Slutpris 2 300 000 kr" with NBSP thousands separators.
fn parse_price(text: &str) -> Result<i64> {
    let cleaned = text.replace('\u{a0}', "");
    cleaned
        .trim()
        .trim_start_matches("Slutpris")
        .trim_end_matches("kr")
        .trim()
        .parse()
        .map_err(|_| Error::MalformedField {
            field: "price_end",
            text: text.to_string(),
        })
}

/// "Såld 14 juni 2020" split into its three tokens, no date normalization.
fn parse_sold_date(text: &str) -> Result<(String, String, String)> {
    let date = text.trim_start_matches("Såld").trim();
    let parts: Vec<&str> = date.split_whitespace().collect();
    match parts.as_slice() {
        [day, month, year] => Ok((day.to_string(), month.to_string(), year.to_string())),
        _ => Err(Error::MalformedField {
            field: "sold_date",
            text: text.to_string(),
        }),
    }
}

/// "+5 %" / "-1 %"; anything unparsable counts as no change.
fn parse_price_change(text: &str) -> i64 {
    let cleaned = text.replace('\u{a0}', "");
    cleaned
        .trim()
        .trim_start_matches('+')
        .trim_end_matches('%')
        .trim()
        .parse()
        .unwrap_or(0)
}

/// The size subheading is either a single "43,5 m²" line or three
/// newline-separated parts: size, a separator, room count. Any other shape
/// is treated as size-only with rooms absent.
fn parse_size_rooms(text: &str) -> Result<(f64, Option<f64>)> {
    let parts: Vec<&str> = text.split('\n').collect();
    let (raw_size, raw_rooms) = if parts.len() == 3 {
        (parts[0], Some(parts[2]))
    } else {
        (text, None)
    };

    let size = raw_size
        .trim()
        .trim_end_matches("m²")
        .trim_end_matches('\u{a0}')
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| Error::MalformedField {
            field: "size",
            text: text.to_string(),
        })?;

    let rooms = match raw_rooms {
        Some(raw) => Some(
            raw.trim()
                .trim_end_matches("rum")
                .trim_end_matches('\u{a0}')
                .trim()
                .replace(',', ".")
                .parse()
                .map_err(|_| Error::MalformedField {
                    field: "rooms",
                    text: raw.to_string(),
                })?,
        ),
        None => None,
    };

    Ok((size, rooms))
}

/// "2 190 kr/mån" with NBSP thousands separators.
fn parse_fee(text: &str) -> Result<i64> {
    let cleaned = text.replace('\u{a0}', "");
    cleaned
        .trim()
        .trim_end_matches("kr/mån")
        .trim()
        .parse()
        .map_err(|_| Error::MalformedField {
            field: "fee",
            text: text.to_string(),
        })
}

/// "52 874 kr/m²" with NBSP thousands separators.
fn parse_price_per_m2(text: &str) -> Result<i64> {
    let cleaned = text.replace('\u{a0}', "");
    cleaned
        .trim()
        .trim_end_matches("kr/m²")
        .trim()
        .parse()
        .map_err(|_| Error::MalformedField {
            field: "price_per_m2",
            text: text.to_string(),
        })
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseBadSelector(sel_str.into()))
}

/// All descendant text of an element, outer whitespace trimmed.
fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
