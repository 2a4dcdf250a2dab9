//! End-to-end extraction over a single fixture results page: pagination,
//! three listing blocks of varying shape, CSV rendering.

use flyttdata::parse::{parse_page_count, parse_sold_listings};
use flyttdata::process::{render_csv, write_csv};

// Two location spans with a floor suffix, all optional elements present.
const BLOCK_FULL: &str = "\
    <div class=\"sold-property-listing\">\
      <a class=\"item-link-container\" href=\"https://www.hemnet.se/salda/lagenhet-2rum-skytteholm-1234\"></a>\
      <div class=\"sold-property-listing__location\">\
        <h2>\
          <span class=\"item-link\">Framnäsbacken 4, 4 tr</span>\
          <span class=\"item-link\">Skytteholm,</span>\
        </h2>\
      </div>\
      <div class=\"sold-property-listing__price\">\
        <span class=\"sold-property-listing__subheading\">Slutpris 2\u{a0}300\u{a0}000 kr</span>\
      </div>\
      <div class=\"sold-property-listing__size\">\
        <div class=\"sold-property-listing__subheading\">43,5\u{a0}m²\n+\n2\u{a0}rum</div>\
      </div>\
      <div class=\"sold-property-listing__sold-date\">Såld 14 juni 2020</div>\
      <div class=\"sold-property-listing__price-change\">+5\u{a0}%</div>\
      <div class=\"sold-property-listing__fee\">2\u{a0}190 kr/mån</div>\
      <div class=\"sold-property-listing__price-per-m2\">52\u{a0}874 kr/m²</div>\
    </div>";

// Single location span, single-line size, every optional element missing.
const BLOCK_SPARSE: &str = "\
    <div class=\"sold-property-listing\">\
      <a class=\"item-link-container\" href=\"https://www.hemnet.se/salda/lagenhet-huvudsta-77\"></a>\
      <div class=\"sold-property-listing__location\">\
        <h2>\
          <span class=\"item-link\">Storgatan 1</span>\
        </h2>\
      </div>\
      <div class=\"sold-property-listing__price\">\
        <span class=\"sold-property-listing__subheading\">Slutpris 1\u{a0}000\u{a0}000 kr</span>\
      </div>\
      <div class=\"sold-property-listing__size\">\
        <div class=\"sold-property-listing__subheading\">40\u{a0}m²</div>\
      </div>\
      <div class=\"sold-property-listing__sold-date\">Såld 1 maj 2019</div>\
    </div>";

// Two location spans without a floor suffix, fee present, no page-provided
// price per m², price dropped vs asking.
const BLOCK_NO_FLOOR: &str = "\
    <div class=\"sold-property-listing\">\
      <a class=\"item-link-container\" href=\"https://www.hemnet.se/salda/lagenhet-3rum-huvudsta-9\"></a>\
      <div class=\"sold-property-listing__location\">\
        <h2>\
          <span class=\"item-link\">Huvudstagatan 11</span>\
          <span class=\"item-link\">Huvudsta,</span>\
        </h2>\
      </div>\
      <div class=\"sold-property-listing__price\">\
        <span class=\"sold-property-listing__subheading\">Slutpris 3\u{a0}100\u{a0}000 kr</span>\
      </div>\
      <div class=\"sold-property-listing__size\">\
        <div class=\"sold-property-listing__subheading\">77\u{a0}m²\n+\n3\u{a0}rum</div>\
      </div>\
      <div class=\"sold-property-listing__sold-date\">Såld 28 februari 2020</div>\
      <div class=\"sold-property-listing__price-change\">-2\u{a0}%</div>\
      <div class=\"sold-property-listing__fee\">3\u{a0}450 kr/mån</div>\
    </div>";

fn fixture_page() -> String {
    format!(
        "<html><body>\
         <div class=\"pagination\">\
           <a>1</a><a>2</a><a>3</a><a>4</a><a>Nästa</a>\
         </div>\
         <ul>{BLOCK_FULL}{BLOCK_SPARSE}{BLOCK_NO_FLOOR}</ul>\
         </body></html>"
    )
}

#[test]
fn page_count_from_pagination_control() {
    assert_eq!(parse_page_count(&fixture_page()).unwrap(), 4);
}

#[test]
fn three_blocks_yield_three_complete_rows() {
    let listings = parse_sold_listings(&fixture_page()).unwrap();
    assert_eq!(listings.len(), 3);

    // Required fields populated on every row.
    for listing in &listings {
        assert!(!listing.link.is_empty());
        assert!(listing.price_end > 0);
        assert!(listing.size > 0.0);
        assert!(!listing.sold_day.is_empty());
        assert!(!listing.sold_month.is_empty());
        assert!(!listing.sold_year.is_empty());
    }

    // Optionals follow each block's shape.
    assert_eq!(listings[0].floor.as_deref(), Some("4"));
    assert_eq!(listings[0].price_per_m2, 52_874);

    assert_eq!(listings[1].location_area, None);
    assert_eq!(listings[1].rooms, None);
    assert_eq!(listings[1].fee, None);
    assert_eq!(listings[1].fee_per_m2, None);

    assert_eq!(listings[2].location_area.as_deref(), Some("Huvudsta"));
    assert_eq!(listings[2].floor, None);
    assert_eq!(listings[2].price_change, -2);
    assert_eq!(listings[2].fee, Some(3450));
    // No page value, so 3_100_000 / 77 truncated.
    assert_eq!(listings[2].price_per_m2, 40_259);
}

#[test]
fn csv_has_header_index_column_and_one_row_per_listing() {
    let listings = parse_sold_listings(&fixture_page()).unwrap();
    let csv = String::from_utf8(render_csv(&listings).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with(",link,location_area,location_adress,floor,"));
    assert!(lines[1].starts_with("0,https://www.hemnet.se/salda/lagenhet-2rum-skytteholm-1234,"));
    assert!(lines[2].starts_with("1,"));
    assert!(lines[3].starts_with("2,"));
}

#[tokio::test]
async fn repeated_runs_write_byte_identical_files() {
    let listings = parse_sold_listings(&fixture_page()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let first = dir.path().join("listings.csv");
    let second = dir.path().join("listings2.csv");
    write_csv(&first, &listings).await.unwrap();
    write_csv(&second, &listings).await.unwrap();
    // Overwrite the first file again to cover the overwrite path.
    write_csv(&first, &listings).await.unwrap();

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(second).unwrap();
    assert_eq!(a, b);
    assert!(!a.is_empty());
}
