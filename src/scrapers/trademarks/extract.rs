//! Results table extraction.
//!
//! The registry omits the logo cell when a row has no image, so every column
//! after the image column shifts left by one. [`ColumnLayout`] names both
//! index sets and [`ColumnLayout::for_row`] is the single place choosing one.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::super::{SearchError, SearchResult};
use crate::models::{TrademarkRecord, NO_IMAGE_FOUND};

/// Element id of the results table.
pub const RESULTS_TABLE_ID: &str = "resultsTable";

const ID_COLUMN: usize = 0;
const NUMBER_COLUMN: usize = 2;
const IMAGE_COLUMN: usize = 3;

/// Class label used when the class cell is empty after cleaning.
const ALL_CLASSES: &str = "All";

static RESULTS_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("#{}", RESULTS_TABLE_ID)).unwrap());
static BODY_ROWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody > tr").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static NON_LABEL_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9 ]").unwrap());

/// Column indices of the fields that move with the image cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub class: usize,
    pub status: usize,
}

/// Layout of a row whose image column holds an `<img>`.
pub const WITH_IMAGE: ColumnLayout = ColumnLayout {
    name: 4,
    class: 5,
    status: 6,
};

/// Layout of a row without an image.
pub const WITHOUT_IMAGE: ColumnLayout = ColumnLayout {
    name: 3,
    class: 4,
    status: 5,
};

impl ColumnLayout {
    pub fn for_row(has_image: bool) -> Self {
        if has_image {
            WITH_IMAGE
        } else {
            WITHOUT_IMAGE
        }
    }
}

/// Parses registry result pages into trademark records.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    base_url: String,
}

impl HtmlExtractor {
    /// `base_url` qualifies relative detail page links.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Extract all records, logging and returning nothing on malformed input.
    pub fn extract(&self, html: &str) -> Vec<TrademarkRecord> {
        match self.try_extract(html) {
            Ok(records) => records,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }

    /// Extract all records, failing when the results table is absent.
    pub fn try_extract(&self, html: &str) -> SearchResult<Vec<TrademarkRecord>> {
        let document = Html::parse_document(html);
        let table = document.select(&RESULTS_TABLE).next().ok_or_else(|| {
            SearchError::Parse(format!("table with id '{}' not found", RESULTS_TABLE_ID))
        })?;

        let records: Vec<TrademarkRecord> = table
            .select(&BODY_ROWS)
            .filter_map(|row| {
                let cells = row_cells(row);
                if cells.is_empty() {
                    None
                } else {
                    self.extract_row(&cells)
                }
            })
            .collect();

        debug!("Extracted {} records", records.len());
        Ok(records)
    }

    /// Build a record from a row's cells. Cells past the end of a short row
    /// read as empty.
    fn extract_row(&self, cells: &[ElementRef<'_>]) -> Option<TrademarkRecord> {
        let id = cell_text(*cells.get(ID_COLUMN)?);
        let image = cells
            .get(IMAGE_COLUMN)
            .and_then(|cell| cell.select(&IMAGE).next());
        let layout = ColumnLayout::for_row(image.is_some());

        let logo_url = image
            .and_then(|img| img.value().attr("src"))
            .filter(|src| !src.is_empty())
            .unwrap_or(NO_IMAGE_FOUND);

        let text_at = |index: usize| cells.get(index).map(|c| cell_text(*c)).unwrap_or_default();
        let class = clean_label(&text_at(layout.class));

        Some(TrademarkRecord::new(
            id,
            text_at(NUMBER_COLUMN),
            text_at(layout.name),
            logo_url,
            if class.is_empty() {
                ALL_CLASSES.to_string()
            } else {
                class
            },
            clean_label(&text_at(layout.status)),
            cells
                .get(NUMBER_COLUMN)
                .map(|cell| self.details_page_url(*cell))
                .unwrap_or_default(),
        ))
    }

    /// Detail link of the number cell, without its query string.
    fn details_page_url(&self, cell: ElementRef<'_>) -> String {
        let href = cell
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .unwrap_or_default();
        if href.is_empty() {
            return String::new();
        }

        let path = href.split('?').next().unwrap_or(href);
        resolve_url(&self.base_url, path)
    }
}

/// Keep only ASCII letters, digits and spaces, then trim.
pub fn clean_label(raw: &str) -> String {
    NON_LABEL_CHARS.replace_all(raw, "").trim().to_string()
}

/// Resolve a path to a full URL, handling both absolute and relative paths.
fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}{}", base_url, path)
    }
}

/// Direct `<td>` children of a row.
fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect()
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://search.ipaustralia.gov.au";

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <table id="resultsTable">
              <thead><tr><th>#</th><th></th><th>Number</th><th>Logo</th><th>Words</th><th>Class</th><th>Status</th></tr></thead>
              <tbody>{}</tbody>
            </table>
            </body></html>"#,
            rows
        )
    }

    const ROW_WITH_IMAGE: &str = r#"<tr>
        <td> 1 </td>
        <td><input type="checkbox"></td>
        <td><a href="/trademarks/details/12345?tab=info"> 12345 </a></td>
        <td><img src="https://cdn.example.com/logo/12345.png"></td>
        <td> Acme Pty Ltd </td>
        <td>Class 9 (Goods)</td>
        <td>Registered: Protected</td>
    </tr>"#;

    const ROW_WITHOUT_IMAGE: &str = r#"<tr>
        <td>2</td>
        <td></td>
        <td><a href="/trademarks/details/67890">67890</a></td>
        <td>Globex Corporation</td>
        <td>(35)</td>
        <td>Pending!</td>
    </tr>"#;

    #[test]
    fn test_row_with_image_reads_shifted_columns() {
        let records = HtmlExtractor::new(BASE).extract(&page(ROW_WITH_IMAGE));
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id(), "1");
        assert_eq!(record.number(), "12345");
        assert_eq!(record.logo_url(), "https://cdn.example.com/logo/12345.png");
        assert_eq!(record.name(), "Acme Pty Ltd");
        assert_eq!(record.class(), "Class 9 Goods");
        assert_eq!(record.status(), "Registered Protected");
        assert_eq!(
            record.details_page_url(),
            "https://search.ipaustralia.gov.au/trademarks/details/12345"
        );
    }

    #[test]
    fn test_row_without_image_reads_unshifted_columns() {
        let records = HtmlExtractor::new(BASE).extract(&page(ROW_WITHOUT_IMAGE));
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id(), "2");
        assert_eq!(record.number(), "67890");
        assert_eq!(record.logo_url(), NO_IMAGE_FOUND);
        assert!(!record.has_logo());
        assert_eq!(record.name(), "Globex Corporation");
        assert_eq!(record.class(), "35");
        assert_eq!(record.status(), "Pending");
    }

    #[test]
    fn test_mixed_rows_in_order() {
        let html = page(&format!("{}{}", ROW_WITH_IMAGE, ROW_WITHOUT_IMAGE));
        let records = HtmlExtractor::new(BASE).extract(&html);
        let names: Vec<&str> = records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Acme Pty Ltd", "Globex Corporation"]);
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(ColumnLayout::for_row(true), WITH_IMAGE);
        assert_eq!(ColumnLayout::for_row(false), WITHOUT_IMAGE);
        assert_eq!((WITH_IMAGE.name, WITH_IMAGE.class, WITH_IMAGE.status), (4, 5, 6));
        assert_eq!(
            (WITHOUT_IMAGE.name, WITHOUT_IMAGE.class, WITHOUT_IMAGE.status),
            (3, 4, 5)
        );
    }

    #[test]
    fn test_punctuation_only_class_becomes_all() {
        let row = r#"<tr><td>3</td><td></td><td>111</td><td>Initech</td><td> -- () </td><td>Lapsed</td></tr>"#;
        let records = HtmlExtractor::new(BASE).extract(&page(row));
        assert_eq!(records[0].class(), "All");
    }

    #[test]
    fn test_missing_anchor_gives_empty_details_url() {
        let row = r#"<tr><td>4</td><td></td><td>222</td><td>Hooli</td><td>42</td><td>Filed</td></tr>"#;
        let records = HtmlExtractor::new(BASE).extract(&page(row));
        assert_eq!(records[0].details_page_url(), "");
    }

    #[test]
    fn test_absolute_details_href_is_kept() {
        let row = r#"<tr><td>5</td><td></td><td><a href="https://other.example/view/5?x=1">5</a></td><td>Umbrella</td><td>1</td><td>Ok</td></tr>"#;
        let records = HtmlExtractor::new(BASE).extract(&page(row));
        assert_eq!(records[0].details_page_url(), "https://other.example/view/5");
    }

    #[test]
    fn test_image_without_src_uses_sentinel() {
        let row = r#"<tr><td>6</td><td></td><td>333</td><td><img alt="logo"></td><td>Stark</td><td>7</td><td>Ok</td></tr>"#;
        let records = HtmlExtractor::new(BASE).extract(&page(row));
        assert_eq!(records[0].logo_url(), NO_IMAGE_FOUND);
        assert_eq!(records[0].name(), "Stark");
    }

    #[test]
    fn test_empty_rows_are_skipped() {
        let rows = format!("<tr></tr>{}", ROW_WITHOUT_IMAGE);
        let records = HtmlExtractor::new(BASE).extract(&page(&rows));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "2");
    }

    #[test]
    fn test_image_row_missing_status_cell() {
        let row = r#"<tr>
            <td>8</td>
            <td></td>
            <td><a href="/trademarks/details/888">888</a></td>
            <td><img src="/logo/888.png"></td>
            <td>Wayne Enterprises</td>
            <td>Class 12</td>
        </tr>"#;
        let records = HtmlExtractor::new(BASE).extract(&page(row));
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id(), "8");
        assert_eq!(record.logo_url(), "/logo/888.png");
        assert_eq!(record.name(), "Wayne Enterprises");
        assert_eq!(record.class(), "Class 12");
        assert_eq!(record.status(), "");
    }

    #[test]
    fn test_truncated_row_reads_missing_cells_as_empty() {
        let row = r#"<tr><td>9</td><td></td></tr>"#;
        let records = HtmlExtractor::new(BASE).extract(&page(row));
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id(), "9");
        assert_eq!(record.number(), "");
        assert_eq!(record.name(), "");
        assert_eq!(record.logo_url(), NO_IMAGE_FOUND);
        assert_eq!(record.class(), "All");
        assert_eq!(record.status(), "");
        assert_eq!(record.details_page_url(), "");
    }

    #[test]
    fn test_src_is_kept_verbatim() {
        let row = r#"<tr><td>10</td><td></td><td>1</td><td><img src=" /logo/10.png "></td><td>A</td><td>1</td><td>Ok</td></tr>"#;
        let records = HtmlExtractor::new(BASE).extract(&page(row));
        assert_eq!(records[0].logo_url(), " /logo/10.png ");
    }

    #[test]
    fn test_missing_table() {
        let extractor = HtmlExtractor::new(BASE);
        let html = "<html><body><p>No results</p></body></html>";
        assert!(extractor.extract(html).is_empty());
        assert!(matches!(
            extractor.try_extract(html),
            Err(SearchError::Parse(_))
        ));
    }

    #[test]
    fn test_garbage_input() {
        assert!(HtmlExtractor::new(BASE).extract("<<<not html").is_empty());
        assert!(HtmlExtractor::new(BASE).extract("").is_empty());
    }

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label("Class 9 (Goods)"), "Class 9 Goods");
        assert_eq!(clean_label("  !!  "), "");
        assert_eq!(clean_label("Registered: Protected"), "Registered Protected");
    }
}
