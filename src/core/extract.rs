use crate::domain::model::RawRow;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use scraper::{Html, Selector};

/// Pulls `(name, hex)` candidates out of one page of markup.
///
/// Every row of every wiki-style data table is considered; rows without at
/// least two data cells or without a `#RRGGBB` token in the second cell are
/// skipped silently. Header rows use `<th>` cells and fall out of the
/// two-data-cell check on their own.
pub struct RowExtractor {
    row_selector: Selector,
    cell_selector: Selector,
    hex_pattern: Regex,
}

impl RowExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            row_selector: parse_selector("table.wikitable tr")?,
            cell_selector: parse_selector("td")?,
            hex_pattern: Regex::new(r"#([0-9A-Fa-f]{6})")?,
        })
    }

    pub fn rows(&self, markup: &str) -> Vec<RawRow> {
        let document = Html::parse_document(markup);
        let mut out = Vec::new();

        for row in document.select(&self.row_selector) {
            let cells: Vec<_> = row.select(&self.cell_selector).collect();
            if cells.len() < 2 {
                continue;
            }

            let name = cells[0].text().collect::<String>().trim().to_string();
            let color_text = cells[1].text().collect::<String>();

            let Some(caps) = self.hex_pattern.captures(&color_text) else {
                tracing::trace!("No hex token in row {:?}", name);
                continue;
            };
            let hex = format!("#{}", caps[1].to_ascii_uppercase());

            out.push(RawRow { name, hex });
        }

        out
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        message: e.to_string(),
    })
}
