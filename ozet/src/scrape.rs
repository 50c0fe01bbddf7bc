//! Extraction of insider facts from a rendered quote page.

use ozet_core::{InsiderSummary, Metric};
use scraper::{Html, Selector};

const OWNERSHIP_LABEL: &str = "Insider Own";
const ACTIVITY_LABEL: &str = "Insider Trans";

/// Scan every two-cell table row for the insider ownership and transaction
/// labels and take the adjacent cell's trimmed text.
///
/// Rows with any other cell count are ignored. A label that never appears,
/// or whose value cell is blank, stays `Unknown`. When a label occurs more
/// than once the last occurrence wins.
#[must_use]
pub fn parse_insider_facts(html: &str) -> InsiderSummary {
    let document = Html::parse_document(html);
    let mut out = InsiderSummary::unknown();

    if let Ok(tr_selector) = Selector::parse("tr") {
        if let Ok(td_selector) = Selector::parse("td") {
            for row in document.select(&tr_selector) {
                let cells: Vec<_> = row.select(&td_selector).collect();
                let [label, value] = cells.as_slice() else {
                    continue;
                };
                let label: String = label.text().collect();
                let value = value.text().collect::<String>().trim().to_string();
                let value = if value.is_empty() {
                    Metric::Unknown
                } else {
                    Metric::Known(value)
                };

                if label.contains(OWNERSHIP_LABEL) {
                    out.ownership_pct = value.clone();
                }
                if label.contains(ACTIVITY_LABEL) {
                    out.recent_activity = value;
                }
            }
        }
    }

    out
}
