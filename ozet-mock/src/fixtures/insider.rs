use chrono::NaiveDate;
use ozet_core::{InsiderTransaction, Metric, OwnershipRecord};

pub fn transactions_by_symbol(s: &str) -> Vec<InsiderTransaction> {
    let tx = |name: &str, change: i64, (y, m, d): (i32, u32, u32)| InsiderTransaction {
        name: name.to_string(),
        share_change: Some(change),
        transaction_date: NaiveDate::from_ymd_opt(y, m, d),
    };
    match s {
        "ABCD" => vec![
            tx("Jane Roe", -2_500, (2024, 2, 20)),
            tx("John Doe", 1_000, (2024, 2, 12)),
        ],
        "AAPL" => vec![
            tx("Timothy Cook", -196_410, (2024, 2, 1)),
            tx("Jeffrey Williams", -88_000, (2024, 1, 28)),
            tx("Luca Maestri", -53_000, (2024, 1, 15)),
        ],
        _ => Vec::new(),
    }
}

pub fn ownership_by_symbol(s: &str) -> Vec<OwnershipRecord> {
    let rec = |holder: &str, pct: &str| OwnershipRecord {
        holder: holder.to_string(),
        percent: pct.parse().ok().into(),
    };
    match s {
        "ABCD" => vec![rec("Insiders", "12.5")],
        "AAPL" => vec![rec("Insiders", "0.07"), rec("Vanguard Group", "8.3")],
        // Known holder without a percentage: forces the page scrape.
        "MSFT" => vec![OwnershipRecord {
            holder: "Insiders".to_string(),
            percent: Metric::Unknown,
        }],
        _ => Vec::new(),
    }
}

pub fn quote_page_by_symbol(s: &str) -> Option<String> {
    let (own, trans) = match s {
        "MSFT" => ("1.45%", "-0.83%"),
        "ABCD" => ("12.50%", "3.10%"),
        "AAPL" => ("0.07%", "-1.92%"),
        _ => return None,
    };
    Some(format!(
        r#"<html><body>
<table class="snapshot-table2">
  <tr><td>Index</td><td>S&amp;P 500</td><td>P/E</td><td>31.2</td></tr>
  <tr><td>Insider Own</td><td><b>{own}</b></td></tr>
  <tr><td>Insider Trans</td><td><b>{trans}</b></td></tr>
  <tr><td>Shs Float</td><td>7.42B</td></tr>
</table>
</body></html>"#
    ))
}
