//! Print reports for the fixture tickers without touching the network.
//!
//! Run with: `cargo run -p ozet --example mock_report`

use std::sync::Arc;

use ozet::{Ozet, Ticker};
use ozet_mock::MockConnector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ozet = Ozet::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()?;

    for sym in ["ABCD", "AAPL", "MSFT", "EMPTY"] {
        let report = ozet.report(&Ticker::parse(sym)?).await?;
        println!("{report}\n");
    }
    Ok(())
}
