use std::sync::Arc;

use ozet::respond::Responder;
use ozet::Ozet;
use ozet_bot::config::{BotConfig, load_tickers};
use ozet_bot::telegram::{TelegramClient, run_polling};
use ozet_finnhub::FinnhubConnector;
use ozet_finviz::FinvizConnector;
use ozet_yahoo::YahooConnector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = BotConfig::from_env()?;

    // RUST_LOG=info,ozet=debug for per-provider detail.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let tickers = load_tickers(&cfg.tickers_path)?;
    tracing::info!(count = tickers.len(), path = %cfg.tickers_path.display(), "tickers loaded");

    // Registration order is priority order per role.
    let ozet = Ozet::builder()
        .with_connector(Arc::new(YahooConnector::new_default()?))
        .with_connector(Arc::new(FinnhubConnector::new(cfg.finnhub_api_key.clone())?))
        .with_connector(Arc::new(FinvizConnector::new_default()?))
        .build()?;

    let responder = Arc::new(Responder::new(Arc::new(ozet), Arc::new(tickers)));
    let client = TelegramClient::new(&cfg.telegram_token)?;
    run_polling(client, responder).await;
    Ok(())
}
