use chrono::{DateTime, Utc};
use ozet_core::{
    BasicFinancials, Capability, CompanyInfo, DailyBar, Decimal, Metric, OzetError,
    PriceHistory, QuoteSnapshot, RealtimeQuote, Ticker,
};

use crate::Ozet;
use crate::core::tag_err;

impl Ozet {
    /// Compute price, volume and float metrics for a ticker.
    ///
    /// The primary history provider is always consulted. When any field is
    /// still `Unknown` afterwards, the secondary quote and fundamentals
    /// providers fill the gaps; fields the primary supplied are never replaced.
    ///
    /// # Errors
    /// Returns `PrimaryFetch` when the history or company-info call fails.
    /// Secondary failures are logged and leave the affected fields `Unknown`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "ozet::router", skip(self), fields(symbol = %ticker))
    )]
    pub async fn aggregate(&self, ticker: &Ticker) -> Result<QuoteSnapshot, OzetError> {
        let primary = self.primary_metrics(ticker).await?;
        if primary.is_complete() {
            return Ok(primary);
        }
        Ok(match self.secondary_metrics(ticker).await {
            Some(secondary) => primary.merge_missing(secondary),
            None => primary,
        })
    }

    async fn primary_metrics(&self, ticker: &Ticker) -> Result<QuoteSnapshot, OzetError> {
        let Some((name, svc)) = self.first_capable(|c| c.as_market_history_service()) else {
            return Err(OzetError::primary(OzetError::unsupported(
                Capability::History.as_str(),
            )));
        };
        let timeout = self.cfg.provider_timeout;

        let history = Self::provider_call_with_timeout(
            name,
            Capability::History.as_str(),
            timeout,
            svc.history(ticker, self.cfg.history_lookback_days),
        )
        .await
        .map_err(|e| OzetError::primary(tag_err(name, e)))?;
        if history.is_empty() {
            return Ok(QuoteSnapshot::unknown());
        }

        let info = Self::provider_call_with_timeout(
            name,
            Capability::CompanyInfo.as_str(),
            timeout,
            svc.company_info(ticker),
        )
        .await
        .map_err(|e| OzetError::primary(tag_err(name, e)))?;

        Ok(primary_snapshot(
            &history,
            &info,
            self.clock.now(),
            self.cfg.volume_average_window,
        ))
    }

    async fn secondary_metrics(&self, ticker: &Ticker) -> Option<QuoteSnapshot> {
        let (quote_name, quotes) = self.first_capable(|c| c.as_realtime_quote_service())?;
        let (fin_name, fundamentals) = self.first_capable(|c| c.as_fundamentals_service())?;
        let timeout = self.cfg.provider_timeout;

        let fetched = async {
            let quote = Self::provider_call_with_timeout(
                quote_name,
                Capability::Quote.as_str(),
                timeout,
                quotes.quote(ticker),
            )
            .await
            .map_err(|e| tag_err(quote_name, e))?;
            let financials = Self::provider_call_with_timeout(
                fin_name,
                Capability::BasicFinancials.as_str(),
                timeout,
                fundamentals.basic_financials(ticker),
            )
            .await
            .map_err(|e| tag_err(fin_name, e))?;
            Ok::<_, OzetError>((quote, financials))
        }
        .await;

        match fetched {
            Ok((q, f)) => Some(secondary_snapshot(&q, &f)),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "ozet::router", symbol = %ticker, error = %_e, "secondary metrics unavailable");
                None
            }
        }
    }
}

/// Derive a snapshot from primary history and company info.
///
/// The market counts as open when the last bar is dated "today" in the
/// exchange timezone. While open, the change is last vs previous close;
/// otherwise it is the previous close vs the one before it.
pub(crate) fn primary_snapshot(
    history: &PriceHistory,
    info: &CompanyInfo,
    now: DateTime<Utc>,
    volume_window: usize,
) -> QuoteSnapshot {
    let bars = &history.bars;
    let Some(last) = bars.last() else {
        return QuoteSnapshot::unknown();
    };

    let today = history
        .timezone
        .map_or_else(|| now.date_naive(), |tz| now.with_timezone(&tz).date_naive());
    let market_open = last.date == today;

    let n = bars.len();
    let (price_change, price_change_pct) = if market_open && n >= 2 {
        change_between(bars[n - 2].close, bars[n - 1].close)
    } else if !market_open && n >= 3 {
        change_between(bars[n - 3].close, bars[n - 2].close)
    } else {
        (Metric::Unknown, Metric::Unknown)
    };

    let volume = last.volume.unwrap_or(0);
    let avg_volume_30d = trailing_average_volume(bars, volume_window);
    let volume_ratio = avg_volume_30d
        .filter(|avg| *avg > 0)
        .and_then(|avg| ratio_of(volume, avg));

    QuoteSnapshot {
        price_change,
        price_change_pct,
        volume: Metric::Known(volume),
        avg_volume_30d,
        volume_ratio,
        float_pct: float_percentage(info.float_shares, info.shares_outstanding),
        shares_outstanding: info.shares_outstanding,
        float_shares: info.float_shares,
    }
}

/// Derive a snapshot from the secondary quote and fundamentals.
pub(crate) fn secondary_snapshot(quote: &RealtimeQuote, fin: &BasicFinancials) -> QuoteSnapshot {
    let price_change: Metric<Decimal> = match (quote.current_price, quote.previous_close) {
        (Metric::Known(c), Metric::Known(pc)) => c.checked_sub(pc).into(),
        _ => Metric::Unknown,
    };
    let price_change_pct = match (price_change, quote.previous_close) {
        (Metric::Known(ch), Metric::Known(pc)) => percent_of(ch, pc),
        _ => Metric::Unknown,
    };

    let avg_volume_30d = fin
        .avg_volume_10d
        .filter(|v| *v != 0)
        .or(fin.avg_volume_52w.filter(|v| *v != 0));
    let volume_ratio = match (quote.volume, avg_volume_30d) {
        (Metric::Known(v), Metric::Known(avg)) if avg > 0 => ratio_of(v, avg),
        _ => Metric::Unknown,
    };

    QuoteSnapshot {
        price_change,
        price_change_pct,
        volume: quote.volume,
        avg_volume_30d,
        volume_ratio,
        float_pct: float_percentage(fin.float_shares, fin.shares_outstanding),
        shares_outstanding: fin.shares_outstanding,
        float_shares: fin.float_shares,
    }
}

fn change_between(reference: Decimal, latest: Decimal) -> (Metric<Decimal>, Metric<Decimal>) {
    match latest.checked_sub(reference) {
        Some(change) => (Metric::Known(change), percent_of(change, reference)),
        None => (Metric::Unknown, Metric::Unknown),
    }
}

/// `change / reference * 100`; `Unknown` for a zero reference.
fn percent_of(change: Decimal, reference: Decimal) -> Metric<Decimal> {
    if reference.is_zero() {
        return Metric::Unknown;
    }
    change
        .checked_div(reference)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .into()
}

/// Truncated mean of the last `window` non-missing volumes.
fn trailing_average_volume(bars: &[DailyBar], window: usize) -> Metric<u64> {
    let volumes: Vec<u64> = bars.iter().filter_map(|b| b.volume).collect();
    let tail = &volumes[volumes.len().saturating_sub(window)..];
    if tail.is_empty() {
        return Metric::Unknown;
    }
    let sum: u128 = tail.iter().map(|v| u128::from(*v)).sum();
    u64::try_from(sum / tail.len() as u128).ok().into()
}

fn ratio_of(volume: u64, avg: u64) -> Metric<Decimal> {
    Decimal::from(volume)
        .checked_div(Decimal::from(avg))
        .map(|r| r.round_dp(2))
        .into()
}

fn float_percentage(float_shares: Metric<u64>, outstanding: Metric<u64>) -> Metric<Decimal> {
    match (float_shares, outstanding) {
        (Metric::Known(f), Metric::Known(o)) if f != 0 && o != 0 => Decimal::from(f)
            .checked_div(Decimal::from(o))
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .into(),
        _ => Metric::Unknown,
    }
}
