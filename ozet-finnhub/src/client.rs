use std::time::Duration;

use ozet_core::OzetError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::ErrorResponse;
use crate::CONNECTOR;

/// Thin authenticated GET client.
#[derive(Clone)]
pub(crate) struct FinnhubClient {
    http: Client,
    base: Url,
    api_key: String,
}

impl FinnhubClient {
    pub(crate) fn new(api_key: String, base: Url) -> Result<Self, OzetError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| OzetError::connector(CONNECTOR, e.to_string()))?;
        Ok(Self { http, base, api_key })
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        context: &str,
    ) -> Result<T, OzetError> {
        let url = self
            .base
            .join(endpoint)
            .map_err(|e| OzetError::InvalidArg(format!("bad endpoint {endpoint}: {e}")))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "ozet::finnhub", endpoint, params = params.len(), "finnhub request");

        let response = self
            .http
            .get(url)
            .header("X-Finnhub-Token", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| OzetError::connector(CONNECTOR, format!("request failed: {e}")))?;

        let status = response.status();
        // 403 is what Finnhub sends once the plan quota is used up.
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
            return Err(OzetError::connector(CONNECTOR, format!("rate limit: {context}")));
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(OzetError::connector(CONNECTOR, "invalid or missing API key"));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(OzetError::not_found(context.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(ErrorResponse { error: Some(msg) }) = serde_json::from_str(&body) {
                return Err(OzetError::connector(CONNECTOR, msg));
            }
            return Err(OzetError::connector(CONNECTOR, format!("HTTP {status}: {context}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| OzetError::Data(format!("{context}: {e}")))
    }
}
