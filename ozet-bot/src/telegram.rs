//! Minimal Telegram Bot API client with long polling.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ozet::OzetError;
use ozet::respond::{ReplySink, Responder};
use serde::Deserialize;
use url::Url;

const CONNECTOR: &str = "telegram";

/// Public Bot API root.
pub const API_ROOT: &str = "https://api.telegram.org/";

/// Server-side long-poll wait, in seconds.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Pause after a failed poll before trying again.
const RETRY_PAUSE: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// One inbound update; only text messages are read.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update id used as the polling offset.
    pub update_id: i64,
    /// Message payload, absent for other update kinds.
    pub message: Option<Message>,
}

/// Inbound message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Originating chat.
    pub chat: Chat,
    /// Text body, absent for stickers, photos and the like.
    pub text: Option<String>,
}

/// Chat reference.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Chat {
    /// Chat id replies are addressed to.
    pub id: i64,
}

/// Bot API client bound to one bot token.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base: Url,
}

impl TelegramClient {
    /// Client against the public Bot API.
    ///
    /// # Errors
    /// Returns `OzetError::Config` for a token that cannot form a URL.
    pub fn new(token: &str) -> Result<Self, OzetError> {
        let root = Url::parse(API_ROOT).map_err(|e| OzetError::Config(e.to_string()))?;
        Self::with_api_root(&root, token)
    }

    /// Client against a custom API root (local mocks).
    ///
    /// # Errors
    /// Returns `OzetError::Config` for a token that cannot form a URL.
    pub fn with_api_root(root: &Url, token: &str) -> Result<Self, OzetError> {
        let base = root
            .join(&format!("bot{token}/"))
            .map_err(|e| OzetError::Config(format!("bad bot token: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<T, OzetError> {
        let url = self
            .base
            .join(method)
            .map_err(|e| OzetError::InvalidArg(e.to_string()))?;
        let resp: ApiResponse<T> = self
            .http
            .post(url)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| OzetError::connector(CONNECTOR, format!("{method}: {e}")))?
            .json()
            .await
            .map_err(|e| OzetError::Data(format!("{method}: {e}")))?;
        if !resp.ok {
            return Err(OzetError::connector(
                CONNECTOR,
                format!("{method}: {}", resp.description.unwrap_or_default()),
            ));
        }
        resp.result
            .ok_or_else(|| OzetError::Data(format!("{method}: missing result")))
    }

    /// Long-poll for updates after `offset`.
    ///
    /// # Errors
    /// Transport and API errors.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, OzetError> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": POLL_TIMEOUT_SECS,
            "allowed_updates": ["message"],
        });
        self.call(
            "getUpdates",
            &body,
            Duration::from_secs(POLL_TIMEOUT_SECS + 5),
        )
        .await
    }

    /// Send plain text to a chat.
    ///
    /// # Errors
    /// Transport and API errors.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), OzetError> {
        let body = serde_json::json!({ "chat_id": chat_id, "text": text });
        let _: serde_json::Value = self
            .call("sendMessage", &body, Duration::from_secs(30))
            .await?;
        Ok(())
    }
}

/// Replies to one chat through the Bot API.
pub struct ChatSink {
    client: TelegramClient,
    chat_id: i64,
}

impl ChatSink {
    /// Sink addressing `chat_id`.
    #[must_use]
    pub const fn new(client: TelegramClient, chat_id: i64) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl ReplySink for ChatSink {
    async fn send(&mut self, text: &str) -> Result<(), OzetError> {
        self.client.send_message(self.chat_id, text).await
    }
}

/// Next polling offset after a batch, or `current` if the batch is empty.
#[must_use]
pub fn next_offset(current: i64, updates: &[Update]) -> i64 {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .map_or(current, |n| n.max(current))
}

/// Poll forever, handling each text message on its own task.
///
/// Replies within one message keep their order. Poll failures are logged
/// and retried after a pause.
pub async fn run_polling(client: TelegramClient, responder: Arc<Responder>) {
    tracing::info!("telegram polling started");
    let mut offset = 0;
    loop {
        let updates = match client.get_updates(offset).await {
            Ok(u) => u,
            Err(e) => {
                tracing::error!(error = %e, "polling failed");
                tokio::time::sleep(RETRY_PAUSE).await;
                continue;
            }
        };
        offset = next_offset(offset, &updates);

        for update in updates {
            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text else {
                continue;
            };
            let chat_id = message.chat.id;
            let responder = Arc::clone(&responder);
            let mut sink = ChatSink::new(client.clone(), chat_id);
            tokio::spawn(async move {
                tracing::debug!(chat_id, text = %text, "message received");
                if let Err(e) = responder.handle(&text, &mut sink).await {
                    tracing::error!(chat_id, error = %e, "reply failed");
                }
            });
        }
    }
}
