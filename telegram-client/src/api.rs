use chanscan_core::{ChannelError, ChannelInfo, ChannelRef, Message};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Page size requested from the gateway for message and reply listings.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Remote collaborator boundary. The walker and orchestrator only talk to
/// this trait, so tests can substitute a fake gateway.
#[allow(async_fn_in_trait)]
pub trait ChannelApi {
    /// Resolves a configured channel reference to its gateway identity.
    async fn resolve_channel(&self, channel: &ChannelRef) -> Result<ChannelInfo, ChannelError>;

    /// One page of channel messages, newest first. `before_id` is the
    /// pagination cursor: only messages with a smaller id are returned.
    async fn channel_messages(
        &self,
        channel: &ChannelInfo,
        before_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Message>, ChannelError>;

    /// One page of direct replies to `parent_id`, newest first.
    async fn message_replies(
        &self,
        channel: &ChannelInfo,
        parent_id: i64,
        before_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Message>, ChannelError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayChannel {
    pub id: i64,
    pub title: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayMessage {
    pub id: i64,
    #[serde(default)]
    pub text: String,
    pub author: Option<String>,
    /// Unix seconds, UTC.
    pub date: i64,
    pub reply_to_msg_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagePage {
    pub messages: Vec<GatewayMessage>,
}

impl From<GatewayChannel> for ChannelInfo {
    fn from(channel: GatewayChannel) -> Self {
        Self {
            id: channel.id,
            title: channel.title,
            handle: channel.username,
        }
    }
}

impl From<GatewayMessage> for Message {
    fn from(msg: GatewayMessage) -> Self {
        Self {
            id: msg.id,
            author: msg.author.unwrap_or_else(|| "unknown".to_string()),
            text: msg.text,
            created_at: DateTime::<Utc>::from_timestamp(msg.date, 0).unwrap_or_default(),
            parent_id: msg.reply_to_msg_id,
        }
    }
}

/// HTTP implementation of [`ChannelApi`] against an authenticated JSON
/// gateway (configured base URL + bearer token).
#[derive(Debug)]
pub struct HttpChannelApi {
    http_client: Client,
    base_url: String,
    access_token: String,
}

impl HttpChannelApi {
    pub fn new(base_url: String, access_token: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        channel_label: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ChannelError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Gateway request: GET {}", path);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for GET {}: {}", path, e);
                ChannelError::Transient {
                    channel: channel_label.to_string(),
                    reason: if e.is_timeout() {
                        "request timeout".to_string()
                    } else {
                        format!("network error: {e}")
                    },
                    retry_after: None,
                }
            })?;

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, path);
            return response.json::<T>().await.map_err(|e| {
                error!("Failed to parse gateway response for {}: {}", path, e);
                ChannelError::InvalidResponse {
                    channel: channel_label.to_string(),
                    details: format!("malformed response body: {e}"),
                }
            });
        }

        error!("Request failed with status: {} for {}", status, path);
        match status.as_u16() {
            401 | 403 => Err(ChannelError::Unreachable {
                channel: channel_label.to_string(),
                reason: "access denied".to_string(),
            }),
            404 => Err(ChannelError::Unreachable {
                channel: channel_label.to_string(),
                reason: "not found".to_string(),
            }),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok());
                warn!(
                    "Rate limited on {}, retry after {:?} seconds",
                    path, retry_after
                );
                Err(ChannelError::Transient {
                    channel: channel_label.to_string(),
                    reason: "rate limited".to_string(),
                    retry_after,
                })
            }
            code if status.is_server_error() => Err(ChannelError::Transient {
                channel: channel_label.to_string(),
                reason: format!("server error: {code}"),
                retry_after: None,
            }),
            code => Err(ChannelError::InvalidResponse {
                channel: channel_label.to_string(),
                details: format!("unexpected status: {code}"),
            }),
        }
    }
}

impl ChannelApi for HttpChannelApi {
    async fn resolve_channel(&self, channel: &ChannelRef) -> Result<ChannelInfo, ChannelError> {
        let path = match channel {
            ChannelRef::Handle(handle) => format!("/channels/{handle}"),
            ChannelRef::Id(id) => format!("/channels/{id}"),
        };
        let resolved: GatewayChannel = self.get_json(&channel.to_string(), &path, &[]).await?;
        info!("Resolved channel {} to '{}'", channel, resolved.title);
        Ok(resolved.into())
    }

    async fn channel_messages(
        &self,
        channel: &ChannelInfo,
        before_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Message>, ChannelError> {
        let path = format!("/channels/{}/messages", channel.id);
        let mut query = vec![("limit", limit.to_string())];
        if let Some(before) = before_id {
            query.push(("before_id", before.to_string()));
        }
        let page: MessagePage = self.get_json(&channel.display_name(), &path, &query).await?;
        debug!(
            "Fetched {} messages from {} (before_id={:?})",
            page.messages.len(),
            channel.display_name(),
            before_id
        );
        Ok(page.messages.into_iter().map(Message::from).collect())
    }

    async fn message_replies(
        &self,
        channel: &ChannelInfo,
        parent_id: i64,
        before_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Message>, ChannelError> {
        let path = format!("/channels/{}/messages/{}/replies", channel.id, parent_id);
        let mut query = vec![("limit", limit.to_string())];
        if let Some(before) = before_id {
            query.push(("before_id", before.to_string()));
        }
        let page: MessagePage = self.get_json(&channel.display_name(), &path, &query).await?;
        Ok(page.messages.into_iter().map(Message::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_message_conversion() {
        let raw = GatewayMessage {
            id: 17,
            text: "hello".to_string(),
            author: Some("alice".to_string()),
            date: 1710504000, // 2024-03-15T12:00:00Z
            reply_to_msg_id: None,
        };
        let msg: Message = raw.into();
        assert_eq!(msg.id, 17);
        assert!(msg.is_top_level());
        assert_eq!(msg.created_at.timestamp(), 1710504000);
    }

    #[test]
    fn test_missing_author_gets_placeholder() {
        let raw = GatewayMessage {
            id: 1,
            text: String::new(),
            author: None,
            date: 0,
            reply_to_msg_id: Some(9),
        };
        let msg: Message = raw.into();
        assert_eq!(msg.author, "unknown");
        assert!(!msg.is_top_level());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpChannelApi::new("https://gw.example/".to_string(), "token".to_string());
        assert_eq!(api.base_url, "https://gw.example");
    }
}
