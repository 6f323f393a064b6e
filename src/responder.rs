use std::sync::Arc;

use tracing::{error, info, warn};

use crate::app::AppState;

pub const UNAUTHORIZED_REPLY: &str = "You are not authorized to interact with this bot.";
pub const FETCH_FAILED_REPLY: &str = "Failed to obtain IP address.";

/// What kind of content an inbound message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Other,
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Other => "other",
        }
    }
}

/// What kind of chat an inbound message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatType {
    Private,
    Group,
    Channel,
}

impl ChatType {
    fn as_str(self) -> &'static str {
        match self {
            ChatType::Private => "private",
            ChatType::Group => "group",
            ChatType::Channel => "channel",
        }
    }
}

/// One inbound chat message, validated at the transport boundary. Consumed
/// once and dropped.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub sender_username: String,
    pub content_type: ContentType,
    pub chat_type: ChatType,
    pub text: Option<String>,
}

/// Answers on-demand IP requests from the single authorized operator and
/// turns everyone else away.
pub struct Responder {
    state: Arc<AppState>,
}

impl Responder {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// The message must be plain text, in a private chat, from the admin
    /// username, in the admin chat. Anything else is unauthorized.
    fn is_authorized(&self, msg: &InboundMessage) -> bool {
        msg.content_type == ContentType::Text
            && msg.chat_type == ChatType::Private
            && msg.sender_username == self.state.config.admin_username
            && msg.chat_id == self.state.config.admin_chat_id
    }

    /// Handles one inbound message. Replies are best-effort; delivery
    /// failures are logged by the sender and the listener keeps running.
    pub async fn handle(&self, msg: InboundMessage) {
        info!(
            "Received `{} {}` message from `{}` (chat_id: `{}`): `{}`.",
            msg.chat_type.as_str(),
            msg.content_type.as_str(),
            msg.sender_username,
            msg.chat_id,
            msg.text.as_deref().unwrap_or("")
        );

        if !self.is_authorized(&msg) {
            warn!(
                "Received message from unauthorized user: `{}` (chat_id: `{}`).",
                msg.sender_username, msg.chat_id
            );
            self.state
                .sender
                .send(msg.chat_id, UNAUTHORIZED_REPLY)
                .await
                .ok();
            return;
        }

        // Always a fresh lookup; the poller's last known value is never
        // reused here.
        let reply = match self.state.fetcher.fetch().await {
            Ok(ip) => format!("IP: `{ip}`."),
            Err(e) => {
                error!("Failed to obtain IP address: {e}");
                FETCH_FAILED_REPLY.to_string()
            }
        };

        self.state.sender.send(msg.chat_id, &reply).await.ok();
    }
}
