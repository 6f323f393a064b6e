use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::{error, info, warn};

use crate::app::MessageSender;
use crate::error::{HandlerError, SendError};
use crate::responder::{ChatType, ContentType, InboundMessage, Responder};

/// Sends messages through the Telegram Bot API. One attempt per call; the
/// outcome is logged either way.
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), SendError> {
        match self.bot.send_message(ChatId(chat_id), text).await {
            Ok(_) => {
                info!("Sent message: `{text}` to chat ID: `{chat_id}`.");
                Ok(())
            }
            Err(e) => {
                error!("Failed to send message to chat ID `{chat_id}`: {e}");
                Err(SendError::Telegram(e))
            }
        }
    }
}

/// Validates a raw Telegram message into an [`InboundMessage`]. Messages
/// without a sender or a sender username carry no identity to authorize
/// against and are rejected.
fn to_inbound(msg: &Message) -> Result<InboundMessage, HandlerError> {
    let sender = msg.from.as_ref().ok_or(HandlerError::MissingSender)?;
    let sender_username = sender
        .username
        .clone()
        .ok_or(HandlerError::MissingUsername)?;

    let chat_type = if msg.chat.is_private() {
        ChatType::Private
    } else if msg.chat.is_channel() {
        ChatType::Channel
    } else {
        ChatType::Group
    };

    let text = msg.text().map(str::to_string);
    let content_type = if text.is_some() {
        ContentType::Text
    } else {
        ContentType::Other
    };

    Ok(InboundMessage {
        chat_id: msg.chat.id.0,
        sender_username,
        content_type,
        chat_type,
        text,
    })
}

/// Run the Telegram listener until the process is terminated.
pub async fn run(bot: Bot, responder: Responder) -> Result<()> {
    info!("Starting Telegram listener...");

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![Arc::new(responder)])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(msg: Message, responder: Arc<Responder>) -> ResponseResult<()> {
    match to_inbound(&msg) {
        Ok(inbound) => responder.handle(inbound).await,
        Err(e) => warn!("Dropping message in chat `{}`: {e}", msg.chat.id),
    }
    Ok(())
}
