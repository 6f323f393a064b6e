use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::SendError;
use crate::ip::PublicIpFetcher;

/// Delivers one outbound chat message. At most one attempt per call; no
/// retry, no queueing. Implementations must be safe to call concurrently
/// from the poller and the responder.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), SendError>;
}

/// Shared application state: the loaded configuration plus the injected
/// fetcher and sender. Built once in main and handed to both activities.
pub struct AppState {
    pub config: Config,
    pub fetcher: Arc<dyn PublicIpFetcher>,
    pub sender: Arc<dyn MessageSender>,
}

impl AppState {
    pub fn new(
        config: Config,
        fetcher: Arc<dyn PublicIpFetcher>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            config,
            fetcher,
            sender,
        }
    }
}
