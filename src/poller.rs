use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::app::AppState;

/// Periodically checks the public IP of the host machine and announces
/// changes to the admin chat.
pub struct IpPoller {
    state: Arc<AppState>,
    interval: Duration,
    last_ip: Option<String>,
}

impl IpPoller {
    pub fn new(state: Arc<AppState>, interval: Duration) -> Self {
        Self {
            state,
            interval,
            last_ip: None,
        }
    }

    /// Runs one check. `last_ip` only advances when the change notification
    /// was delivered, so an undelivered change is re-announced on the next
    /// tick.
    async fn tick(&mut self) {
        let current_ip = match self.state.fetcher.fetch().await {
            Ok(ip) => ip,
            Err(e) => {
                error!("Failed to update IP address: {e}");
                return;
            }
        };

        if self.last_ip.as_deref() == Some(current_ip.as_str()) {
            return;
        }

        let message = format!("New public IP address detected: `{current_ip}`.");
        info!("{message}");

        if self
            .state
            .sender
            .send(self.state.config.admin_chat_id, &message)
            .await
            .is_ok()
        {
            self.last_ip = Some(current_ip);
        }
    }

    /// Checks forever. The sleep starts after the tick finishes, so a slow
    /// fetch delays the next tick by its own duration.
    pub async fn run(mut self) {
        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }
}
