mod app;
mod config;
mod error;
mod ip;
mod logging;
mod poller;
mod responder;
mod telegram;

#[cfg(test)]
mod doubles;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use teloxide::Bot;
use tracing::{error, info};

use crate::app::AppState;
use crate::config::Bootstrap;
use crate::error::ConfigError;
use crate::ip::IpifyFetcher;
use crate::poller::IpPoller;
use crate::responder::Responder;
use crate::telegram::TelegramSender;

const CONFIG_FILE: &str = "configuration.json";
const LOG_FILE: &str = "ipbot.log";
const POLL_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = logging::init(LOG_FILE) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    let config = match config::bootstrap(&config_path) {
        Ok(Bootstrap::Loaded(config)) => config,
        Ok(Bootstrap::TemplateWritten) => {
            println!("Please edit the configuration file and re-run this program.");
            return ExitCode::SUCCESS;
        }
        Err(e @ ConfigError::Write(_)) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("Failed to read JSON configuration: {e}");
            println!(
                "Either repair the existing JSON configuration, \
                 or delete it and re-run this program."
            );
            return ExitCode::FAILURE;
        }
    };

    info!("Successfully read JSON configuration.");

    let bot = Bot::new(&config.bot_token);
    let state = Arc::new(AppState::new(
        config,
        Arc::new(IpifyFetcher::new()),
        Arc::new(TelegramSender::new(bot.clone())),
    ));

    let responder = Responder::new(state.clone());
    tokio::spawn(async move {
        if let Err(e) = telegram::run(bot, responder).await {
            error!("Telegram listener terminated: {e}");
        }
    });
    info!("Telegram bot started and is listening for messages.");

    IpPoller::new(state, POLL_INTERVAL).run().await;

    ExitCode::SUCCESS
}
