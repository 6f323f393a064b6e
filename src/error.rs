use thiserror::Error;

/// Fatal configuration problems. Reported once at startup; the process
/// exits with code 1 instead of running without a valid config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to write configuration template: {0}")]
    Write(#[source] std::io::Error),
}

/// The public IP lookup failed. Recovered: retried implicitly on the next
/// poll tick or the next user request.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
}

/// An outbound message could not be delivered. At most one attempt is made
/// per call; the poller reacts by leaving `last_ip` unchanged.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("{0}")]
    Other(String),
}

/// An inbound message failed validation at the transport boundary.
/// Recovered: the message is logged and dropped, the listener keeps going.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("message has no sender")]
    MissingSender,

    #[error("sender has no username")]
    MissingUsername,
}
