//! Hand-rolled test doubles for the fetcher and sender seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::MessageSender;
use crate::error::{FetchError, SendError};
use crate::ip::PublicIpFetcher;

/// Replays a fixed sequence of fetch outcomes. `None` entries fail the way
/// a bad-status response from the echo service would.
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Option<&'static str>>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Option<&'static str>>,
    {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublicIpFetcher for ScriptedFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(Some(ip)) => Ok(ip.to_string()),
            Some(None) => Err(FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)),
            None => panic!("fetcher called more times than scripted"),
        }
    }
}

/// Records every delivered message and can be switched into a failing mode
/// where sends error without being recorded.
pub struct RecordingSender {
    sent: Mutex<Vec<(i64, String)>>,
    failing: AtomicBool,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let sender = Self::new();
        sender.set_failing(true);
        sender
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), SendError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SendError::Other("scripted send failure".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}
