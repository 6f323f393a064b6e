use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::FetchError;

pub const IP_ECHO_URL: &str = "https://api.ipify.org";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Looks up the public IP address of the host machine.
#[async_trait]
pub trait PublicIpFetcher: Send + Sync {
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// Queries an HTTP IP-echo service. The response body is returned verbatim;
/// the service's word is taken for what the address looks like.
pub struct IpifyFetcher {
    client: reqwest::Client,
    url: String,
}

impl IpifyFetcher {
    pub fn new() -> Self {
        Self::with_url(IP_ECHO_URL.to_string())
    }

    pub fn with_url(url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
            url,
        }
    }
}

impl Default for IpifyFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublicIpFetcher for IpifyFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        info!("Response from `{}`: `{}`.", self.url, body);
        Ok(body)
    }
}
