use std::net::IpAddr;
use std::time::Duration;

use ladle_core::error::AppError;
use ladle_core::traits::Fetcher;
use reqwest::Client;
use url::Url;

const USER_AGENT: &str = "Recipe Scraper API (https://github.com/ladle-rs/ladle)";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP fetcher using reqwest.
///
/// Downloads raw HTML with a descriptive User-Agent and a bounded
/// timeout. Requests whose host is a private or reserved IP literal are
/// refused by default; [`allow_private_urls`](Self::allow_private_urls)
/// disables the guard for tests and local use.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
    block_private_hosts: bool,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Http(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
            block_private_hosts: true,
        })
    }

    /// Allow requests to private/reserved addresses.
    pub fn allow_private_urls(mut self) -> Self {
        self.block_private_hosts = false;
        self
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        if self.block_private_hosts {
            check_target(url)?;
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::Network(format!("Connection failed: {e}"))
            } else {
                AppError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Http(format!(
                "HTTP {} for {url}",
                status.as_u16()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Http(format!("Failed to read response body: {e}")))
    }
}

/// Refuse non-HTTP schemes and private/reserved IP-literal hosts.
fn check_target(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::Http(format!("Invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::Http(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    let host = parsed.host_str().unwrap_or_default();
    if let Ok(ip) = host.trim_matches(['[', ']']).parse::<IpAddr>() {
        if is_private_ip(ip) {
            return Err(AppError::Http(format!(
                "Refusing to fetch private/reserved address {host}"
            )));
        }
    }

    Ok(())
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                // fe80::/10 link-local, fc00::/7 unique local
                || (v6.segments()[0] & 0xFFC0) == 0xFE80
                || (v6.segments()[0] & 0xFE00) == 0xFC00
                || v6
                    .to_ipv4_mapped()
                    .is_some_and(|v4| is_private_ip(IpAddr::V4(v4)))
        }
    }
}
