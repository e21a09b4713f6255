//! HTTP client for artifact downloads.
//!
//! A thin wrapper around `reqwest::blocking` adding:
//! - retry with exponential backoff on transient failures
//! - a fixed User-Agent
//! - timeout, proxy and custom CA certificate settings
//!
//! # Examples
//!
//! ```no_run
//! use pkg_core::http::{HttpClient, HttpClientConfig};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig::new()
//!     .with_timeout(Duration::from_secs(60))
//!     .with_max_retries(5);
//!
//! let client = HttpClient::with_config(config)?;
//! client.download("https://pkg.example.com/All/foo-1.0.txz", "/tmp/foo-1.0.txz".as_ref())?;
//! # Ok(())
//! # }
//! ```

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_USER_AGENT: &str = concat!("pkg/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Exponential backoff before retry number `attempt + 1`, capped at [`MAX_RETRY_DELAY`].
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt))
        .min(MAX_RETRY_DELAY)
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Max retries exceeded for {url}")]
    MaxRetries { url: String },
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpClient {
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self, HttpError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(cafile) = &config.cafile {
            let cert_bytes = std::fs::read(cafile)?;
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&cert_bytes)?);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
        })
    }

    /// Perform GET request with automatic retries
    pub fn get(&self, url: &str) -> Result<Response, HttpError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let error = HttpError::HttpStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    };
                    // Client errors other than 429 won't improve on retry
                    if !status.is_server_error() && status != StatusCode::TOO_MANY_REQUESTS {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
                Err(e) => last_error = Some(HttpError::Request(e)),
            }

            if attempt < self.max_retries {
                let delay = backoff_delay(self.retry_delay, attempt);
                log::debug!("Retrying {} in {:?} (attempt {})", url, delay, attempt + 1);
                std::thread::sleep(delay);
            }
        }

        Err(last_error.unwrap_or_else(|| HttpError::MaxRetries {
            url: url.to_string(),
        }))
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    ///
    /// `dest` is created or truncated; its parent directory must exist.
    pub fn download(&self, url: &str, dest: &Path) -> Result<u64, HttpError> {
        let mut response = self.get(url)?;
        let mut file = File::create(dest)?;

        let written = response.copy_to(&mut file)?;
        file.flush()?;

        log::debug!("Downloaded {} bytes from {}", written, url);
        Ok(written)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub proxy: Option<String>,
    pub cafile: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            proxy: None,
            cafile: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_cafile(mut self, cafile: PathBuf) -> Self {
        self.cafile = Some(cafile);
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}
