//! HTTP GET transport.
//!
//! The client depends only on the [`Transport`] trait. [`CurlTransport`] is
//! the default implementation on the curl crate (libcurl easy interface).

mod headers;

use std::string::FromUtf8Error;
use std::time::Duration;

use thiserror::Error;

use crate::config::StorifyConfig;

/// Performs a GET and hands back the body as text.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        (**self).get(url)
    }
}

/// Failure of a single GET.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body was not valid UTF-8.
    #[error("response body is not UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// Blocking GET over libcurl.
///
/// TLS certificates are verified unless `insecure_tls` is set explicitly.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    insecure_tls: bool,
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            insecure_tls: false,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &StorifyConfig) -> Self {
        Self {
            insecure_tls: cfg.insecure_tls,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }

    /// Disables certificate and host name verification.
    pub fn with_insecure_tls(mut self, insecure: bool) -> Self {
        self.insecure_tls = insecure;
        self
    }

    pub fn insecure_tls(&self) -> bool {
        self.insecure_tls
    }
}

impl Transport for CurlTransport {
    /// Follows redirects. Runs in the current thread.
    fn get(&self, url: &str) -> Result<String, TransportError> {
        let mut body: Vec<u8> = Vec::new();
        let mut header_lines: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if self.insecure_tls {
            tracing::warn!("TLS verification disabled for {}", url);
            easy.ssl_verify_peer(false)?;
            easy.ssl_verify_host(false)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.header_function(|data| {
                if let Ok(s) = std::str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }

        // Content type is reported, not enforced.
        let meta = headers::parse_headers(&header_lines);
        tracing::debug!(
            "GET {} -> HTTP {} content-type={:?} content-length={:?}",
            url,
            code,
            meta.content_type,
            meta.content_length
        );

        Ok(String::from_utf8(body)?)
    }
}
