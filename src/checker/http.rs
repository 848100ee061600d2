// src/checker/http.rs
// =============================================================================
// This module checks whether external URLs are alive.
//
// Key functionality:
// - Makes a single HTTP HEAD request per URL (lightweight, no body download)
// - Bounded by a short timeout (2 seconds unless configured otherwise)
// - No retries; the caller decides what a non-200 status means
//
// The validator only talks to the `Pinger` trait, so tests can swap the
// network out for a scripted implementation.
// =============================================================================

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::trace;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Why a probe never got a status code back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PingError {
    #[error("request timed out")]
    Timeout,
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("could not resolve hostname")]
    Dns,
    #[error("connection failed")]
    Connect,
    #[error("{0}")]
    Other(String),
}

// reqwest errors can happen for many reasons; we only keep the category.
impl From<reqwest::Error> for PingError {
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();
        if error.is_timeout() {
            PingError::Timeout
        } else if error.is_redirect() {
            PingError::TooManyRedirects
        } else if error.is_connect() {
            if message.to_lowercase().contains("dns") {
                PingError::Dns
            } else {
                PingError::Connect
            }
        } else {
            PingError::Other(message)
        }
    }
}

/// Something that can tell whether a URL answers.
pub trait Pinger {
    /// Returns the response status code, or why there was none.
    fn ping(&self, url: &str) -> impl Future<Output = Result<u16, PingError>> + Send;
}

/// Pings URLs over the network with HEAD requests.
#[derive(Debug, Clone)]
pub struct HttpPinger {
    client: Client,
}

impl HttpPinger {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Uses a preconfigured client; its timeout settings apply as-is.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Pinger for HttpPinger {
    async fn ping(&self, url: &str) -> Result<u16, PingError> {
        let response = self.client.head(url).send().await?;
        let status = response.status().as_u16();
        trace!(url, status, "pinged");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_pinger(timeout: Duration) -> HttpPinger {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .unwrap();
        HttpPinger::with_client(client)
    }

    // Answers a single request with the given status line and returns the URL.
    async fn serve_once(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response =
                format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/page")
    }

    #[tokio::test]
    async fn test_ping_ok() {
        let url = serve_once("200 OK").await;
        let status = local_pinger(DEFAULT_TIMEOUT).ping(&url).await;
        assert_eq!(status, Ok(200));
    }

    #[tokio::test]
    async fn test_ping_not_found() {
        let url = serve_once("404 Not Found").await;
        let status = local_pinger(DEFAULT_TIMEOUT).ping(&url).await;
        assert_eq!(status, Ok(404));
    }

    #[tokio::test]
    async fn test_ping_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = local_pinger(DEFAULT_TIMEOUT)
            .ping(&format!("http://{addr}/"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ping_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and then say nothing.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let result = local_pinger(Duration::from_millis(200))
            .ping(&format!("http://{addr}/"))
            .await;
        assert_eq!(result, Err(PingError::Timeout));
    }

    #[test]
    fn test_ping_error_messages() {
        assert_eq!(PingError::Timeout.to_string(), "request timed out");
        assert_eq!(PingError::Other("boom".into()).to_string(), "boom");
    }
}
