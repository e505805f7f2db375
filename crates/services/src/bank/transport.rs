use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use url::Url;

use crate::error::TransportError;

/// One GET against the question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    /// Ask every cache on the way to revalidate with the origin.
    pub bypass_cache: bool,
}

impl HttpRequest {
    #[must_use]
    pub fn fresh(url: Url) -> Self {
        Self {
            url,
            bypass_cache: true,
        }
    }
}

/// Performs a single request and returns the raw body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns `TransportError` on connection failures, timeouts and
    /// non-success statuses.
    async fn get(&self, request: HttpRequest) -> Result<Vec<u8>, TransportError>;
}

/// `HttpTransport` backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns `TransportError::Http` if the client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<Vec<u8>, TransportError> {
        let mut builder = self.client.get(request.url);
        if request.bypass_cache {
            builder = builder
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accepts one connection, replies with `response` and returns the
    /// lowercased request head.
    async fn serve_once(response: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&head).to_ascii_lowercase()
        });
        let url = Url::parse(&format!("http://{addr}/api.php?amount=5&type=boolean")).unwrap();
        (url, server)
    }

    fn local_transport() -> ReqwestTransport {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        ReqwestTransport::with_client(client)
    }

    #[tokio::test]
    async fn fresh_request_sends_no_cache_headers_and_maps_status() {
        let (url, server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let result = local_transport().get(HttpRequest::fresh(url)).await;
        assert!(matches!(
            result,
            Err(TransportError::Status(status)) if status == StatusCode::SERVICE_UNAVAILABLE
        ));

        let head = server.await.unwrap();
        assert!(head.starts_with("get /api.php?amount=5&type=boolean http/1.1\r\n"));
        assert!(head.contains("\r\ncache-control: no-cache\r\n"));
        assert!(head.contains("\r\npragma: no-cache\r\n"));
    }

    #[tokio::test]
    async fn success_returns_the_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
        )
        .await;
        let request = HttpRequest {
            url,
            bypass_cache: false,
        };

        let body = local_transport().get(request).await.unwrap();
        assert_eq!(body, b"{}");

        let head = server.await.unwrap();
        assert!(!head.contains("cache-control"));
        assert!(!head.contains("pragma"));
    }
}
