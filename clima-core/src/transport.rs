use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::fmt::Debug;

use crate::error::TransportError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Issues the outbound GET. Implementations must be safe to share between
/// concurrently in-flight requests.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError>;
}

/// Production transport over a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request(Box::new(e.without_url())))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| TransportError::Request(Box::new(e.without_url())))?;

        Ok(HttpResponse { status, body: body.to_vec() })
    }
}
