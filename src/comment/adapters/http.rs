//! `reqwest`-backed HTTP transport.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::time::Duration;

use crate::comment::ports::{
    HttpAuth, HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError,
    TransportResult,
};

const USER_AGENT_VALUE: &str = concat!("teko-comment-sync/", env!("CARGO_PKG_VERSION"));

/// HTTP transport over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport whose requests all time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] when the client cannot be
    /// constructed (for example when no TLS backend is available).
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(&self, request: &HttpRequest) -> TransportResult<reqwest::RequestBuilder> {
        let method = match request.method() {
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, request.url());

        builder = match request.auth() {
            HttpAuth::Bearer(token) => builder.bearer_auth(token.trim()),
            HttpAuth::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        };

        for (name, value) in request.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
            builder = builder.header(header_name, header_value);
        }

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        Ok(builder)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        let response = self
            .build(&request)?
            .send()
            .await
            .map_err(TransportError::network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::network)?;
        Ok(HttpResponse::new(status, body))
    }
}
