//! The HTTP seam between the client and the service.
//!
//! The client only ever sends one request per parse, so the transport is
//! deliberately small: a method, a base URL plus path, headers and a body in;
//! a status and a body out. [`HttpTransport`] is the production
//! implementation; tests substitute an in-memory fake.

use crate::error::AnyparserError;
use reqwest::Url;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Default per-request timeout. Large uploads and OCR can be slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// A fully assembled outbound request.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: String,
    pub base_url: Url,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TransportRequest {
    /// `base_url` with `path` appended, keeping any prefix already on the base.
    pub fn url(&self) -> Result<Url, AnyparserError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| AnyparserError::InvalidApiUrl {
            url: format!("{joined} ({e})"),
        })
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("base_url", &self.base_url.as_str())
            .field("path", &self.path)
            .field("headers", &headers)
            .field("body", &format_args!("<{} bytes>", self.body.len()))
            .finish()
    }
}

/// What came back: status code and raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends a [`TransportRequest`] and returns the raw response.
///
/// Implementations report only failures to obtain a response; non-success
/// statuses are returned as ordinary responses and handled by the decoder.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, AnyparserError>> + Send;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Transport with the default timeout of [`DEFAULT_TIMEOUT_SECS`].
    pub fn new() -> Result<Self, AnyparserError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self, AnyparserError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("anyparser-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnyparserError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, AnyparserError> {
        let url = request.url()?;
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| AnyparserError::Internal(format!("Invalid HTTP method: {e}")))?;

        info!("{} {} ({} bytes)", method, url, request.body.len());

        let mut builder = self.client.request(method, url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let failed = |e: reqwest::Error| {
            if e.is_timeout() {
                AnyparserError::RequestTimeout {
                    url: url.to_string(),
                    secs: self.timeout_secs,
                }
            } else {
                AnyparserError::RequestFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        let response = builder.body(request.body).send().await.map_err(failed)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(failed)?;

        debug!("Response: HTTP {}, {} bytes", status, body.len());
        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(base: &str) -> TransportRequest {
        TransportRequest {
            method: "POST".into(),
            base_url: Url::parse(base).unwrap(),
            path: "/parse/v1".into(),
            headers: vec![
                ("Authorization".into(), "Bearer secret-key".into()),
                ("Content-Type".into(), "multipart/form-data; boundary=b".into()),
            ],
            body: b"payload".to_vec(),
        }
    }

    #[test]
    fn url_appends_path_to_base() {
        assert_eq!(
            request("https://anyparserapi.com").url().unwrap().as_str(),
            "https://anyparserapi.com/parse/v1"
        );
        assert_eq!(
            request("https://proxy.example.com/anyparser/").url().unwrap().as_str(),
            "https://proxy.example.com/anyparser/parse/v1"
        );
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = request("https://anyparserapi.com");
        assert_eq!(req.header("content-type"), Some("multipart/form-data; boundary=b"));
        assert_eq!(req.header("X-Missing"), None);
    }

    #[test]
    fn debug_redacts_authorization() {
        let dbg = format!("{:?}", request("https://anyparserapi.com"));
        assert!(!dbg.contains("secret-key"), "{dbg}");
        assert!(dbg.contains("<7 bytes>"), "{dbg}");
    }

    #[test]
    fn http_transport_keeps_its_timeout() {
        assert_eq!(HttpTransport::new().unwrap().timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert_eq!(HttpTransport::with_timeout(5).unwrap().timeout_secs(), 5);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_failure() {
        let transport = HttpTransport::with_timeout(5).unwrap();
        // Port 9 on loopback is the discard port; nothing listens there in CI.
        let result = transport.send(request("http://127.0.0.1:9")).await;
        assert!(matches!(
            result,
            Err(AnyparserError::RequestFailed { .. } | AnyparserError::RequestTimeout { .. })
        ));
    }
}
