//! Transport seam between the client and the remote endpoint.

use std::future::Future;
use std::time::Duration;

use crate::envelope::{RpcRequest, RpcResponse};
use crate::error::RpcError;

/// Default connection timeout. Only the connect phase is bounded unless a
/// request timeout is configured.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Carries one JSON-RPC request to the endpoint and returns its response.
///
/// Implementations must not interpret the response beyond decoding the
/// envelope: a JSON-RPC error object is a successful exchange.
pub trait RpcTransport: Send + Sync {
    fn send(
        &self,
        request: &RpcRequest,
    ) -> impl Future<Output = Result<RpcResponse, RpcError>> + Send;
}

/// HTTP transport posting every request to a single fixed URL.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport for `url`.
    ///
    /// With `request_timeout` set to `None`, a request may wait on the
    /// endpoint indefinitely.
    pub fn new(url: impl Into<String>, request_timeout: Option<Duration>) -> Result<Self, RpcError> {
        let mut builder = reqwest::Client::builder().connect_timeout(DEFAULT_CONNECT_TIMEOUT);
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RpcError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RpcTransport for HttpTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RpcError::Timeout(e.to_string())
                } else if e.is_connect() {
                    RpcError::Unreachable(e.to_string())
                } else {
                    RpcError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(RpcError::Http(response.status().as_u16()));
        }

        response
            .json::<RpcResponse>()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("invalid JSON-RPC envelope: {e}")))
    }
}
