use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::ChainApi;
use crate::error::Result;
use crate::transport::{HttpTransport, RpcCredentials};

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub credentials: Option<RpcCredentials>,
    /// PEM bundle trusted in addition to the system roots, for self-signed daemons.
    pub root_cert_pem: Option<Vec<u8>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            credentials: None,
            root_cert_pem: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ClientInner {
    transport: HttpTransport,
    options: ClientOptions,
}

impl ClientInner {
    pub(crate) fn new(transport: HttpTransport, options: ClientOptions) -> Self {
        Self { transport, options }
    }

    pub(crate) async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        self.transport.call(method, params).await
    }

    pub(crate) fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub(crate) fn node_url(&self) -> &str {
        self.transport.node_url()
    }
}

/// Handle to one chain daemon. Cloning is cheap and clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,

    pub chain: ChainApi,
}

impl Client {
    pub fn new(node_url: impl Into<String>, options: ClientOptions) -> Result<Self> {
        let transport = HttpTransport::new(
            node_url,
            options.timeout,
            options.credentials.clone(),
            options.root_cert_pem.as_deref(),
        )?;

        let inner = Arc::new(ClientInner::new(transport, options));

        Ok(Self {
            chain: ChainApi::new(inner.clone()),
            inner,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        self.inner.options()
    }

    pub fn node_url(&self) -> &str {
        self.inner.node_url()
    }

    /// Escape hatch for daemon methods without a typed wrapper.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        self.inner.call(method, params).await
    }
}
