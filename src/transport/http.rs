use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{ExplorerError, Result};

const REQUEST_ID: &str = "blocksafari";

/// Credentials sent as HTTP basic auth on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcCredentials {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    node_url: String,
    credentials: Option<RpcCredentials>,
}

impl HttpTransport {
    pub fn new(
        node_url: impl Into<String>,
        timeout: Duration,
        credentials: Option<RpcCredentials>,
        root_cert_pem: Option<&[u8]>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(timeout);
        if let Some(pem) = root_cert_pem {
            let cert = reqwest::Certificate::from_pem(pem)
                .map_err(|err| ExplorerError::Config(format!("invalid rpc certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            node_url: node_url.into(),
            credentials,
        })
    }

    pub fn node_url(&self) -> &str {
        self.node_url.as_str()
    }

    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let payload = json!({
            "jsonrpc": "1.0",
            "id": REQUEST_ID,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, node = %self.node_url, "json-rpc call");

        let mut request = self.client.post(&self.node_url).json(&payload);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExplorerError::Transport(format!(
                "node {} rejected credentials (HTTP {status})",
                self.node_url
            )));
        }

        // Daemons report RPC errors with HTTP 500 and a JSON body, so the body
        // is inspected before the status is judged.
        let bytes = response.bytes().await?;
        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(ExplorerError::Transport(format!(
                    "node {} returned HTTP {status}",
                    self.node_url
                )))
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(err) = body.get("error").filter(|err| !err.is_null()) {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or(-32000);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown rpc error")
                .to_string();
            return Err(ExplorerError::from_rpc(code, message));
        }

        if !status.is_success() {
            return Err(ExplorerError::Transport(format!(
                "node {} returned HTTP {status}",
                self.node_url
            )));
        }

        let value = body
            .get("result")
            .cloned()
            .filter(|result| !result.is_null())
            .ok_or_else(|| ExplorerError::Malformed(format!("{method}: no data returned")))?;

        serde_json::from_value(value).map_err(|err| {
            ExplorerError::Malformed(format!("{method}: unexpected reply shape: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::error::{ErrorKind, ExplorerError};
    use crate::transport::{HttpTransport, RpcCredentials};

    #[derive(Debug, Deserialize)]
    struct Info {
        blocks: u64,
    }

    fn transport(uri: String) -> HttpTransport {
        HttpTransport::new(
            uri,
            Duration::from_secs(2),
            Some(RpcCredentials {
                user: "user".to_string(),
                password: "pass".to_string(),
            }),
            None,
        )
        .expect("transport should initialize")
    }

    #[tokio::test]
    async fn sends_json_rpc_payload_and_parses_result() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header_exists("authorization"))
            .and(body_json(json!({
                "jsonrpc": "1.0",
                "id": "blocksafari",
                "method": "getblockchaininfo",
                "params": [],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "blocksafari",
                "result": { "blocks": 42, "chain": "main" },
                "error": null
            })))
            .mount(&server)
            .await;

        let info: Info = transport(server.uri())
            .call("getblockchaininfo", json!([]))
            .await
            .expect("request should succeed");

        assert_eq!(info.blocks, 42);
    }

    #[tokio::test]
    async fn maps_error_object_on_http_500_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "id": "blocksafari",
                "result": null,
                "error": { "code": -5, "message": "Block not found" }
            })))
            .mount(&server)
            .await;

        let err = transport(server.uri())
            .call::<serde_json::Value>("getblock", json!(["00", 1]))
            .await
            .expect_err("rpc error should surface");

        match err {
            ExplorerError::NotFound(message) => assert_eq!(message, "Block not found"),
            other => panic!("expected ExplorerError::NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_rpc_codes_stay_rpc_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "id": "blocksafari",
                "result": null,
                "error": { "code": -28, "message": "Loading block index..." }
            })))
            .mount(&server)
            .await;

        let err = transport(server.uri())
            .call::<serde_json::Value>("getblockchaininfo", json!([]))
            .await
            .expect_err("rpc error should surface");

        assert!(matches!(err, ExplorerError::Rpc { code: -28, .. }));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn rejected_credentials_are_a_transport_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = transport(server.uri())
            .call::<serde_json::Value>("getblockchaininfo", json!([]))
            .await
            .expect_err("401 should fail");

        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn wrong_result_shape_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "blocksafari",
                "result": "not an object",
                "error": null
            })))
            .mount(&server)
            .await;

        let err = transport(server.uri())
            .call::<Info>("getblockchaininfo", json!([]))
            .await
            .expect_err("shape mismatch should fail");

        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[tokio::test]
    async fn null_result_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "blocksafari",
                "result": null,
                "error": null
            })))
            .mount(&server)
            .await;

        let err = transport(server.uri())
            .call::<String>("getblockhash", json!([1]))
            .await
            .expect_err("null result should fail");

        assert!(matches!(err, ExplorerError::Malformed(_)));
    }

    #[tokio::test]
    async fn non_json_error_page_is_a_transport_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let err = transport(server.uri())
            .call::<serde_json::Value>("getblockchaininfo", json!([]))
            .await
            .expect_err("503 should fail");

        assert!(matches!(err, ExplorerError::Transport(_)));
    }
}
