//! HTTP front end: one route per page, static assets, and the listeners.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use tokio::task::JoinSet;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::ChainService;
use crate::config::Settings;
use crate::render::Render;

mod response;
mod routes;

pub use response::{status_for, user_message, Subject};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub chain: Arc<dyn ChainService>,
    pub renderer: Arc<dyn Render>,
    pub settings: Arc<Settings>,
}

impl AppContext {
    pub fn new(
        chain: Arc<dyn ChainService>,
        renderer: Arc<dyn Render>,
        settings: Settings,
    ) -> Self {
        Self {
            chain,
            renderer,
            settings: Arc::new(settings),
        }
    }
}

pub fn create_router(ctx: AppContext) -> Router {
    let assets = ctx.settings.assets_dir.clone();

    Router::new()
        .route("/", get(routes::landing))
        .route("/block", get(routes::block))
        .route("/block/:hash", get(routes::block))
        .route("/b", get(routes::block_by_height))
        .route("/b/:height", get(routes::block_by_height))
        .route("/tx", get(routes::transaction))
        .route("/tx/:txid", get(routes::transaction))
        .route("/rawblock", get(routes::raw_block))
        .route("/rawblock/:hash", get(routes::raw_block))
        .route("/rawtx", get(routes::raw_transaction))
        .route("/rawtx/:txid", get(routes::raw_transaction))
        .route("/search", get(routes::search))
        .route("/search/:term", get(routes::search))
        .nest_service("/css", ServeDir::new(assets.join("css")))
        .nest_service("/js", ServeDir::new(assets.join("js")))
        .fallback(routes::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Serves on every configured listen address until ctrl-c or a listener fails.
pub async fn run(ctx: AppContext) -> anyhow::Result<()> {
    let addrs = ctx
        .settings
        .listen
        .iter()
        .map(|addr| {
            addr.parse::<SocketAddr>()
                .with_context(|| format!("invalid listen address {addr}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let router = create_router(ctx);
    let mut listeners = JoinSet::new();

    for addr in addrs {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("HTTP server listening on http://{}", addr);

        let router = router.clone();
        listeners.spawn(async move {
            axum::serve(listener, router)
                .await
                .with_context(|| format!("listener {addr} stopped"))
        });
    }

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Shutting down...");
        }
        Some(finished) = listeners.join_next() => {
            listeners.abort_all();
            finished??;
            anyhow::bail!("a listener exited unexpectedly");
        }
    }

    listeners.abort_all();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{create_router, AppContext};
    use crate::client::{Client, ClientOptions};
    use crate::config::Settings;
    use crate::render::HtmlRenderer;

    const GENESIS: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
    const COINBASE: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    async fn daemon_replies(server: &MockServer, body: Value, status: u16, reply: Value) {
        Mock::given(method("POST"))
            .and(body_partial_json(body))
            .respond_with(ResponseTemplate::new(status).set_body_json(reply))
            .mount(server)
            .await;
    }

    fn ok(result: Value) -> Value {
        json!({ "id": "blocksafari", "result": result, "error": null })
    }

    fn context(server: &MockServer) -> AppContext {
        let client =
            Client::new(server.uri(), ClientOptions::default()).expect("client should build");
        AppContext::new(
            Arc::new(client.chain.clone()),
            Arc::new(HtmlRenderer),
            Settings::default(),
        )
    }

    async fn get(ctx: AppContext, uri: &str) -> axum::response::Response {
        create_router(ctx)
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible")
    }

    #[tokio::test]
    async fn height_lookup_and_block_page_against_a_json_rpc_daemon() {
        let server = MockServer::start().await;
        daemon_replies(
            &server,
            json!({ "method": "getblockhash", "params": [0] }),
            200,
            ok(json!(GENESIS)),
        )
        .await;
        daemon_replies(
            &server,
            json!({ "method": "getblock", "params": [GENESIS, 1] }),
            200,
            ok(json!({
                "hash": GENESIS,
                "height": 0,
                "time": 1231006505,
                "size": 285,
                "difficulty": 1.0,
                "nonce": 2083236893u64,
                "bits": "1d00ffff",
                "merkleroot": COINBASE,
                "nextblockhash": "00000000839a8e6886ab5951d76f411475428afc90947ee320161bbf18eb6048",
                "tx": [COINBASE]
            })),
        )
        .await;
        daemon_replies(
            &server,
            json!({ "method": "getrawtransaction", "params": [COINBASE, true] }),
            200,
            ok(json!({
                "txid": COINBASE,
                "vin": [{ "coinbase": "04ffff001d0104", "sequence": 4294967295u64 }],
                "vout": [{
                    "value": 50.0,
                    "n": 0,
                    "scriptPubKey": {
                        "asm": "04678a OP_CHECKSIG",
                        "hex": "4104678aac",
                        "type": "pubkey"
                    }
                }]
            })),
        )
        .await;
        let ctx = context(&server);

        let redirect = get(ctx.clone(), "/b/0").await;
        assert_eq!(redirect.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = redirect
            .headers()
            .get(header::LOCATION)
            .expect("location")
            .to_str()
            .expect("ascii")
            .to_string();
        assert_eq!(location, format!("/block/{GENESIS}"));

        let page = get(ctx, &location).await;
        assert_eq!(page.status(), StatusCode::OK);
        let body = to_bytes(page.into_body(), usize::MAX).await.expect("body");
        let html = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(html.contains("<title>Block 0</title>"));
        assert!(html.contains("2009-01-03 18:15:05"));
        assert!(html.contains("50.00000000"));
        assert!(html.contains("<tr><th>Previous Block</th><td>none</td></tr>"));
    }

    #[tokio::test]
    async fn daemon_errors_map_to_statuses_without_leaking_detail() {
        let server = MockServer::start().await;
        daemon_replies(
            &server,
            json!({ "method": "getblockhash" }),
            500,
            json!({
                "id": "blocksafari",
                "result": null,
                "error": { "code": -8, "message": "Block height out of range" }
            }),
        )
        .await;
        daemon_replies(
            &server,
            json!({ "method": "getblockchaininfo" }),
            500,
            json!({
                "id": "blocksafari",
                "result": null,
                "error": { "code": -28, "message": "Loading block index..." }
            }),
        )
        .await;
        let ctx = context(&server);

        let missing = get(ctx.clone(), "/b/999999").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let warming_up = get(ctx, "/").await;
        assert_eq!(warming_up.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(warming_up.into_body(), usize::MAX).await.expect("body");
        let html = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(html.contains("Unable to retrieve recent blocks"));
        assert!(!html.contains("Loading block index"));
    }
}
