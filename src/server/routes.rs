use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use serde_json::Value;

use super::response::{status_for, user_message, Subject};
use super::AppContext;
use crate::error::{ExplorerError, Result};
use crate::validate::{parse_hash, parse_height, parse_search};
use crate::view::{block_page, landing_page, tx_page, ErrorModel, Page, LANDING_PAGE_BLOCKS};
use crate::walker::{fetch_transactions, recent_blocks};

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchQuery {
    q: Option<String>,
}

fn segment(path: Option<Path<String>>) -> String {
    path.map(|Path(value)| value).unwrap_or_default()
}

fn page(ctx: &AppContext, title: &str, page: &Page) -> Response {
    Html(ctx.renderer.render(title, page)).into_response()
}

fn error_page(ctx: &AppContext, err: ExplorerError, subject: Subject) -> Response {
    let status = status_for(&err);
    tracing::warn!(?subject, %status, error = %err, "request failed");
    let model = ErrorModel::new(user_message(&err, subject));
    (status, page(ctx, "Error", &Page::Error(model))).into_response()
}

fn raw_dump(value: &Value) -> Result<Response> {
    let body = serde_json::to_string_pretty(value)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, "404 - Not found").into_response()
}

async fn show_block(ctx: &AppContext, hash: &str) -> Response {
    let result = async {
        let hash = parse_hash(hash)?;
        let summary = ctx.chain.get_block(hash, false).await?;
        let txids = summary.tx.ids().into_iter().map(str::to_string).collect();
        let transactions =
            fetch_transactions(ctx.chain.as_ref(), txids, ctx.settings.tx_fetch_concurrency)
                .await?;
        Ok::<_, ExplorerError>((summary.height, block_page(&summary, &transactions)))
    }
    .await;

    match result {
        Ok((height, model)) => page(ctx, &format!("Block {height}"), &Page::Block(model)),
        Err(err) => error_page(ctx, err, Subject::Block),
    }
}

async fn redirect_to_height(ctx: &AppContext, height: &str) -> Response {
    let result = async {
        let height = parse_height(height)?;
        let hash = ctx.chain.get_block_hash(height).await?;
        // Only a well-formed hash may reach the Location header.
        parse_hash(&hash).map_err(|_| {
            ExplorerError::Malformed(format!("block hash for height {height}: {hash:?}"))
        })?;
        Ok::<_, ExplorerError>(hash)
    }
    .await;

    match result {
        Ok(hash) => Redirect::temporary(&format!("/block/{hash}")).into_response(),
        Err(err) => error_page(ctx, err, Subject::Height),
    }
}

async fn show_transaction(ctx: &AppContext, txid: &str) -> Response {
    let result = async {
        let txid = parse_hash(txid)?;
        ctx.chain.get_transaction(txid).await
    }
    .await;

    match result {
        Ok(tx) => page(ctx, &format!("Tx {}", tx.txid), &Page::Tx(tx_page(&tx))),
        Err(err) => error_page(ctx, err, Subject::Transaction),
    }
}

async fn dump_block(ctx: &AppContext, hash: &str) -> Response {
    let result = async {
        let hash = parse_hash(hash)?;
        raw_dump(&ctx.chain.get_raw_block(hash).await?)
    }
    .await;

    result.unwrap_or_else(|err| error_page(ctx, err, Subject::Block))
}

async fn dump_transaction(ctx: &AppContext, txid: &str) -> Response {
    let result = async {
        let txid = parse_hash(txid)?;
        raw_dump(&ctx.chain.get_raw_transaction(txid).await?)
    }
    .await;

    result.unwrap_or_else(|err| error_page(ctx, err, Subject::Transaction))
}

fn redirect_search(ctx: &AppContext, term: &str) -> Response {
    match parse_search(term) {
        Ok(target) => Redirect::temporary(&target.location()).into_response(),
        Err(err) => error_page(ctx, err, Subject::Search),
    }
}

pub(super) async fn landing(State(ctx): State<AppContext>) -> Response {
    match recent_blocks(ctx.chain.as_ref(), LANDING_PAGE_BLOCKS).await {
        Ok(blocks) => page(&ctx, "Welcome", &Page::Landing(landing_page(&blocks))),
        Err(err) => error_page(&ctx, err, Subject::RecentBlocks),
    }
}

pub(super) async fn block(
    State(ctx): State<AppContext>,
    hash: Option<Path<String>>,
) -> Response {
    show_block(&ctx, &segment(hash)).await
}

pub(super) async fn block_by_height(
    State(ctx): State<AppContext>,
    height: Option<Path<String>>,
) -> Response {
    redirect_to_height(&ctx, &segment(height)).await
}

pub(super) async fn transaction(
    State(ctx): State<AppContext>,
    txid: Option<Path<String>>,
) -> Response {
    show_transaction(&ctx, &segment(txid)).await
}

pub(super) async fn raw_block(
    State(ctx): State<AppContext>,
    hash: Option<Path<String>>,
) -> Response {
    dump_block(&ctx, &segment(hash)).await
}

pub(super) async fn raw_transaction(
    State(ctx): State<AppContext>,
    txid: Option<Path<String>>,
) -> Response {
    dump_transaction(&ctx, &segment(txid)).await
}

/// Redirects to the block or height route; the path form wins over `?q=`.
pub(super) async fn search(
    State(ctx): State<AppContext>,
    term: Option<Path<String>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let term = term
        .map(|Path(term)| term)
        .or(query.q)
        .unwrap_or_default();
    redirect_search(&ctx, &term)
}

/// Paths the typed routes do not match, such as `/block/` or `/tx/a/b`,
/// still dispatch on their first segment; everything after it is the
/// operation's argument.
pub(super) async fn fallback(
    State(ctx): State<AppContext>,
    uri: Uri,
    query: Option<Query<SearchQuery>>,
) -> Response {
    let path = uri.path().trim_start_matches('/');
    let (first, rest) = path.split_once('/').unwrap_or((path, ""));

    match first {
        "block" => show_block(&ctx, rest).await,
        "b" => redirect_to_height(&ctx, rest).await,
        "tx" => show_transaction(&ctx, rest).await,
        "rawblock" => dump_block(&ctx, rest).await,
        "rawtx" => dump_transaction(&ctx, rest).await,
        "search" => {
            let term = match (rest, query.and_then(|Query(query)| query.q)) {
                ("", Some(q)) => q,
                (rest, _) => rest.to_string(),
            };
            redirect_search(&ctx, &term)
        }
        _ => not_found_response(),
    }
}
