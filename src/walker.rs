//! Multi-call assembly of pages from the daemon.
//!
//! The landing page follows `previousblockhash` links back from the tip
//! instead of asking for `tip - k` by height. Every block in the result is
//! therefore an ancestor of the tip that was read first, even if the daemon
//! switches branches or appends blocks while the walk is in progress. The
//! cost is that step `k` depends on the reply to step `k - 1`, so the walk
//! is sequential. A height-indexed walk could issue all lookups at once but
//! may mix blocks from two branches during a reorg.

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::api::ChainService;
use crate::error::{ExplorerError, Result};
use crate::types::{BlockSummary, TransactionSummary};

/// Walks back from the tip, returning at most `depth` blocks, newest first.
///
/// Stops early at genesis. Any failure discards the partial list.
pub async fn recent_blocks(chain: &dyn ChainService, depth: usize) -> Result<Vec<BlockSummary>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let unavailable = |step: usize, err: ExplorerError| ExplorerError::DataUnavailable {
        step,
        source: Box::new(err),
    };

    let tip = chain.get_tip().await.map_err(|err| unavailable(0, err))?;
    let head = chain
        .get_block(&tip.hash, true)
        .await
        .map_err(|err| unavailable(1, err))?;

    let mut blocks = Vec::with_capacity(depth);
    blocks.push(head);

    while blocks.len() < depth {
        let previous = match blocks.last().and_then(BlockSummary::previous_hash) {
            Some(hash) => hash.to_string(),
            None => break,
        };
        let step = blocks.len() + 1;
        let block = chain
            .get_block(&previous, true)
            .await
            .map_err(|err| unavailable(step, err))?;
        blocks.push(block);
    }

    tracing::debug!(tip = %tip.hash, count = blocks.len(), "walked recent blocks");
    Ok(blocks)
}

/// Fetches every listed transaction, at most `concurrency` at a time.
///
/// Results keep the order of `txids`. The first failure fails the whole
/// fetch; outstanding requests are dropped.
pub async fn fetch_transactions(
    chain: &dyn ChainService,
    txids: Vec<String>,
    concurrency: usize,
) -> Result<Vec<TransactionSummary>> {
    stream::iter(txids)
        .map(move |txid| async move { chain.get_transaction(&txid).await })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
