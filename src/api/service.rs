use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{BlockSummary, ChainTip, TransactionSummary};

/// Read-only view of a chain daemon.
///
/// Implementations must be safe to share between concurrent request tasks.
/// Every call either answers or fails with a `NotFound`, `Unavailable` or
/// `Malformed` kind error; callers never retry.
#[async_trait]
pub trait ChainService: Send + Sync {
    async fn get_tip(&self) -> Result<ChainTip>;

    /// `include_transactions` selects full transaction records instead of ids.
    async fn get_block(&self, hash: &str, include_transactions: bool) -> Result<BlockSummary>;

    async fn get_block_hash(&self, height: u64) -> Result<String>;

    async fn get_transaction(&self, txid: &str) -> Result<TransactionSummary>;

    async fn get_raw_block(&self, hash: &str) -> Result<Value>;

    async fn get_raw_transaction(&self, txid: &str) -> Result<Value>;
}
