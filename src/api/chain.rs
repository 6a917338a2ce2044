use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::api::ChainService;
use crate::client::ClientInner;
use crate::error::{ExplorerError, Result};
use crate::types::{BlockSummary, ChainTip, TransactionSummary};
use crate::validate::parse_hash;

const VERBOSITY_HEADER: u8 = 1;
const VERBOSITY_TRANSACTIONS: u8 = 2;

#[derive(Debug, Clone)]
pub struct ChainApi {
    client: Arc<ClientInner>,
}

impl ChainApi {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        self.client.call(method, params).await
    }

    pub async fn get_blockchain_info(&self) -> Result<ChainTip> {
        self.call("getblockchaininfo", json!([])).await
    }

    pub async fn get_block_count(&self) -> Result<u64> {
        self.call("getblockcount", json!([])).await
    }

    pub async fn get_best_block_hash(&self) -> Result<String> {
        self.call("getbestblockhash", json!([])).await
    }

    pub async fn get_block_verbose(&self, hash: &str, verbosity: u8) -> Result<Value> {
        self.call("getblock", json!([hash, verbosity])).await
    }

    pub async fn get_raw_transaction_verbose(&self, txid: &str) -> Result<Value> {
        self.call("getrawtransaction", json!([txid, true])).await
    }
}

#[async_trait]
impl ChainService for ChainApi {
    async fn get_tip(&self) -> Result<ChainTip> {
        self.get_blockchain_info().await
    }

    async fn get_block(&self, hash: &str, include_transactions: bool) -> Result<BlockSummary> {
        let verbosity = if include_transactions {
            VERBOSITY_TRANSACTIONS
        } else {
            VERBOSITY_HEADER
        };
        self.call("getblock", json!([hash, verbosity])).await
    }

    async fn get_block_hash(&self, height: u64) -> Result<String> {
        let hash: String = self.call("getblockhash", json!([height])).await?;
        parse_hash(&hash).map_err(|_| {
            ExplorerError::Malformed(format!("getblockhash: not a block hash: {hash:?}"))
        })?;
        Ok(hash)
    }

    async fn get_transaction(&self, txid: &str) -> Result<TransactionSummary> {
        self.call("getrawtransaction", json!([txid, true])).await
    }

    async fn get_raw_block(&self, hash: &str) -> Result<Value> {
        self.get_block_verbose(hash, VERBOSITY_HEADER).await
    }

    async fn get_raw_transaction(&self, txid: &str) -> Result<Value> {
        self.get_raw_transaction_verbose(txid).await
    }
}
