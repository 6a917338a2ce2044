use serde::{Deserialize, Serialize};

use crate::types::{Amount, TransactionSummary};

/// Transactions of a block, as ids or full records depending on fetch depth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BlockTransactions {
    Ids(Vec<String>),
    Full(Vec<TransactionSummary>),
}

impl Default for BlockTransactions {
    fn default() -> Self {
        Self::Ids(Vec::new())
    }
}

impl BlockTransactions {
    pub fn len(&self) -> usize {
        match self {
            Self::Ids(ids) => ids.len(),
            Self::Full(txs) => txs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::Ids(ids) => ids.iter().map(String::as_str).collect(),
            Self::Full(txs) => txs.iter().map(|tx| tx.txid.as_str()).collect(),
        }
    }

    /// Full records; empty when the block was fetched with ids only.
    pub fn full(&self) -> &[TransactionSummary] {
        match self {
            Self::Ids(_) => &[],
            Self::Full(txs) => txs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockSummary {
    pub hash: String,
    pub height: u64,
    pub time: i64,
    pub size: u64,
    pub difficulty: f64,
    pub nonce: u64,
    pub bits: String,
    #[serde(rename = "merkleroot")]
    pub merkle_root: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub confirmations: Option<i64>,
    #[serde(rename = "previousblockhash", default)]
    pub previous_hash: Option<String>,
    #[serde(rename = "nextblockhash", default)]
    pub next_hash: Option<String>,
    #[serde(default)]
    pub tx: BlockTransactions,
}

impl BlockSummary {
    /// Link to the parent block, `None` at genesis.
    pub fn previous_hash(&self) -> Option<&str> {
        self.previous_hash.as_deref().filter(|hash| !hash.is_empty())
    }

    pub fn next_hash(&self) -> Option<&str> {
        self.next_hash.as_deref().filter(|hash| !hash.is_empty())
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash().is_none()
    }

    /// Sum of every output of every embedded transaction.
    pub fn total_output_value(&self) -> Amount {
        self.tx
            .full()
            .iter()
            .map(TransactionSummary::total_output_value)
            .sum()
    }
}
