//! Presentation-shaped records built from daemon replies.
//!
//! Everything here is pure: no I/O, and the same input always yields the
//! same strings regardless of host locale or timezone.

use serde::Serialize;

use crate::types::{Amount, BlockSummary, TransactionSummary, TxInput, TxOutput};
use crate::utils::{display_hash, format_difficulty, format_size, format_timestamp, short_hash};

/// Number of blocks listed on the landing page.
pub const LANDING_PAGE_BLOCKS: usize = 20;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LandingRow {
    pub display_hash: String,
    pub hash: String,
    pub height: u64,
    pub size: String,
    pub timestamp: String,
    pub tx_count: usize,
    pub total_value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct LandingPageModel {
    pub rows: Vec<LandingRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InputRow {
    pub coinbase: Option<String>,
    pub previous_txid: Option<String>,
    pub previous_index: Option<u32>,
    pub script_sig: String,
    pub sequence: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutputRow {
    pub index: u32,
    pub value: String,
    pub script: String,
    pub script_type: String,
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlockTxRow {
    pub display_hash: String,
    pub hash: String,
    pub inputs: Vec<InputRow>,
    pub outputs: Vec<OutputRow>,
    pub total_value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlockPageModel {
    pub hash: String,
    pub height: u64,
    pub bits: String,
    pub difficulty: String,
    pub merkle_root: String,
    pub nonce: u64,
    pub previous_hash: Option<String>,
    pub next_hash: Option<String>,
    pub size: String,
    pub timestamp: String,
    pub tx_count: usize,
    pub total_value: String,
    pub txs: Vec<BlockTxRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TxPageModel {
    pub hash: String,
    pub block_hash: Option<String>,
    pub confirmations: Option<u64>,
    pub inputs: Vec<InputRow>,
    pub outputs: Vec<OutputRow>,
    pub total_value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorModel {
    pub message: String,
}

impl ErrorModel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A fully built page body, ready for a renderer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Landing(LandingPageModel),
    Block(BlockPageModel),
    Tx(TxPageModel),
    Error(ErrorModel),
}

pub fn landing_page(blocks: &[BlockSummary]) -> LandingPageModel {
    let rows = blocks
        .iter()
        .map(|block| LandingRow {
            display_hash: display_hash(&block.hash),
            hash: block.hash.clone(),
            height: block.height,
            size: format_size(block.size),
            timestamp: format_timestamp(block.time),
            tx_count: block.tx.len(),
            total_value: block.total_output_value().to_string(),
        })
        .collect();

    LandingPageModel { rows }
}

/// `transactions` are the block's transactions in block order.
pub fn block_page(block: &BlockSummary, transactions: &[TransactionSummary]) -> BlockPageModel {
    let total: Amount = transactions
        .iter()
        .map(TransactionSummary::total_output_value)
        .sum();

    BlockPageModel {
        hash: block.hash.clone(),
        height: block.height,
        bits: block.bits.clone(),
        difficulty: format_difficulty(block.difficulty),
        merkle_root: block.merkle_root.clone(),
        nonce: block.nonce,
        previous_hash: block.previous_hash().map(str::to_string),
        next_hash: block.next_hash().map(str::to_string),
        size: format_size(block.size),
        timestamp: format_timestamp(block.time),
        tx_count: block.tx.len(),
        total_value: total.to_string(),
        txs: transactions
            .iter()
            .map(|tx| BlockTxRow {
                display_hash: short_hash(&tx.txid),
                hash: tx.txid.clone(),
                inputs: tx.vin.iter().map(input_row).collect(),
                outputs: tx.vout.iter().map(output_row).collect(),
                total_value: tx.total_output_value().to_string(),
            })
            .collect(),
    }
}

pub fn tx_page(tx: &TransactionSummary) -> TxPageModel {
    TxPageModel {
        hash: tx.txid.clone(),
        block_hash: tx.blockhash.clone(),
        confirmations: tx.confirmations,
        inputs: tx.vin.iter().map(input_row).collect(),
        outputs: tx.vout.iter().map(output_row).collect(),
        total_value: tx.total_output_value().to_string(),
    }
}

fn input_row(input: &TxInput) -> InputRow {
    let previous = input.previous_output();
    InputRow {
        coinbase: input.coinbase.clone(),
        previous_txid: previous.map(|(txid, _)| txid.to_string()),
        previous_index: previous.map(|(_, index)| index),
        script_sig: input
            .script_sig
            .as_ref()
            .map(|script| script.asm.clone())
            .unwrap_or_default(),
        sequence: input.sequence,
    }
}

fn output_row(output: &TxOutput) -> OutputRow {
    OutputRow {
        index: output.n,
        value: output.value.to_string(),
        script: output.script_pub_key.asm.clone(),
        script_type: output.script_pub_key.script_type.clone(),
        addresses: output.script_pub_key.all_addresses(),
    }
}
