use serde::{Deserialize, Serialize};

use crate::types::Amount;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScriptSig {
    pub asm: String,
    pub hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScriptPubKey {
    pub asm: String,
    pub hex: String,
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(rename = "reqSigs", default)]
    pub req_sigs: Option<u32>,
    #[serde(default)]
    pub addresses: Vec<String>,
    /// Newer daemons report a single `address` instead of `addresses`.
    #[serde(default)]
    pub address: Option<String>,
}

impl ScriptPubKey {
    pub fn all_addresses(&self) -> Vec<String> {
        let mut addresses = self.addresses.clone();
        if let Some(address) = &self.address {
            if !addresses.contains(address) {
                addresses.push(address.clone());
            }
        }
        addresses
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TxInput {
    #[serde(default)]
    pub coinbase: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub vout: Option<u32>,
    #[serde(rename = "scriptSig", default)]
    pub script_sig: Option<ScriptSig>,
    #[serde(default)]
    pub sequence: u32,
}

impl TxInput {
    pub fn is_coinbase(&self) -> bool {
        self.coinbase.is_some()
    }

    /// `(txid, index)` of the spent output; `None` for coinbase inputs.
    pub fn previous_output(&self) -> Option<(&str, u32)> {
        match (&self.txid, self.vout) {
            (Some(txid), Some(vout)) => Some((txid.as_str(), vout)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxOutput {
    pub value: Amount,
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TransactionSummary {
    pub txid: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub locktime: u64,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub vin: Vec<TxInput>,
    #[serde(default)]
    pub vout: Vec<TxOutput>,
    #[serde(default)]
    pub blockhash: Option<String>,
    #[serde(default)]
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub blocktime: Option<i64>,
}

impl TransactionSummary {
    pub fn total_output_value(&self) -> Amount {
        self.vout.iter().map(|output| output.value).sum()
    }

    pub fn is_coinbase(&self) -> bool {
        self.vin.first().is_some_and(TxInput::is_coinbase)
    }
}
