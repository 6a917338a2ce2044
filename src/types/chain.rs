use serde::{Deserialize, Serialize};

/// Head of the best chain as reported by `getblockchaininfo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChainTip {
    #[serde(rename = "bestblockhash")]
    pub hash: String,
    #[serde(rename = "blocks")]
    pub height: u64,
    #[serde(default)]
    pub chain: Option<String>,
}
