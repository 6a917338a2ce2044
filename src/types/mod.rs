mod amount;
mod block;
mod chain;
mod transaction;

pub use amount::{Amount, COIN_PRECISION, UNITS_PER_COIN};
pub use block::{BlockSummary, BlockTransactions};
pub use chain::ChainTip;
pub use transaction::{ScriptPubKey, ScriptSig, TransactionSummary, TxInput, TxOutput};
