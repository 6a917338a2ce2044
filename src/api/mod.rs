pub mod chain;
pub mod service;

pub use chain::*;
pub use service::*;
