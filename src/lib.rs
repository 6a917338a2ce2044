pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod server;
pub mod transport;
pub mod types;
pub mod utils;
pub mod validate;
pub mod view;
pub mod walker;

pub use api::{ChainApi, ChainService};
pub use client::{Client, ClientOptions};
pub use config::{Cli, Settings};
pub use error::{ErrorKind, ExplorerError, Result};
pub use render::{HtmlRenderer, Render};
pub use server::{create_router, AppContext};
pub use types::{Amount, BlockSummary, ChainTip, TransactionSummary};
