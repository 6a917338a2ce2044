//! Process settings: defaults, then a TOML file, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::client::ClientOptions;
use crate::error::{ExplorerError, Result};
use crate::transport::RpcCredentials;

pub const DEFAULT_CONFIG_FILENAME: &str = "blocksafari.toml";

/// Command-line flags. Anything given here wins over the config file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "blocksafari")]
#[command(about = "Read-only web block explorer backed by a full node's JSON-RPC interface")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short = 'C', long = "configfile", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Add an interface/port to listen on (repeatable)
    #[arg(long = "listen", value_name = "ADDR")]
    pub listen: Vec<String>,

    /// Host and port of the node's RPC server
    #[arg(short = 's', long = "rpcserver")]
    pub rpc_server: Option<String>,

    /// RPC username
    #[arg(short = 'u', long = "rpcuser")]
    pub rpc_user: Option<String>,

    /// RPC password
    #[arg(short = 'P', long = "rpcpass")]
    pub rpc_password: Option<String>,

    /// RPC server certificate chain for validation
    #[arg(short = 'c', long = "rpccert", value_name = "FILE")]
    pub rpc_cert: Option<PathBuf>,

    /// Talk to the RPC server over plain HTTP
    #[arg(long = "notls")]
    pub no_tls: bool,

    /// Per-call RPC timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Directory holding the css/ and js/ asset folders
    #[arg(long = "assets", value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub listen: Vec<String>,
    pub rpc_server: String,
    pub rpc_user: String,
    pub rpc_password: String,
    pub rpc_cert: Option<PathBuf>,
    pub no_tls: bool,
    pub timeout_secs: u64,
    pub assets_dir: PathBuf,
    pub tx_fetch_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: vec!["127.0.0.1:8080".to_string()],
            rpc_server: "127.0.0.1:8334".to_string(),
            rpc_user: String::new(),
            rpc_password: String::new(),
            rpc_cert: None,
            no_tls: false,
            timeout_secs: 10,
            assets_dir: PathBuf::from("assets"),
            tx_fetch_concurrency: 8,
        }
    }
}

impl Settings {
    /// Resolve settings for this process.
    ///
    /// A missing default config file is fine; a missing file named with
    /// `--configfile` is an error.
    pub fn load(cli: &Cli) -> Result<Self> {
        let path = cli.config_file.clone().unwrap_or_else(Self::config_path);
        let mut settings = if path.exists() {
            Self::from_file(&path)?
        } else if cli.config_file.is_some() {
            return Err(ExplorerError::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        } else {
            Self::default()
        };

        settings.apply(cli);
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExplorerError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ExplorerError::Config(format!("failed to parse config: {}", e)))
    }

    fn apply(&mut self, cli: &Cli) {
        if !cli.listen.is_empty() {
            self.listen = cli.listen.clone();
        }
        if let Some(server) = &cli.rpc_server {
            self.rpc_server = server.clone();
        }
        if let Some(user) = &cli.rpc_user {
            self.rpc_user = user.clone();
        }
        if let Some(password) = &cli.rpc_password {
            self.rpc_password = password.clone();
        }
        if let Some(cert) = &cli.rpc_cert {
            self.rpc_cert = Some(cert.clone());
        }
        if cli.no_tls {
            self.no_tls = true;
        }
        if let Some(timeout) = cli.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(assets) = &cli.assets_dir {
            self.assets_dir = assets.clone();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.listen.is_empty() {
            return Err(ExplorerError::Config(
                "at least one listen address is required".to_string(),
            ));
        }
        if self.rpc_server.trim().is_empty() {
            return Err(ExplorerError::Config("rpc_server must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ExplorerError::Config("timeout_secs must be positive".to_string()));
        }
        if self.tx_fetch_concurrency == 0 {
            return Err(ExplorerError::Config(
                "tx_fetch_concurrency must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn rpc_url(&self) -> String {
        let scheme = if self.no_tls { "http" } else { "https" };
        format!("{scheme}://{}/", self.rpc_server)
    }

    /// Certificate to trust for the RPC server, if any.
    ///
    /// An explicitly configured certificate must be readable. Otherwise the
    /// node's default certificate is used when present.
    pub fn load_rpc_cert(&self) -> Result<Option<Vec<u8>>> {
        if self.no_tls {
            return Ok(None);
        }
        match &self.rpc_cert {
            Some(path) => std::fs::read(path).map(Some).map_err(|e| {
                ExplorerError::Config(format!("failed to read rpc cert {}: {}", path.display(), e))
            }),
            None => {
                let default = Self::default_rpc_cert_path();
                Ok(std::fs::read(default).ok())
            }
        }
    }

    pub fn client_options(&self) -> Result<ClientOptions> {
        let credentials = (!self.rpc_user.is_empty()).then(|| RpcCredentials {
            user: self.rpc_user.clone(),
            password: self.rpc_password.clone(),
        });

        Ok(ClientOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            credentials,
            root_cert_pem: self.load_rpc_cert()?,
        })
    }

    pub fn app_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".blocksafari"))
            .unwrap_or_else(|| PathBuf::from(".blocksafari"))
    }

    pub fn config_path() -> PathBuf {
        Self::app_dir().join(DEFAULT_CONFIG_FILENAME)
    }

    pub fn default_rpc_cert_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".btcd"))
            .unwrap_or_else(|| PathBuf::from(".btcd"))
            .join("rpc.cert")
    }
}
