//! # Configuration
//!
//! Every setting is a CLI flag with an environment fallback
//! (`SCHOOLREG_*`). Flags win over the environment; both win over defaults.

use clap::{Args, Parser};
use schoolreg_core::ImageStore;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Storage locations, shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// SQLite database file.
    #[arg(long, global = true, env = "SCHOOLREG_DATABASE", default_value = "data/schools.db")]
    pub database: PathBuf,

    /// Public static root; images are stored in its `schoolImages` subdirectory.
    #[arg(long, global = true, env = "SCHOOLREG_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(database: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            public_dir: public_dir.into(),
        }
    }

    pub fn image_store(&self) -> ImageStore {
        ImageStore::under_public_dir(&self.public_dir)
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "SCHOOLREG_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "SCHOOLREG_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Largest accepted request body, in bytes.
    #[arg(long, env = "SCHOOLREG_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Allowed CORS origin. Any origin when unset.
    #[arg(long, env = "SCHOOLREG_CORS_ORIGIN")]
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_origin: None,
        }
    }
}

#[derive(Parser)]
struct ServerOnly {
    #[command(flatten)]
    server: ServerConfig,
}

impl ServerConfig {
    /// Settings from the environment alone (no flags), for `schoolreg` run
    /// without a subcommand.
    pub fn from_env() -> Result<Self, clap::Error> {
        ServerOnly::try_parse_from(["schoolreg"]).map(|parsed| parsed.server)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
