//! Service configuration.
//!
//! Every setting can come from a flag or an environment variable; `main`
//! loads a `.env` file first so the variables can live there too.

use clap::Parser;
use std::path::PathBuf;

/// Upload a network-traffic CSV and read back its protocol, anomaly and metric summaries.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Interface to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1", env = "TRAFFIC_HOST")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(short, long, default_value = "5000", env = "TRAFFIC_PORT")]
    pub port: u16,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, env = "TRAFFIC_DEBUG")]
    pub debug: bool,

    /// Directory that holds uploads while they are processed
    #[arg(long, default_value = "uploads", value_name = "DIR", env = "TRAFFIC_UPLOAD_DIR")]
    pub upload_dir: PathBuf,

    /// Largest accepted upload, in bytes
    #[arg(
        long,
        default_value = "16777216",
        value_name = "BYTES",
        env = "TRAFFIC_MAX_UPLOAD_BYTES"
    )]
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }
        if self.max_upload_bytes == 0 {
            return Err("max upload size must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
