use std::net::SocketAddr;
use std::path::PathBuf;

use log::warn;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Runtime configuration, built once in `main` and passed down explicitly.
/// Environment variables override the defaults:
///
///   SWEEPCRM_ADDR        bind address (default 127.0.0.1:3000)
///   SWEEPCRM_DB          database file path
///   SWEEPCRM_BACKUP_DIR  where backup snapshots are written
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub backup_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = match std::env::var("SWEEPCRM_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("SWEEPCRM_ADDR '{raw}' is not a valid address, using {DEFAULT_ADDR}");
                default_addr()
            }),
            Err(_) => default_addr(),
        };

        let data_dir = dirs::data_dir()
            .map(|d| d.join("sweepcrm"))
            .unwrap_or_else(|| PathBuf::from("."));

        let db_path = std::env::var_os("SWEEPCRM_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("sweepcrm.db"));

        let backup_dir = std::env::var_os("SWEEPCRM_BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("backups"));

        Config {
            bind_addr,
            db_path,
            backup_dir,
        }
    }
}

fn default_addr() -> SocketAddr {
    // The literal is known-good; parse cannot fail.
    DEFAULT_ADDR.parse().expect("default bind address")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_addr_is_loopback() {
        let addr = default_addr();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 3000);
    }
}
