//! Error types for ovpn-ccd
//!
//! Provides a unified error type for all operations.

use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use ipnet::Ipv4Net;
use thiserror::Error;

/// Result type alias using CcdError
pub type Result<T> = std::result::Result<T, CcdError>;

/// Unified error type for CCD operations
#[derive(Debug, Error)]
pub enum CcdError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Malformed configuration: {0}")]
    ConfigMalformed(String),

    // -------------------------------------------------------------------------
    // Allocation Errors
    // -------------------------------------------------------------------------
    #[error("No available IP addresses in client pool {start} - {end}")]
    PoolExhausted { start: Ipv4Addr, end: Ipv4Addr },

    #[error("IP {address} is outside VPN network {network}")]
    OutOfRange { address: Ipv4Addr, network: Ipv4Net },

    #[error("IP {0} is already in use")]
    AlreadyInUse(Ipv4Addr),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("No CCD found for client: {0}")]
    NotFound(String),

    #[error("CCD already exists for client: {0}")]
    ClientExists(String),

    #[error("Invalid client name: {0:?}")]
    InvalidClientName(String),
}

impl CcdError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        CcdError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this failure belongs to one client only.
    ///
    /// Batch drivers keep going past these and abort on everything else.
    pub fn is_per_client(&self) -> bool {
        matches!(
            self,
            CcdError::PoolExhausted { .. }
                | CcdError::OutOfRange { .. }
                | CcdError::AlreadyInUse(_)
                | CcdError::ClientExists(_)
                | CcdError::InvalidClientName(_)
        )
    }
}
