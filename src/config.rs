//! Configuration for ovpn-ccd
//!
//! The address pool is described by a TOML document:
//!
//! ```toml
//! [vpn]
//! network = "10.8.0.0/24"
//! netmask = "255.255.255.0"
//!
//! [paths]
//! ccd_dir = "/etc/openvpn/ccd"
//!
//! [client_pool]
//! start = "10.8.0.2"
//! end = "10.8.0.254"
//!
//! [reserved_ips]
//! gateway = "10.8.0.1"
//! ```
//!
//! The raw document is string-typed; [`Config::from_toml`] validates every
//! literal up front so allocation code only ever sees parsed values.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use ipnet::Ipv4Net;
use serde::Deserialize;

use crate::error::{CcdError, Result};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/ccd_config.toml";

/// Validated address pool configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // VPN Network
    // -------------------------------------------------------------------------
    /// Every assigned address must lie inside this network
    pub vpn_network: Ipv4Net,

    /// Mask written verbatim into every record
    pub netmask: String,

    // -------------------------------------------------------------------------
    // Record Store
    // -------------------------------------------------------------------------
    /// Directory holding one record file per client
    pub ccd_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Client Pool
    // -------------------------------------------------------------------------
    /// First address the allocator tries (inclusive)
    pub pool_start: Ipv4Addr,

    /// Last address the allocator tries (inclusive)
    pub pool_end: Ipv4Addr,

    /// Named addresses never handed out (gateway, server endpoint, ...)
    pub reserved_ips: BTreeMap<String, Ipv4Addr>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vpn_network: Ipv4Net::new(Ipv4Addr::new(10, 8, 0, 0), 24)
                .expect("24 is a valid IPv4 prefix length"),
            netmask: "255.255.255.0".to_string(),
            ccd_dir: PathBuf::from("./ccd"),
            pool_start: Ipv4Addr::new(10, 8, 0, 2),
            pool_end: Ipv4Addr::new(10, 8, 0, 254),
            reserved_ips: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CcdError::ConfigNotFound(path.to_path_buf()),
            _ => CcdError::io(path, e),
        })?;

        let config = Self::from_toml(&content).map_err(|e| match e {
            CcdError::ConfigMalformed(msg) => {
                CcdError::ConfigMalformed(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        tracing::debug!(
            "Loaded config from {}: network={}, pool={}-{}, reserved={}",
            path.display(),
            config.vpn_network,
            config.pool_start,
            config.pool_end,
            config.reserved_ips.len()
        );

        Ok(config)
    }

    /// Parse and validate a TOML config document
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| CcdError::ConfigMalformed(e.to_string().trim_end().to_string()))?;

        let vpn_network: Ipv4Net = raw.vpn.network.trim().parse().map_err(|_| {
            CcdError::ConfigMalformed(format!("vpn.network: invalid CIDR {:?}", raw.vpn.network))
        })?;

        let pool_start = parse_addr("client_pool.start", &raw.client_pool.start)?;
        let pool_end = parse_addr("client_pool.end", &raw.client_pool.end)?;

        let mut reserved_ips = BTreeMap::new();
        for (name, value) in &raw.reserved_ips {
            let addr = parse_addr(&format!("reserved_ips.{}", name), value)?;
            reserved_ips.insert(name.clone(), addr);
        }

        let config = Self {
            vpn_network,
            netmask: raw.vpn.netmask,
            ccd_dir: PathBuf::from(raw.paths.ccd_dir),
            pool_start,
            pool_end,
            reserved_ips,
        };
        config.validate()?;

        Ok(config)
    }

    /// Check the pool bounds against each other and the VPN network
    pub fn validate(&self) -> Result<()> {
        if self.pool_start > self.pool_end {
            return Err(CcdError::ConfigMalformed(format!(
                "client_pool.start {} is after client_pool.end {}",
                self.pool_start, self.pool_end
            )));
        }

        for (key, addr) in [
            ("client_pool.start", self.pool_start),
            ("client_pool.end", self.pool_end),
        ] {
            if !self.vpn_network.contains(&addr) {
                return Err(CcdError::ConfigMalformed(format!(
                    "{} {} is outside vpn.network {}",
                    key, addr, self.vpn_network
                )));
            }
        }

        if self.netmask.trim().is_empty() {
            return Err(CcdError::ConfigMalformed("vpn.netmask is empty".to_string()));
        }

        Ok(())
    }

    /// The reserved addresses as a set
    pub fn reserved_set(&self) -> HashSet<Ipv4Addr> {
        self.reserved_ips.values().copied().collect()
    }
}

fn parse_addr(key: &str, value: &str) -> Result<Ipv4Addr> {
    value.trim().parse().map_err(|_| {
        CcdError::ConfigMalformed(format!("{}: invalid IPv4 address {:?}", key, value))
    })
}

// =============================================================================
// Raw Document
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawConfig {
    vpn: RawVpn,
    paths: RawPaths,
    client_pool: RawPool,
    #[serde(default)]
    reserved_ips: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawVpn {
    network: String,
    netmask: String,
}

#[derive(Debug, Deserialize)]
struct RawPaths {
    ccd_dir: String,
}

#[derive(Debug, Deserialize)]
struct RawPool {
    start: String,
    end: String,
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the VPN network
    pub fn vpn_network(mut self, network: Ipv4Net) -> Self {
        self.config.vpn_network = network;
        self
    }

    /// Set the netmask written into records
    pub fn netmask(mut self, netmask: impl Into<String>) -> Self {
        self.config.netmask = netmask.into();
        self
    }

    /// Set the record store directory
    pub fn ccd_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ccd_dir = path.into();
        self
    }

    /// Set the inclusive client pool range
    pub fn pool(mut self, start: Ipv4Addr, end: Ipv4Addr) -> Self {
        self.config.pool_start = start;
        self.config.pool_end = end;
        self
    }

    /// Add a named reserved address
    pub fn reserve(mut self, name: impl Into<String>, addr: Ipv4Addr) -> Self {
        self.config.reserved_ips.insert(name.into(), addr);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
