//! Address allocator
//!
//! Pure decision functions: nothing here writes to disk.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::config::Config;
use crate::error::{CcdError, Result};

use super::collect_used_addresses;

/// Lowest address in `[start, end]` that is not in `used`
///
/// Deterministic for a fixed `used` set.
pub fn find_next_available(
    start: Ipv4Addr,
    end: Ipv4Addr,
    used: &HashSet<Ipv4Addr>,
) -> Result<Ipv4Addr> {
    (u32::from(start)..=u32::from(end))
        .map(Ipv4Addr::from)
        .find(|addr| !used.contains(addr))
        .ok_or(CcdError::PoolExhausted { start, end })
}

/// Fail unless `address` lies inside `network`
pub fn validate_fixed(address: Ipv4Addr, network: Ipv4Net) -> Result<()> {
    if !network.contains(&address) {
        return Err(CcdError::OutOfRange { address, network });
    }
    Ok(())
}

/// Decide the address for `client`
///
/// With `fixed` set, the address must be inside the VPN network and not
/// used by any record or reserved. Otherwise the lowest free pool address
/// is chosen.
pub fn allocate(config: &Config, client: &str, fixed: Option<Ipv4Addr>) -> Result<Ipv4Addr> {
    let used = collect_used_addresses(&config.ccd_dir, &config.reserved_set())?;

    let address = match fixed {
        Some(address) => {
            validate_fixed(address, config.vpn_network)?;
            if used.contains(&address) {
                return Err(CcdError::AlreadyInUse(address));
            }
            address
        }
        None => find_next_available(config.pool_start, config.pool_end, &used)?,
    };

    tracing::debug!(
        "Allocated {} for {} ({})",
        address,
        client,
        if fixed.is_some() { "fixed" } else { "pool" }
    );

    Ok(address)
}
