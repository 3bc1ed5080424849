//! Batch creation
//!
//! Creates records for a numeric range of synthesized client names
//! (`client31`, `client32`, ...), carrying on past per-client failures.

use std::net::Ipv4Addr;

use crate::error::{CcdError, Result};
use crate::store::CcdStore;

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Clients created, in order
    pub created: Vec<(String, Ipv4Addr)>,

    /// Clients that failed, with the reason
    pub failed: Vec<(String, CcdError)>,
}

/// Synthesized name for client number `n`
pub fn client_name(n: u32) -> String {
    format!("client{}", n)
}

/// Create `client<start>` through `client<end>` (inclusive)
///
/// Per-client failures (pool exhausted, duplicate, ...) are collected in
/// the report. Anything else aborts the run.
pub fn create_range(store: &CcdStore, start: u32, end: u32) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for n in start..=end {
        let client = client_name(n);
        match store.create(&client, None) {
            Ok(address) => report.created.push((client, address)),
            Err(e) if e.is_per_client() => {
                tracing::warn!("Failed to create {}: {}", client, e);
                report.failed.push((client, e));
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        "Batch {}..={} done: {} created, {} failed",
        start,
        end,
        report.created.len(),
        report.failed.len()
    );

    Ok(report)
}
