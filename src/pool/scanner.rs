//! Pool scanner
//!
//! Builds the Used-Address Set from the record directory.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::path::Path;

use crate::error::Result;
use crate::record::read_records;

/// Every address claimed by a record, plus the reserved addresses
///
/// A missing directory contributes nothing; the reserved set is always
/// included.
pub fn collect_used_addresses(
    ccd_dir: &Path,
    reserved: &HashSet<Ipv4Addr>,
) -> Result<HashSet<Ipv4Addr>> {
    let records = read_records(ccd_dir)?;
    let record_count = records.len();

    let mut used: HashSet<Ipv4Addr> = records.into_iter().filter_map(|r| r.address).collect();
    used.extend(reserved.iter().copied());

    tracing::debug!(
        "Scanned {}: {} records, {} used addresses ({} reserved)",
        ccd_dir.display(),
        record_count,
        used.len(),
        reserved.len()
    );

    Ok(used)
}
