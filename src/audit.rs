//! Conflict Auditor
//!
//! Detects addresses claimed by more than one record. Detection only:
//! conflicting records are reported, never touched.

use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;
use std::path::Path;

use crate::error::Result;
use crate::record::read_records;

/// Two records pushing the same address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub address: Ipv4Addr,

    /// First record (in filename order) claiming the address
    pub first_owner: String,

    /// Later record claiming the same address
    pub conflicting_owner: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IP {} used by {} and {}",
            self.address, self.first_owner, self.conflicting_owner
        )
    }
}

/// Scan `ccd_dir` and report every duplicate address claim
///
/// Records are visited in filename order. An address claimed by N records
/// yields N - 1 conflicts, each naming the first owner.
pub fn check(ccd_dir: &Path) -> Result<Vec<Conflict>> {
    let mut owners: HashMap<Ipv4Addr, String> = HashMap::new();
    let mut conflicts = Vec::new();

    for record in read_records(ccd_dir)? {
        let Some(address) = record.address else {
            continue;
        };

        match owners.get(&address) {
            Some(first_owner) => {
                let conflict = Conflict {
                    address,
                    first_owner: first_owner.clone(),
                    conflicting_owner: record.client,
                };
                tracing::warn!("Conflict: {}", conflict);
                conflicts.push(conflict);
            }
            None => {
                owners.insert(address, record.client);
            }
        }
    }

    Ok(conflicts)
}
