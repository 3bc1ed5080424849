//! CCD Store
//!
//! Lifecycle operations over one record directory.
//!
//! ## Responsibilities
//! - create: allocate an address and write the client's record
//! - list: summarize every record
//! - delete: remove a client's record
//! - check: audit the directory for duplicate addresses
//!
//! ## Client States
//! ```text
//!   Unassigned ──create──► Assigned ──delete──► Unassigned
//! ```
//! There is no in-place reassignment: moving a client to another address is
//! delete followed by create.

use std::collections::HashSet;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::net::Ipv4Addr;
use std::path::Path;

use parking_lot::Mutex;

use crate::audit::{self, Conflict};
use crate::config::Config;
use crate::error::{CcdError, Result};
use crate::pool;
use crate::record::{
    read_records, record_path, serialize_record, temp_record_path, DirLock, Record,
};

/// Address state of a listed client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Assigned(Ipv4Addr),

    /// Record exists but has no parseable push line
    Unassigned,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Assigned(addr) => write!(f, "{}", addr),
            Assignment::Unassigned => f.write_str("unassigned"),
        }
    }
}

/// One row of `list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub client: String,
    pub assignment: Assignment,
}

impl From<Record> for ListEntry {
    fn from(record: Record) -> Self {
        Self {
            client: record.client,
            assignment: record
                .address
                .map_or(Assignment::Unassigned, Assignment::Assigned),
        }
    }
}

/// Handle on a CCD directory
///
/// ## Concurrency
///
/// - **Mutations** (create/delete): hold `alloc_lock` and then the
///   directory's [`DirLock`] across the scan and the write. The directory
///   lock is an OS file lock, so separate handles and separate processes on
///   the same directory are serialized too
/// - **Reads** (list/check/get): no lock. Records appear by atomic rename,
///   so readers never see a half-written record
pub struct CcdStore {
    config: Config,

    /// Serializes mutations from threads sharing this handle
    alloc_lock: Mutex<()>,
}

impl CcdStore {
    /// Build a store from a validated config
    ///
    /// Does not touch the filesystem; `create` makes the directory on demand.
    pub fn open(config: Config) -> Self {
        Self {
            config,
            alloc_lock: Mutex::new(()),
        }
    }

    /// Allocate an address for `client` and write its record
    ///
    /// Steps:
    /// 1. Validate the client name, ensure the CCD directory exists
    /// 2. Take the allocation lock and the directory lock
    /// 3. Refuse if the client already has a record
    /// 4. Allocate (fixed or next free)
    /// 5. Write a hidden temp file, then rename it over the record path
    pub fn create(&self, client: &str, fixed: Option<Ipv4Addr>) -> Result<Ipv4Addr> {
        let path = record_path(self.ccd_dir(), client)?;
        let temp_path = temp_record_path(self.ccd_dir(), client)?;

        fs::create_dir_all(self.ccd_dir()).map_err(|e| CcdError::io(self.ccd_dir(), e))?;

        let _alloc_guard = self.alloc_lock.lock();
        let _dir_lock = DirLock::acquire(self.ccd_dir())?;

        if path.exists() {
            return Err(CcdError::ClientExists(client.to_string()));
        }

        let address = pool::allocate(&self.config, client, fixed)?;

        let content = serialize_record(address, &self.config.netmask);
        if let Err(e) = write_record(&temp_path, &content, &path) {
            // Leaves no partial record behind
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        tracing::info!("CCD created: {} -> {}", client, address);

        Ok(address)
    }

    /// Every record in filename order
    pub fn list(&self) -> Result<Vec<ListEntry>> {
        Ok(read_records(self.ccd_dir())?
            .into_iter()
            .map(ListEntry::from)
            .collect())
    }

    /// Look up a single client
    pub fn get(&self, client: &str) -> Result<Option<ListEntry>> {
        Ok(self.list()?.into_iter().find(|entry| entry.client == client))
    }

    /// Remove the record for `client`
    pub fn delete(&self, client: &str) -> Result<()> {
        let path = record_path(self.ccd_dir(), client)?;

        if !self.ccd_dir().is_dir() {
            return Err(CcdError::NotFound(client.to_string()));
        }

        let _alloc_guard = self.alloc_lock.lock();
        let _dir_lock = DirLock::acquire(self.ccd_dir())?;

        if !path.is_file() {
            return Err(CcdError::NotFound(client.to_string()));
        }

        fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CcdError::NotFound(client.to_string()),
            _ => CcdError::io(&path, e),
        })?;

        tracing::info!("CCD deleted: {}", client);

        Ok(())
    }

    /// Report every address claimed by more than one record
    pub fn check(&self) -> Result<Vec<Conflict>> {
        audit::check(self.ccd_dir())
    }

    /// The current Used-Address Set
    pub fn used_addresses(&self) -> Result<HashSet<Ipv4Addr>> {
        pool::collect_used_addresses(self.ccd_dir(), &self.config.reserved_set())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the CCD directory path
    pub fn ccd_dir(&self) -> &Path {
        &self.config.ccd_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Write `content` to `temp_path`, sync it, and rename it onto `path`
fn write_record(temp_path: &Path, content: &str, path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| CcdError::io(temp_path, e))?;

    file.write_all(content.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|e| CcdError::io(temp_path, e))?;

    fs::rename(temp_path, path).map_err(|e| CcdError::io(path, e))
}
