//! Record directory access
//!
//! Lists the record files of a CCD directory in filename order and maps
//! client names to record paths.

use std::fs;
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use crate::error::{CcdError, Result};

use super::parse_address;

/// One record file as found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Client common name (the filename)
    pub client: String,

    /// Pushed address, `None` if the record has no parseable push line
    pub address: Option<Ipv4Addr>,
}

/// Read every record in `dir`, sorted by filename
///
/// A missing directory reads as empty. Skipped entries: anything that is
/// not a regular file, hidden names (lock and temp files), and filenames
/// that are not valid UTF-8 (they cannot be OpenVPN common names).
pub fn read_records(dir: &Path) -> Result<Vec<Record>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("CCD directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(CcdError::io(dir, e)),
    };

    let mut records = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| CcdError::io(dir, e))?;
        let path = entry.path();

        // is_file follows symlinks
        if !path.is_file() {
            continue;
        }

        let Some(client) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!("Skipping non UTF-8 filename in {}", dir.display());
            continue;
        };

        if client.starts_with('.') {
            continue;
        }

        let bytes = fs::read(&path).map_err(|e| CcdError::io(&path, e))?;
        let address = parse_address(&String::from_utf8_lossy(&bytes));

        if address.is_none() {
            tracing::warn!("CCD record {} has no parseable ifconfig-push line", client);
        }

        records.push(Record { client, address });
    }

    records.sort_by(|a, b| a.client.cmp(&b.client));

    Ok(records)
}

/// Path of the record for `client` inside `dir`
pub fn record_path(dir: &Path, client: &str) -> Result<PathBuf> {
    validate_client_name(client)?;
    Ok(dir.join(client))
}

/// Hidden path a record for `client` is written to before being renamed
/// into place
pub fn temp_record_path(dir: &Path, client: &str) -> Result<PathBuf> {
    validate_client_name(client)?;
    Ok(dir.join(format!(".{}.tmp", client)))
}

/// Reject names that are not a single plain, non-hidden filename
pub fn validate_client_name(client: &str) -> Result<()> {
    let invalid = client.is_empty()
        || client.starts_with('.')
        || client.contains(&['/', '\\', '\0'][..])
        || client.trim() != client;

    if invalid {
        return Err(CcdError::InvalidClientName(client.to_string()));
    }

    Ok(())
}
