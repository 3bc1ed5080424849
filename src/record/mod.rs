//! Record Module
//!
//! CCD records on disk: one file per client, named after the client's
//! common name, holding the address pushed to it.
//!
//! ## Record Format
//! ```text
//! ifconfig-push <address> <netmask>
//! ```
//!
//! The record directory is the only allocation state. Nothing is cached:
//! every scan reads the directory again. Hidden entries (the lock file,
//! in-flight temp files) are not records.

mod codec;
mod dir;
mod lock;

pub use codec::{parse_address, serialize_record, PUSH_DIRECTIVE};
pub use dir::{read_records, record_path, temp_record_path, validate_client_name, Record};
pub use lock::{DirLock, LOCK_FILENAME};
