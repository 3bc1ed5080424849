//! # ovpn-ccd
//!
//! Address allocation for OpenVPN clients through client-config-dir (CCD)
//! records:
//! - One record file per client, pushing one address
//! - The record directory is the only source of truth (no database)
//! - Lowest-free-address allocation from a configured pool
//! - Fixed-address requests validated against the VPN network
//! - Conflict auditing across the whole directory
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CLI  /  Batch Driver                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      CcdStore                                │
//! │        create / list / delete / check  (alloc lock)          │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │   Allocator     │                │ Conflict Auditor│
//!   └────────┬────────┘                └────────┬────────┘
//!            ▼                                  │
//!   ┌─────────────────┐                         │
//!   │  Pool Scanner   │                         │
//!   └────────┬────────┘                         │
//!            ▼                                  ▼
//!   ┌─────────────────────────────────────────────────────┐
//!   │        Record Codec  +  CCD directory on disk        │
//!   └─────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod pool;
pub mod audit;
pub mod store;
pub mod batch;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CcdError, Result};
pub use config::Config;
pub use store::{Assignment, CcdStore, ListEntry};
pub use audit::Conflict;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ovpn-ccd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
