//! Pool Module
//!
//! Address pool bookkeeping on top of the record directory.
//!
//! ## Responsibilities
//! - Collect the Used-Address Set (record addresses + reserved addresses)
//! - Pick the lowest free address in the client pool
//! - Validate explicitly requested (fixed) addresses
//!
//! ## Allocation Flow
//! ```text
//!   collect_used_addresses(ccd_dir, reserved)
//!                 │
//!                 ▼
//!        ┌─────────────────┐   fixed?   ┌──────────────────────────┐
//!        │    allocate     │──────────► │ validate_fixed + in-use? │
//!        └────────┬────────┘            └──────────────────────────┘
//!                 │ otherwise
//!                 ▼
//!   find_next_available(pool_start, pool_end, used)
//! ```

mod allocator;
mod scanner;

pub use allocator::{allocate, find_next_available, validate_fixed};
pub use scanner::collect_used_addresses;
