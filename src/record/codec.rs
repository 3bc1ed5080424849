//! Record codec
//!
//! Reads the pushed address out of a record and writes new records.
//!
//! Only the first `ifconfig-push` line of a record is honored. Any other
//! line (routes, comments, later push lines) is ignored.

use std::net::Ipv4Addr;

/// Directive that carries the client's address
pub const PUSH_DIRECTIVE: &str = "ifconfig-push";

/// Extract the pushed address from record content
///
/// Returns `None` when no line starts with the push directive, or when the
/// first such line has no parseable IPv4 address as its second token.
pub fn parse_address(content: &str) -> Option<Ipv4Addr> {
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| line.split_whitespace().next() == Some(PUSH_DIRECTIVE))?;

    line.split_whitespace().nth(1)?.parse().ok()
}

/// Produce the full content of a fresh record
pub fn serialize_record(address: Ipv4Addr, netmask: &str) -> String {
    format!("{} {} {}\n", PUSH_DIRECTIVE, address, netmask)
}
