//! Tests for the pool scanner
//!
//! These tests verify:
//! - Missing directory yields only the reserved set
//! - Record addresses and reserved addresses are unioned
//! - Unparseable records and subdirectories claim nothing

use std::collections::HashSet;
use std::fs;
use std::net::Ipv4Addr;

use ovpn_ccd::pool::collect_used_addresses;
use tempfile::TempDir;

fn addr(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 8, 0, last)
}

#[test]
fn test_missing_directory_returns_reserved() {
    let temp_dir = TempDir::new().unwrap();
    let reserved: HashSet<Ipv4Addr> = [addr(1)].into_iter().collect();

    let used = collect_used_addresses(&temp_dir.path().join("ccd"), &reserved).unwrap();
    assert_eq!(used, reserved);
}

#[test]
fn test_empty_directory_no_reserved() {
    let temp_dir = TempDir::new().unwrap();
    let used = collect_used_addresses(temp_dir.path(), &HashSet::new()).unwrap();
    assert!(used.is_empty());
}

#[test]
fn test_union_of_records_and_reserved() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("alice"), "ifconfig-push 10.8.0.2 255.255.255.0\n").unwrap();
    fs::write(dir.join("bob"), "ifconfig-push 10.8.0.3 255.255.255.0\n").unwrap();

    let reserved: HashSet<Ipv4Addr> = [addr(1), addr(3)].into_iter().collect();
    let used = collect_used_addresses(dir, &reserved).unwrap();

    let expected: HashSet<Ipv4Addr> = [addr(1), addr(2), addr(3)].into_iter().collect();
    assert_eq!(used, expected);
}

#[test]
fn test_unparseable_and_nested_claim_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("empty"), "").unwrap();
    fs::write(dir.join("garbage"), "ifconfig-push 10.8.0.x 255.255.255.0\n").unwrap();
    fs::create_dir(dir.join("sub")).unwrap();
    fs::write(dir.join("sub").join("hidden"), "ifconfig-push 10.8.0.9 255.255.255.0\n").unwrap();

    let used = collect_used_addresses(dir, &HashSet::new()).unwrap();
    assert!(used.is_empty());
}
