//! Tests for the conflict auditor
//!
//! These tests verify:
//! - Clean directories report nothing
//! - Duplicate addresses are reported once per extra claimant
//! - Owners follow filename order
//! - Auditing never modifies the directory

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use ovpn_ccd::audit::{check, Conflict};
use tempfile::TempDir;

fn write_record(dir: &Path, client: &str, addr: &str) {
    fs::write(dir.join(client), format!("ifconfig-push {} 255.255.255.0\n", addr)).unwrap();
}

#[test]
fn test_check_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    assert!(check(&temp_dir.path().join("ccd")).unwrap().is_empty());
}

#[test]
fn test_check_conflict_free() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_record(dir, "alice", "10.8.0.2");
    write_record(dir, "bob", "10.8.0.3");
    fs::write(dir.join("notes"), "# no push line\n").unwrap();

    assert!(check(dir).unwrap().is_empty());
}

#[test]
fn test_check_two_records_same_address() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_record(dir, "client_b", "10.8.0.5");
    write_record(dir, "client_a", "10.8.0.5");

    let conflicts = check(dir).unwrap();
    assert_eq!(
        conflicts,
        vec![Conflict {
            address: Ipv4Addr::new(10, 8, 0, 5),
            first_owner: "client_a".to_string(),
            conflicting_owner: "client_b".to_string(),
        }]
    );
    assert_eq!(
        conflicts[0].to_string(),
        "IP 10.8.0.5 used by client_a and client_b"
    );
}

#[test]
fn test_check_three_way_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_record(dir, "a", "10.8.0.7");
    write_record(dir, "b", "10.8.0.7");
    write_record(dir, "c", "10.8.0.7");
    write_record(dir, "d", "10.8.0.8");

    let conflicts = check(dir).unwrap();
    assert_eq!(conflicts.len(), 2);
    assert!(conflicts.iter().all(|c| c.first_owner == "a"));
    assert_eq!(conflicts[0].conflicting_owner, "b");
    assert_eq!(conflicts[1].conflicting_owner, "c");
}

#[test]
fn test_check_is_read_only() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_record(dir, "a", "10.8.0.7");
    write_record(dir, "b", "10.8.0.7");

    check(dir).unwrap();

    assert!(dir.join("a").exists());
    assert!(dir.join("b").exists());
    assert_eq!(check(dir).unwrap().len(), 1);
}
