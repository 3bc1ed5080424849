//! Tests for record directory access
//!
//! These tests verify:
//! - Missing directories read as empty
//! - Filename ordering and skipping of non-files
//! - Unparseable records are kept with no address
//! - Hidden entries (lock and temp files) are not records
//! - Client name validation

use std::fs;
use std::net::Ipv4Addr;

use ovpn_ccd::record::{
    read_records, record_path, temp_record_path, validate_client_name, Record,
};
use ovpn_ccd::CcdError;
use tempfile::TempDir;

#[test]
fn test_read_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let records = read_records(&temp_dir.path().join("nope")).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_read_sorted_by_filename() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("zeta"), "ifconfig-push 10.8.0.4 255.255.255.0\n").unwrap();
    fs::write(dir.join("alpha"), "ifconfig-push 10.8.0.2 255.255.255.0\n").unwrap();
    fs::write(dir.join("mid"), "ifconfig-push 10.8.0.3 255.255.255.0\n").unwrap();

    let names: Vec<String> = read_records(dir).unwrap().into_iter().map(|r| r.client).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_read_skips_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("inner"), "ifconfig-push 10.8.0.9 255.255.255.0\n").unwrap();
    fs::write(dir.join("client1"), "ifconfig-push 10.8.0.2 255.255.255.0\n").unwrap();

    let records = read_records(dir).unwrap();
    assert_eq!(
        records,
        vec![Record {
            client: "client1".to_string(),
            address: Some(Ipv4Addr::new(10, 8, 0, 2)),
        }]
    );
}

#[test]
fn test_read_skips_hidden_files() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join(".lock"), "").unwrap();
    fs::write(dir.join(".alice.tmp"), "ifconfig-push 10.8.0.2 255.255.255.0\n").unwrap();
    fs::write(dir.join("bob"), "ifconfig-push 10.8.0.3 255.255.255.0\n").unwrap();

    let names: Vec<String> = read_records(dir).unwrap().into_iter().map(|r| r.client).collect();
    assert_eq!(names, vec!["bob"]);
}

#[test]
fn test_read_keeps_unparseable_records() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("broken"), "push \"route 10.0.0.0 255.0.0.0\"\n").unwrap();
    fs::write(dir.join("binary"), b"\xff\xfe\x00\x01").unwrap();

    let records = read_records(dir).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.address.is_none()));
}

#[test]
fn test_record_path_joins_client() {
    let temp_dir = TempDir::new().unwrap();
    let path = record_path(temp_dir.path(), "client7").unwrap();
    assert_eq!(path, temp_dir.path().join("client7"));
}

#[test]
fn test_temp_record_path_is_hidden() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_record_path(temp_dir.path(), "client7").unwrap();
    assert_eq!(path, temp_dir.path().join(".client7.tmp"));
    assert!(temp_record_path(temp_dir.path(), "../x").is_err());
}

#[test]
fn test_client_name_validation() {
    for good in ["client1", "alice", "vpn-user_02", "a.b"] {
        assert!(validate_client_name(good).is_ok(), "{} should be valid", good);
    }

    for bad in ["", ".", "..", ".hidden", "../etc/passwd", "a/b", "a\\b", "nul\0", " padded"] {
        let err = validate_client_name(bad).unwrap_err();
        assert!(matches!(err, CcdError::InvalidClientName(_)), "{:?} should be rejected", bad);
    }
}
