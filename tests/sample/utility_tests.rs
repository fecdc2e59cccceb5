// Tests for wildcard expansion

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use hash_sample::sample::wildcard::{contains_wildcard, expand_all, expand_pattern};
use hash_sample::sample::SampleError;

use super::write_file;

#[test]
fn test_contains_wildcard() {
    assert!(contains_wildcard("*.iso"));
    assert!(contains_wildcard("disk?.img"));
    assert!(contains_wildcard("part[12].bin"));
    assert!(!contains_wildcard("plain.bin"));
}

#[test]
fn test_plain_arguments_pass_through() {
    // Non-existent plain paths are kept so the batch reports them as unreadable
    let files = expand_pattern("no/such/file.bin").unwrap();
    assert_eq!(files, vec![PathBuf::from("no/such/file.bin")]);
}

#[test]
fn test_pattern_matches_files_sorted() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "b.iso", b"b");
    write_file(dir.path(), "a.iso", b"a");
    write_file(dir.path(), "c.txt", b"c");
    fs::create_dir(dir.path().join("d.iso")).unwrap();

    let pattern = format!("{}/*.iso", dir.path().display());
    let files = expand_pattern(&pattern).unwrap();

    assert_eq!(
        files,
        vec![dir.path().join("a.iso"), dir.path().join("b.iso")]
    );
}

#[test]
fn test_pattern_without_matches_is_an_error() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.iso", dir.path().display());
    assert!(matches!(
        expand_pattern(&pattern),
        Err(SampleError::InvalidPattern { .. })
    ));
}

#[test]
fn test_malformed_pattern_is_an_error() {
    assert!(matches!(
        expand_pattern("[unclosed*"),
        Err(SampleError::InvalidPattern { .. })
    ));
}

#[test]
fn test_expand_all_keeps_argument_order() {
    let dir = TempDir::new().unwrap();
    let z = write_file(dir.path(), "z.bin", b"z");
    write_file(dir.path(), "a.img", b"a");

    let args = vec![
        z.display().to_string(),
        format!("{}/*.img", dir.path().display()),
    ];
    let files = expand_all(&args).unwrap();
    assert_eq!(files, vec![z, dir.path().join("a.img")]);
}
