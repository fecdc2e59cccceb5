// Tests for the hash algorithm registry

use hash_sample::sample::registry::to_hex;
use hash_sample::sample::{HashRegistry, SampleError};

#[test]
fn test_list_contains_common_algorithms() {
    let names = HashRegistry::names();
    for expected in ["md5", "sha1", "sha256", "sha512", "sha3-256", "blake2b", "blake3", "xxh3"] {
        assert!(names.contains(&expected), "missing {}", expected);
    }
    assert_eq!(names.len(), HashRegistry::list_algorithms().len());
}

#[test]
fn test_names_are_unique() {
    let mut names = HashRegistry::names();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), HashRegistry::list_algorithms().len());
}

#[test]
fn test_lookup_is_case_insensitive_and_accepts_aliases() {
    assert_eq!(HashRegistry::lookup("MD5").unwrap().name, "md5");
    assert_eq!(HashRegistry::lookup("SHA-256").unwrap().name, "sha256");
    assert_eq!(HashRegistry::lookup(" sha3_512 ").unwrap().name, "sha3-512");
    assert_eq!(HashRegistry::lookup("Blake2b512").unwrap().name, "blake2b");
    assert_eq!(HashRegistry::lookup("xxh3-128").unwrap().name, "xxh128");
}

#[test]
fn test_unsupported_algorithm() {
    match HashRegistry::lookup("crc32") {
        Err(SampleError::UnsupportedAlgorithm { algorithm }) => assert_eq!(algorithm, "crc32"),
        other => panic!("Expected UnsupportedAlgorithm, got {:?}", other),
    }
    assert!(HashRegistry::get_hasher("").is_err());
}

#[test]
fn test_known_digests() {
    let cases = [
        ("md5", "5eb63bbbe01eeed093cb22bb8f5acdc3"),
        ("sha1", "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"),
        (
            "sha256",
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
        ),
    ];

    for (algorithm, expected) in cases {
        let mut hasher = HashRegistry::get_hasher(algorithm).unwrap();
        hasher.update(b"hello world");
        assert_eq!(to_hex(&hasher.finalize()), expected, "{}", algorithm);
    }
}

#[test]
fn test_split_updates_match_single_update() {
    for entry in HashRegistry::list_algorithms() {
        let mut whole = entry.new_hasher();
        whole.update(b"hello world");

        let mut split = entry.new_hasher();
        split.update(b"hello");
        split.update(b" world");

        assert_eq!(whole.finalize(), split.finalize(), "{}", entry.name);
    }
}

#[test]
fn test_snapshot_leaves_state_untouched() {
    for entry in HashRegistry::list_algorithms() {
        let mut hasher = entry.new_hasher();
        hasher.update(b"hello");
        let early = hasher.snapshot();
        hasher.update(b" world");
        let late = hasher.snapshot();

        let mut reference = entry.new_hasher();
        reference.update(b"hello world");

        assert_ne!(early, late, "{}", entry.name);
        assert_eq!(late, reference.finalize(), "{}", entry.name);
        assert_eq!(hasher.finalize(), late, "{}", entry.name);
    }
}

#[test]
fn test_output_sizes_match_table() {
    for entry in HashRegistry::list_algorithms() {
        let hasher = entry.new_hasher();
        assert_eq!(hasher.output_size() * 8, entry.output_bits, "{}", entry.name);
        assert_eq!(hasher.finalize().len() * 8, entry.output_bits, "{}", entry.name);
    }
}

#[test]
fn test_xxh3_hex_is_big_endian() {
    let mut hasher = HashRegistry::get_hasher("xxh3").unwrap();
    hasher.update(b"hello world");
    let expected = format!("{:016x}", xxhash_rust::xxh3::xxh3_64(b"hello world"));
    assert_eq!(to_hex(&hasher.finalize()), expected);
}

#[test]
fn test_blake3_matches_reference() {
    let data = vec![0xabu8; 300_000];
    let mut hasher = HashRegistry::get_hasher("blake3").unwrap();
    hasher.update(&data);
    assert_eq!(to_hex(&hasher.finalize()), blake3::hash(&data).to_hex().to_string());
}

#[test]
fn test_fast_hashes_are_not_cryptographic() {
    assert!(!HashRegistry::lookup("xxh3").unwrap().cryptographic);
    assert!(!HashRegistry::lookup("xxh128").unwrap().cryptographic);
    assert!(HashRegistry::lookup("sha256").unwrap().cryptographic);
}
