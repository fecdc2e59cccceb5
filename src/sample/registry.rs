// Hash algorithm registry
// Maps algorithm names to hasher constructors so new algorithms only need a table entry

use super::error::SampleError;

use blake2::{Blake2b512, Blake2s256};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use xxhash_rust::xxh3::Xxh3;

/// Incremental hash accumulator
pub trait Hasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Digest of everything fed so far, leaving the accumulator untouched
    fn snapshot(&self) -> Vec<u8>;

    /// Finalize the hash and return the result
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Get the output size in bytes
    fn output_size(&self) -> usize;
}

/// Wrapper for every RustCrypto `Digest` implementation
pub struct DigestWrapper<D>(D);

impl<D> Hasher for DigestWrapper<D>
where
    D: Digest + Clone + Send,
{
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn snapshot(&self) -> Vec<u8> {
        self.0.clone().finalize().to_vec()
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().to_vec()
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

// BLAKE3 wrapper
// update_rayon spreads large windows across all cores; small inputs stay single-threaded
pub struct Blake3Wrapper(blake3::Hasher);

impl Hasher for Blake3Wrapper {
    fn update(&mut self, data: &[u8]) {
        self.0.update_rayon(data);
    }

    fn snapshot(&self) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        32
    }
}

// XXH3 wrapper (64-bit, big-endian so the hex matches the reference `xxhsum` output)
pub struct Xxh3Wrapper(Xxh3);

impl Hasher for Xxh3Wrapper {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn snapshot(&self) -> Vec<u8> {
        self.0.digest().to_be_bytes().to_vec()
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.snapshot()
    }

    fn output_size(&self) -> usize {
        8
    }
}

pub struct Xxh128Wrapper(Xxh3);

impl Hasher for Xxh128Wrapper {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn snapshot(&self) -> Vec<u8> {
        self.0.digest128().to_be_bytes().to_vec()
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.snapshot()
    }

    fn output_size(&self) -> usize {
        16
    }
}

fn digest_hasher<D>() -> Box<dyn Hasher>
where
    D: Digest + Clone + Send + 'static,
{
    Box::new(DigestWrapper(D::new()))
}

fn blake3_hasher() -> Box<dyn Hasher> {
    Box::new(Blake3Wrapper(blake3::Hasher::new()))
}

fn xxh3_hasher() -> Box<dyn Hasher> {
    Box::new(Xxh3Wrapper(Xxh3::new()))
}

fn xxh128_hasher() -> Box<dyn Hasher> {
    Box::new(Xxh128Wrapper(Xxh3::new()))
}

/// One row of the capability table
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmEntry {
    /// Canonical lowercase name, as printed by `--list`
    pub name: &'static str,
    /// Other spellings accepted on the command line
    pub aliases: &'static [&'static str],
    pub output_bits: usize,
    pub cryptographic: bool,
    constructor: fn() -> Box<dyn Hasher>,
}

impl AlgorithmEntry {
    /// Build a fresh accumulator for this algorithm
    pub fn new_hasher(&self) -> Box<dyn Hasher> {
        (self.constructor)()
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

static ALGORITHMS: &[AlgorithmEntry] = &[
    AlgorithmEntry {
        name: "md5",
        aliases: &[],
        output_bits: 128,
        cryptographic: true,
        constructor: digest_hasher::<Md5>,
    },
    AlgorithmEntry {
        name: "sha1",
        aliases: &["sha-1"],
        output_bits: 160,
        cryptographic: true,
        constructor: digest_hasher::<Sha1>,
    },
    AlgorithmEntry {
        name: "sha224",
        aliases: &["sha-224"],
        output_bits: 224,
        cryptographic: true,
        constructor: digest_hasher::<Sha224>,
    },
    AlgorithmEntry {
        name: "sha256",
        aliases: &["sha-256"],
        output_bits: 256,
        cryptographic: true,
        constructor: digest_hasher::<Sha256>,
    },
    AlgorithmEntry {
        name: "sha384",
        aliases: &["sha-384"],
        output_bits: 384,
        cryptographic: true,
        constructor: digest_hasher::<Sha384>,
    },
    AlgorithmEntry {
        name: "sha512",
        aliases: &["sha-512"],
        output_bits: 512,
        cryptographic: true,
        constructor: digest_hasher::<Sha512>,
    },
    AlgorithmEntry {
        name: "sha3-224",
        aliases: &["sha3_224"],
        output_bits: 224,
        cryptographic: true,
        constructor: digest_hasher::<Sha3_224>,
    },
    AlgorithmEntry {
        name: "sha3-256",
        aliases: &["sha3_256"],
        output_bits: 256,
        cryptographic: true,
        constructor: digest_hasher::<Sha3_256>,
    },
    AlgorithmEntry {
        name: "sha3-384",
        aliases: &["sha3_384"],
        output_bits: 384,
        cryptographic: true,
        constructor: digest_hasher::<Sha3_384>,
    },
    AlgorithmEntry {
        name: "sha3-512",
        aliases: &["sha3_512"],
        output_bits: 512,
        cryptographic: true,
        constructor: digest_hasher::<Sha3_512>,
    },
    AlgorithmEntry {
        name: "blake2b",
        aliases: &["blake2b-512", "blake2b512"],
        output_bits: 512,
        cryptographic: true,
        constructor: digest_hasher::<Blake2b512>,
    },
    AlgorithmEntry {
        name: "blake2s",
        aliases: &["blake2s-256", "blake2s256"],
        output_bits: 256,
        cryptographic: true,
        constructor: digest_hasher::<Blake2s256>,
    },
    AlgorithmEntry {
        name: "blake3",
        aliases: &[],
        output_bits: 256,
        cryptographic: true,
        constructor: blake3_hasher,
    },
    AlgorithmEntry {
        name: "xxh3",
        aliases: &["xxh3-64", "xxh64"],
        output_bits: 64,
        cryptographic: false,
        constructor: xxh3_hasher,
    },
    AlgorithmEntry {
        name: "xxh128",
        aliases: &["xxh3-128"],
        output_bits: 128,
        cryptographic: false,
        constructor: xxh128_hasher,
    },
];

/// Registry for hash algorithms
pub struct HashRegistry;

impl HashRegistry {
    /// Look up an algorithm by name or alias, case-insensitively
    pub fn lookup(algorithm: &str) -> Result<&'static AlgorithmEntry, SampleError> {
        let alg_lower = algorithm.trim().to_lowercase();

        ALGORITHMS
            .iter()
            .find(|entry| entry.matches(&alg_lower))
            .ok_or_else(|| SampleError::UnsupportedAlgorithm {
                algorithm: algorithm.to_string(),
            })
    }

    /// Get a hasher instance for the specified algorithm
    pub fn get_hasher(algorithm: &str) -> Result<Box<dyn Hasher>, SampleError> {
        Self::lookup(algorithm).map(AlgorithmEntry::new_hasher)
    }

    /// List all available hash algorithms
    pub fn list_algorithms() -> &'static [AlgorithmEntry] {
        ALGORITHMS
    }

    /// Canonical names, in table order
    pub fn names() -> Vec<&'static str> {
        ALGORITHMS.iter().map(|entry| entry.name).collect()
    }
}

/// Convert bytes to lowercase hexadecimal string
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
