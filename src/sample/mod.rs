// Sampled hashing library
// Size parsing, window planning, streaming hashing and reporting

pub mod batch;
pub mod config;
pub mod error;
pub mod hasher;
pub mod planner;
pub mod registry;
pub mod report;
pub mod size_spec;
pub mod wildcard;

// Re-export commonly used types for convenience
pub use batch::{BatchSummary, FileOutcome, SampleEngine};
pub use config::{ConfigFile, SampleConfig};
pub use error::SampleError;
pub use hasher::{FileTarget, SampleDigest, SampleHasher, WindowDigest};
pub use planner::{plan, resolve_overlaps, PlanMode, SamplePlan, Window};
pub use registry::{AlgorithmEntry, HashRegistry, Hasher};
pub use report::OutputFormat;
pub use size_spec::SizeSpec;
