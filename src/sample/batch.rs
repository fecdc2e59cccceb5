// Batch driver
// Runs plan + hash for every file of a configuration, isolating per-file failures

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::config::SampleConfig;
use super::error::SampleError;
use super::hasher::{FileTarget, SampleDigest, SampleHasher};
use super::planner::{self, PlanMode};
use super::registry::{AlgorithmEntry, HashRegistry};
use super::size_spec::SizeSpec;

/// Outcome for one file of a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<SampleDigest, SampleError>,
}

/// Counts collected over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files_hashed: usize,
    pub files_failed: usize,
    /// Files whose plan ended up with fewer windows than requested
    pub files_underfilled: usize,
}

/// Engine for sampling and hashing a list of files
pub struct SampleEngine {
    hasher: SampleHasher,
    algorithm: &'static AlgorithmEntry,
    size: SizeSpec,
    count: u64,
    mode: PlanMode,
    parallel: bool,
}

impl SampleEngine {
    /// Build an engine from a configuration
    ///
    /// Runs the fatal configuration checks (algorithm, size syntax, count) before
    /// any file is opened.
    pub fn from_config(config: &SampleConfig) -> Result<Self, SampleError> {
        let algorithm = HashRegistry::lookup(&config.algorithm)?;
        let size = SizeSpec::parse(&config.size_spec)?;
        if config.sample_count < 2 {
            return Err(SampleError::InvalidSampleCount {
                count: config.sample_count,
            });
        }

        Ok(Self {
            hasher: SampleHasher::new().with_window_digests(config.verbose || config.json),
            algorithm,
            size,
            count: config.sample_count,
            mode: config.mode(),
            parallel: config.parallel,
        })
    }

    /// Enable or disable processing files on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the hasher, e.g. to change buffer size or window recording
    pub fn with_hasher(mut self, hasher: SampleHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Open, plan and hash a single file
    pub fn sample_file(&self, path: &Path) -> Result<SampleDigest, SampleError> {
        let mut target = FileTarget::open(path)?;
        let width = self.size.resolve(target.len())?;
        let plan = planner::plan(target.len(), width, self.count, &self.mode)?;

        if plan.is_underfilled() {
            tracing::warn!(
                path = %path.display(),
                planned = plan.len(),
                requested = plan.requested(),
                "fewer samples than requested after overlap shifting"
            );
        }

        self.hasher.hash_target(&mut target, &plan, self.algorithm.name)
    }

    /// Sample every file, returning outcomes in input order
    pub fn sample_all(&self, files: &[PathBuf]) -> Vec<FileOutcome> {
        let outcome = |path: &PathBuf| FileOutcome {
            path: path.clone(),
            result: self.sample_file(path),
        };

        if self.parallel {
            files.par_iter().map(outcome).collect()
        } else {
            files.iter().map(outcome).collect()
        }
    }

    /// Sample every file and hand each outcome to `on_outcome` in input order
    ///
    /// Sequential runs report each file as soon as it is done; parallel runs report
    /// once the whole batch has finished.
    pub fn run<F>(&self, files: &[PathBuf], mut on_outcome: F) -> BatchSummary
    where
        F: FnMut(&FileOutcome),
    {
        let mut summary = BatchSummary::default();
        let mut record = |outcome: FileOutcome| {
            match &outcome.result {
                Ok(digest) => {
                    summary.files_hashed += 1;
                    if digest.plan.is_underfilled() {
                        summary.files_underfilled += 1;
                    }
                }
                Err(err) => {
                    summary.files_failed += 1;
                    tracing::debug!(path = %outcome.path.display(), kind = err.kind(), "file skipped");
                }
            }
            on_outcome(&outcome);
        };

        if self.parallel {
            self.sample_all(files).into_iter().for_each(&mut record);
        } else {
            for path in files {
                record(FileOutcome {
                    path: path.clone(),
                    result: self.sample_file(path),
                });
            }
        }

        summary
    }
}
