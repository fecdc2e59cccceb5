// Sampling configuration
// One immutable struct handed to the engine, built from defaults, a TOML file and CLI flags

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::SampleError;
use super::planner::PlanMode;
use super::registry::HashRegistry;
use super::size_spec::SizeSpec;

pub const DEFAULT_ALGORITHM: &str = "md5";
/// Each window is 1% of the file
pub const DEFAULT_SIZE: &str = "1%";
pub const DEFAULT_COUNT: u64 = 10;

const CONFIG_DIR: &str = "hash-sample";
const CONFIG_FILE: &str = "config.toml";

/// Seed phrase used when none is given: today's local date, `YYYY-MM-DD`
pub fn default_seed_phrase() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub algorithm: String,
    pub size_spec: String,
    pub sample_count: u64,
    pub seed_phrase: String,
    pub uniform: bool,
    /// Per-window breakdown instead of a single `digest  path` line
    pub verbose: bool,
    pub json: bool,
    pub parallel: bool,
    pub files: Vec<PathBuf>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            size_spec: DEFAULT_SIZE.to_string(),
            sample_count: DEFAULT_COUNT,
            seed_phrase: default_seed_phrase(),
            uniform: false,
            verbose: true,
            json: false,
            parallel: false,
            files: Vec::new(),
        }
    }
}

impl SampleConfig {
    /// Check everything that can be checked without opening a file
    ///
    /// Every error returned here is fatal for the whole batch.
    pub fn validate(&self) -> Result<(), SampleError> {
        HashRegistry::lookup(&self.algorithm)?;
        SizeSpec::parse(&self.size_spec)?;

        if self.sample_count < 2 {
            return Err(SampleError::InvalidSampleCount {
                count: self.sample_count,
            });
        }
        if self.files.is_empty() {
            return Err(SampleError::config("No files were specified"));
        }

        Ok(())
    }

    /// Window placement mode; uniform ignores the phrase
    pub fn mode(&self) -> PlanMode {
        if self.uniform {
            PlanMode::Uniform
        } else {
            PlanMode::Seeded(self.seed_phrase.clone())
        }
    }
}

/// Optional defaults read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub algorithm: Option<String>,
    pub size: Option<String>,
    pub count: Option<u64>,
    pub phrase: Option<String>,
    pub uniform: Option<bool>,
    pub parallel: Option<bool>,
}

impl ConfigFile {
    /// `<config dir>/hash-sample/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load(path: &Path) -> Result<Self, SampleError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SampleError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&text).map_err(|e| match e {
            SampleError::Config { message } => {
                SampleError::config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    /// Load the file at the default location; a missing file is not an error
    pub fn load_default() -> Result<Option<Self>, SampleError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path).map(Some),
            _ => Ok(None),
        }
    }

    pub fn parse(text: &str) -> Result<Self, SampleError> {
        toml::from_str(text).map_err(|e| SampleError::config(e.to_string()))
    }

    /// Overlay the values present in the file onto `config`
    pub fn apply(&self, config: &mut SampleConfig) {
        if let Some(algorithm) = &self.algorithm {
            config.algorithm = algorithm.clone();
        }
        if let Some(size) = &self.size {
            config.size_spec = size.clone();
        }
        if let Some(count) = self.count {
            config.sample_count = count;
        }
        if let Some(phrase) = &self.phrase {
            config.seed_phrase = phrase.clone();
        }
        if let Some(uniform) = self.uniform {
            config.uniform = uniform;
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }
    }
}
