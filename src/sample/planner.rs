// Interval planner
// Chooses which byte windows of a file get hashed
//
// Every plan starts with the two mandatory windows (file head and file tail), fills the
// remaining slots either at evenly spaced positions or from a generator seeded by a phrase,
// then shifts colliding windows forward in one sorted pass and drops anything pushed past EOF.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::SampleError;

/// How the interior windows are placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "phrase", rename_all = "lowercase")]
pub enum PlanMode {
    /// Evenly spaced between head and tail; independent of any phrase
    Uniform,
    /// Drawn from a ChaCha20 generator keyed by SHA-256 of the phrase
    Seeded(String),
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanMode::Uniform => write!(f, "uniform"),
            PlanMode::Seeded(phrase) => write!(f, "seeded (\"{}\")", phrase),
        }
    }
}

/// A half-open byte range `[start, end)` of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

impl Window {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Ordered, non-overlapping sample windows for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan {
    file_len: u64,
    width: u64,
    requested: u64,
    mode: PlanMode,
    offsets: Vec<u64>,
}

impl SamplePlan {
    /// Start offsets, ascending
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn mode(&self) -> &PlanMode {
        &self.mode
    }

    /// Number of windows that were asked for
    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// True when overlap shifting pushed windows past the end of the file
    pub fn is_underfilled(&self) -> bool {
        (self.offsets.len() as u64) < self.requested
    }

    /// Windows in file order, the last one clipped at end of file
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        self.offsets.iter().map(move |&start| Window {
            start,
            end: start.saturating_add(self.width).min(self.file_len),
        })
    }

    /// Total number of bytes the plan reads
    pub fn sampled_bytes(&self) -> u64 {
        self.windows().map(|w| w.len()).sum()
    }
}

/// Plan the sample windows for a file
///
/// Fails with `RangeTooLarge` when `width * count` exceeds the file length, before any
/// I/O happens. The plan may hold fewer than `count` windows in seeded mode; check
/// [`SamplePlan::is_underfilled`].
pub fn plan(
    file_len: u64,
    width: u64,
    count: u64,
    mode: &PlanMode,
) -> Result<SamplePlan, SampleError> {
    if count < 2 {
        return Err(SampleError::InvalidSampleCount { count });
    }
    if width == 0 {
        return Err(SampleError::invalid_size("0", "sample width must be at least 1 byte"));
    }

    let needed = width as u128 * count as u128;
    if needed > file_len as u128 {
        return Err(SampleError::RangeTooLarge {
            width,
            count,
            needed,
            file_len,
        });
    }

    let tail = file_len - width;
    let mut offsets = Vec::with_capacity(count as usize);
    offsets.push(0);
    offsets.push(tail);

    match mode {
        PlanMode::Uniform => offsets.extend(uniform_offsets(tail, count)),
        PlanMode::Seeded(phrase) => {
            let mut rng = seeded_rng(phrase);
            offsets.extend((2..count).map(|_| rng.gen_range(0..=file_len)));
        }
    }

    offsets.sort_unstable();
    resolve_overlaps(&mut offsets, width);
    offsets.retain(|&offset| offset < file_len);

    tracing::debug!(
        file_len,
        width,
        requested = count,
        planned = offsets.len(),
        mode = %mode,
        "planned sample windows"
    );

    Ok(SamplePlan {
        file_len,
        width,
        requested: count,
        mode: mode.clone(),
        offsets,
    })
}

/// Interior offsets `round(i * span / (count - 1))` for `i` in `1..count-1`
fn uniform_offsets(span: u64, count: u64) -> impl Iterator<Item = u64> {
    let span = span as u128;
    let steps = (count - 1) as u128;
    // round half up: (2 * i * span + steps) / (2 * steps)
    (1..count - 1).map(move |i| ((2 * i as u128 * span + steps) / (2 * steps)) as u64)
}

/// Generator for seeded plans; the same phrase always yields the same stream
pub fn seeded_rng(phrase: &str) -> ChaCha20Rng {
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&Sha256::digest(phrase.as_bytes()));
    ChaCha20Rng::from_seed(seed)
}

/// Push each offset forward until its window no longer overlaps its predecessor
///
/// `offsets` must already be sorted. Single left-to-right pass; earlier offsets never move.
pub fn resolve_overlaps(offsets: &mut [u64], width: u64) {
    for i in 1..offsets.len() {
        let min_start = offsets[i - 1].saturating_add(width);
        if offsets[i] < min_start {
            offsets[i] = min_start;
        }
    }
}
