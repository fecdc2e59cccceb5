// Report formatting
// Turns a SampleDigest into the terse checksum line, a verbose breakdown, or JSON

use std::fmt::Write;
use std::path::Path;

use super::hasher::{SampleDigest, WindowDigest};
use super::planner::PlanMode;

/// How each file's result is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<digest>  <path>`, the layout `md5sum` and friends use
    Terse,
    #[default]
    Verbose,
    Json,
}

impl OutputFormat {
    pub fn from_flags(verbose: bool, json: bool) -> Self {
        match (json, verbose) {
            (true, _) => OutputFormat::Json,
            (false, true) => OutputFormat::Verbose,
            (false, false) => OutputFormat::Terse,
        }
    }
}

/// Render one file's result in the requested format
pub fn render(digest: &SampleDigest, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Terse => Ok(terse_line(digest)),
        OutputFormat::Verbose => Ok(verbose_block(digest)),
        OutputFormat::Json => to_json(digest),
    }
}

/// Format: `<hash>  <filepath>` (two spaces between fields)
pub fn terse_line(digest: &SampleDigest) -> String {
    format!("{}  {}", digest.digest, digest.path.display())
}

/// Format: `<filepath> [<kind>]: <message>`, printed to stderr for a file that failed
pub fn failure_line(path: &Path, kind: &str, message: &str) -> String {
    format!("{} [{}]: {}", path.display(), kind, message)
}

/// Multi-line breakdown with one row per window
pub fn verbose_block(digest: &SampleDigest) -> String {
    let plan = &digest.plan;
    let file_len = plan.file_len();
    let share = if file_len > 0 {
        digest.bytes_read as f64 / file_len as f64 * 100.0
    } else {
        0.0
    };

    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", digest.path.display());
    let _ = writeln!(
        out,
        "  size:      {} bytes ({})",
        file_len,
        humansize::format_size(file_len, humansize::BINARY)
    );
    let _ = writeln!(out, "  algorithm: {}", digest.algorithm);
    let _ = writeln!(out, "  mode:      {}", plan.mode());
    let _ = writeln!(
        out,
        "  samples:   {} x {} bytes = {} bytes ({:.2}% of file)",
        plan.len(),
        plan.width(),
        digest.bytes_read,
        share
    );

    let digits = file_len.to_string().len();
    for (index, entry) in digest.windows.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{:>3}] {:>digits$}..{:<digits$}  {}",
            index,
            entry.window.start,
            entry.window.end,
            entry.digest,
            digits = digits
        );
    }

    if plan.is_underfilled() {
        let _ = writeln!(
            out,
            "  note:      only {} of {} requested samples fit after overlap shifting",
            plan.len(),
            plan.requested()
        );
    }

    let _ = write!(out, "  digest:    {}", digest.digest);
    out
}

/// Format the result as a pretty-printed JSON object
pub fn to_json(digest: &SampleDigest) -> Result<String, serde_json::Error> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        path: String,
        algorithm: &'a str,
        digest: &'a str,
        file_len: u64,
        width: u64,
        requested: u64,
        sampled: usize,
        underfilled: bool,
        bytes_read: u64,
        #[serde(flatten)]
        mode: &'a PlanMode,
        windows: &'a [WindowDigest],
    }

    let plan = &digest.plan;
    let output = JsonOutput {
        path: digest.path.display().to_string(),
        algorithm: &digest.algorithm,
        digest: &digest.digest,
        file_len: plan.file_len(),
        width: plan.width(),
        requested: plan.requested(),
        sampled: plan.len(),
        underfilled: plan.is_underfilled(),
        bytes_read: digest.bytes_read,
        mode: plan.mode(),
        windows: &digest.windows,
    };

    serde_json::to_string_pretty(&output)
}
