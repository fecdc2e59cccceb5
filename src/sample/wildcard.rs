// Wildcard pattern expansion module
// Expands file arguments such as `*.iso` for shells that pass them through unexpanded

use std::path::PathBuf;

use super::error::SampleError;

/// Expand a wildcard pattern into a list of matching file paths
///
/// Arguments without wildcard characters are returned as-is, even if the file does not
/// exist, so the batch can report it as unreadable. Matches are sorted alphabetically.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, SampleError> {
    if !contains_wildcard(pattern) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let paths = glob::glob(pattern).map_err(|e| SampleError::InvalidPattern {
        message: format!("'{}': {}", pattern, e),
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| SampleError::InvalidPattern {
            message: format!("error reading matches of '{}': {}", pattern, e),
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(SampleError::InvalidPattern {
            message: format!("no files match '{}'", pattern),
        });
    }

    matches.sort();
    Ok(matches)
}

/// Expand every argument, keeping argument order
pub fn expand_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>, SampleError> {
    let mut files = Vec::new();
    for pattern in patterns {
        files.extend(expand_pattern(pattern.as_ref())?);
    }
    Ok(files)
}

/// Check if a string contains wildcard characters
pub fn contains_wildcard(s: &str) -> bool {
    s.contains('*') || s.contains('?') || s.contains('[')
}
