// Sample size expressions
// Turns "1%", "4KiB", "1.5MB" or "512" into a window width for a given file length

use super::error::SampleError;

/// Unit suffixes, checked longest first
const SUFFIXES: &[(&str, Unit)] = &[
    ("KiB", Unit::Bytes(1 << 10)),
    ("MiB", Unit::Bytes(1 << 20)),
    ("GiB", Unit::Bytes(1 << 30)),
    ("KB", Unit::Bytes(1_000)),
    ("MB", Unit::Bytes(1_000_000)),
    ("GB", Unit::Bytes(1_000_000_000)),
    ("%", Unit::Percent),
];

// Keeps 100 * 10^scale well inside u128
const MAX_FRACTION_DIGITS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Percent,
    Bytes(u64),
}

/// A parsed, not yet resolved, size expression
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSpec {
    raw: String,
    kind: SizeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeKind {
    /// Share of the file, in percent
    Percent(Decimal),
    /// Decimal count multiplied by a unit
    Scaled { value: Decimal, multiplier: u64 },
    /// Plain byte count
    Bytes(u64),
}

/// Exact non-negative decimal: `mantissa / 10^scale`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal {
    mantissa: u64,
    scale: u32,
}

impl Decimal {
    fn denominator(self) -> u128 {
        10u128.pow(self.scale)
    }

    /// `floor(self * factor / divisor)`, exact
    fn scale_floor(self, factor: u64, divisor: u128) -> u128 {
        // u64 * u64 always fits in u128
        (self.mantissa as u128 * factor as u128) / (divisor * self.denominator())
    }
}

impl SizeSpec {
    /// Parse the expression without knowing the file length yet
    pub fn parse(spec: &str) -> Result<Self, SampleError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(SampleError::invalid_size(spec, "empty size expression"));
        }

        let suffix = SUFFIXES
            .iter()
            .find(|(suffix, _)| trimmed.ends_with(suffix));

        let kind = match suffix {
            Some((suffix, unit)) => {
                let prefix = trimmed[..trimmed.len() - suffix.len()].trim_end();
                let value = parse_decimal(spec, prefix)?;
                match *unit {
                    Unit::Percent => SizeKind::Percent(value),
                    Unit::Bytes(multiplier) => SizeKind::Scaled { value, multiplier },
                }
            }
            None => {
                let bytes = trimmed.parse::<u64>().map_err(|_| {
                    SampleError::invalid_size(spec, format!("'{}' is not a byte count", trimmed))
                })?;
                SizeKind::Bytes(bytes)
            }
        };

        Ok(Self {
            raw: spec.to_string(),
            kind,
        })
    }

    /// Resolve to a concrete width in bytes for a file of `file_len` bytes
    ///
    /// Integer arithmetic throughout, so every caller gets the same width for the same
    /// expression and length.
    pub fn resolve(&self, file_len: u64) -> Result<u64, SampleError> {
        let width: u128 = match self.kind {
            SizeKind::Percent(percent) => percent.scale_floor(file_len, 100),
            SizeKind::Scaled { value, multiplier } => value.scale_floor(multiplier, 1),
            SizeKind::Bytes(bytes) => bytes as u128,
        };

        if width == 0 {
            return Err(SampleError::invalid_size(
                &self.raw,
                format!("resolves to 0 bytes for a {} byte file", file_len),
            ));
        }
        if width > file_len as u128 {
            return Err(SampleError::invalid_size(
                &self.raw,
                format!("{} bytes exceeds the file length of {} bytes", width, file_len),
            ));
        }

        // width <= file_len, so it fits
        Ok(width as u64)
    }

    /// The expression as the user wrote it
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Parse `spec` and resolve it against `file_len` in one step
pub fn parse(spec: &str, file_len: u64) -> Result<u64, SampleError> {
    SizeSpec::parse(spec)?.resolve(file_len)
}

// Only digits with at most one dot; rejects "-1", "1e3", "inf" and "nan"
fn parse_decimal(spec: &str, prefix: &str) -> Result<Decimal, SampleError> {
    let (whole, fraction) = prefix.split_once('.').unwrap_or((prefix, ""));
    let well_formed = !(whole.is_empty() && fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit());

    if !well_formed {
        return Err(SampleError::invalid_size(
            spec,
            format!("'{}' is not a non-negative number", prefix),
        ));
    }

    // Trailing fractional zeros carry no value
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > MAX_FRACTION_DIGITS {
        return Err(SampleError::invalid_size(
            spec,
            format!("'{}' has too many decimal places", prefix),
        ));
    }

    let mut mantissa: u64 = 0;
    for digit in whole.bytes().chain(fraction.bytes()) {
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add((digit - b'0') as u64))
            .ok_or_else(|| {
                SampleError::invalid_size(spec, format!("'{}' has too many digits", prefix))
            })?;
    }

    Ok(Decimal {
        mantissa,
        scale: fraction.len() as u32,
    })
}
