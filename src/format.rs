// ---------------------------------------------------------------------------
// format.rs — Human-scaled byte quantities ("1.50 KB", "3.27 GB")
// ---------------------------------------------------------------------------

/// Named units walked while the value stays >= 1024.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Label used once every named unit is exhausted. No upper bound applies.
const TERMINAL_UNIT: &str = "PB";

const STEP: f64 = 1024.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FormatError {
    #[error("invalid byte count: {0} (expected a non-negative finite number)")]
    InvalidInput(f64),
}

/// Format a byte count as `"<value> <unit>"` with exactly two decimals.
///
/// Negative, NaN and infinite inputs are rejected rather than given a unit.
pub fn format_bytes(bytes: f64) -> Result<String, FormatError> {
    if !bytes.is_finite() || bytes < 0.0 {
        return Err(FormatError::InvalidInput(bytes));
    }

    let mut value = bytes;
    for unit in UNITS {
        if value < STEP {
            return Ok(format!("{value:.2} {unit}"));
        }
        value /= STEP;
    }
    Ok(format!("{value:.2} {TERMINAL_UNIT}"))
}

/// Infallible variant for counts reported by the OS.
pub fn format_u64(bytes: u64) -> String {
    // u64 -> f64 is always finite and non-negative.
    format_bytes(bytes as f64).unwrap_or_else(|_| format!("{bytes} B"))
}
