//! Duration string codec.
//!
//! # Purpose
//! Single source of truth for the `<integer><unit>` retention/deadline
//! encoding accepted by update requests. Units are `s`, `m`, and `h`; the
//! canonical value is whole seconds. The codec never clamps: out-of-range
//! values are passed through and the backend's own rejection is surfaced.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid duration {0:?}: expected <integer> followed by s, m, or h")]
pub struct InvalidDuration(pub String);

/// Parse a duration string into whole seconds.
///
/// Accepts exactly `^\d+(s|m|h)$`. Everything else (empty input, missing
/// unit, sign, decimals, unknown units) is an [`InvalidDuration`].
pub fn parse(text: &str) -> Result<u64, InvalidDuration> {
    let invalid = || InvalidDuration(text.to_string());
    let Some((&unit, digits)) = text.as_bytes().split_last() else {
        return Err(invalid());
    };
    let factor = match unit {
        b's' => 1,
        b'm' => 60,
        b'h' => 3600,
        _ => return Err(invalid()),
    };
    if digits.is_empty() || !digits.iter().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u64 = text[..text.len() - 1].parse().map_err(|_| invalid())?;
    value.checked_mul(factor).ok_or_else(invalid)
}
