//! Serial line normalisation
//!
//! The interpreter expects lines with no whitespace and upper-case letters.
//! [`normalize_line`] produces that form from raw operator input.

/// Drop whitespace and control characters and upper-case ASCII letters
pub fn normalize_line(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
