use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Lengths accepted for a product barcode (EAN-8, UPC-A, EAN-13, GTIN-14).
pub const VALID_BARCODE_LENGTHS: [usize; 4] = [8, 12, 13, 14];

/// Reasons a raw string is not a usable barcode.
///
/// The `Display` output is sent verbatim to API clients, so each message
/// names the rule that was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    #[error("Barcode is required")]
    Missing,
    #[error("Barcode must contain only digits")]
    NotDigits,
    #[error("Invalid barcode length. Must be one of: 8, 12, 13, 14 digits")]
    InvalidLength(usize),
}

/// A validated, digit-only product barcode.
///
/// The only way to obtain one is [`Barcode::parse`], so holding a `Barcode`
/// means the value already passed every check in the documented order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    /// Validates `raw`, checking presence, then digits, then length.
    pub fn parse(raw: &str) -> Result<Self, BarcodeError> {
        if raw.is_empty() {
            return Err(BarcodeError::Missing);
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BarcodeError::NotDigits);
        }
        if !VALID_BARCODE_LENGTHS.contains(&raw.len()) {
            return Err(BarcodeError::InvalidLength(raw.len()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
