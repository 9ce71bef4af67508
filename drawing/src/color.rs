//! Hex colors as the client writes them.
//!
//! DESIGN
//! ======
//! The client keeps colors as the string the user picked (`#000`, `#ff8800cc`,
//! ...). Shorthand forms are only expanded when channels are needed, so two
//! colors are equal when they denote the same RGBA value even if their strings
//! differ.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned by [`HexColor::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must have 3, 4, 6 or 8 hex digits: {0:?}")]
    InvalidLength(String),
    #[error("color contains a non-hex digit: {0:?}")]
    InvalidDigit(String),
}

/// A validated `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` color.
#[derive(Clone, Debug)]
pub struct HexColor(String);

impl HexColor {
    /// Validate and wrap a hex color string.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] when the `#` prefix is missing, the digit count
    /// is not 3, 4, 6 or 8, or a digit is not hexadecimal.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let Some(digits) = value.strip_prefix('#') else {
            return Err(ColorError::MissingHash(value.to_owned()));
        };
        if !matches!(digits.len(), 3 | 4 | 6 | 8) {
            return Err(ColorError::InvalidLength(value.to_owned()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Build the canonical `#rrggbbaa` form from channel values.
    #[must_use]
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }

    /// The string as originally given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green, blue and alpha channels.
    ///
    /// Shorthand digits are doubled (`f` → `ff`); a missing alpha is opaque.
    #[must_use]
    pub fn channels(&self) -> [u8; 4] {
        let digits = &self.0.as_bytes()[1..];
        let nibble = |b: u8| match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            // parse() only admits hex digits
            _ => 0,
        };
        let mut out = [0, 0, 0, 0xff];
        match digits.len() {
            3 | 4 => {
                for (slot, &digit) in out.iter_mut().zip(digits) {
                    *slot = nibble(digit) * 17;
                }
            }
            _ => {
                for (slot, pair) in out.iter_mut().zip(digits.chunks(2)) {
                    *slot = (nibble(pair[0]) << 4) | nibble(pair[1]);
                }
            }
        }
        out
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#000".to_owned())
    }
}

impl PartialEq for HexColor {
    fn eq(&self, other: &Self) -> bool {
        self.channels() == other.channels()
    }
}

impl Eq for HexColor {}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
