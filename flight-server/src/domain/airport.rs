//! Airport code types.

use std::fmt;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// Longest code we accept (ICAO codes are four characters).
const MAX_LEN: usize = 4;

/// Shortest code we accept (IATA codes are three characters).
const MIN_LEN: usize = 3;

/// A valid 3- or 4-character airport code (IATA or ICAO style).
///
/// Codes are stored as uppercase ASCII letters and digits. This type
/// guarantees that any `AirportCode` value is valid by construction, and it
/// is `Copy` so it can be used freely as an index key.
///
/// # Examples
///
/// ```
/// use flight_server::domain::AirportCode;
///
/// let jfk = AirportCode::parse("JFK").unwrap();
/// assert_eq!(jfk.as_str(), "JFK");
///
/// // Four-character codes are fine
/// assert!(AirportCode::parse("KJFK").is_ok());
///
/// // Lowercase is rejected by `parse`, but accepted by `parse_normalized`
/// assert!(AirportCode::parse("jfk").is_err());
/// assert_eq!(AirportCode::parse_normalized(" jfk ").unwrap(), jfk);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode {
    len: u8,
    bytes: [u8; MAX_LEN],
}

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be 3 or 4 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let raw = s.as_bytes();

        if raw.len() < MIN_LEN || raw.len() > MAX_LEN {
            return Err(InvalidAirportCode {
                reason: "must be 3 or 4 characters",
            });
        }

        let mut bytes = [0u8; MAX_LEN];
        for (slot, &b) in bytes.iter_mut().zip(raw) {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidAirportCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
            *slot = b;
        }

        Ok(Self {
            len: raw.len() as u8,
            bytes,
        })
    }

    /// Parse an airport code, trimming whitespace and uppercasing first.
    ///
    /// Used for dataset records and user input, where "jfk" means "JFK".
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAirportCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored, so this cannot fail.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Z0-9]{3,4}") {
            let code = AirportCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Lowercase input normalizes to the uppercase code
        #[test]
        fn normalized_matches_uppercase(s in "[a-z]{3}") {
            let upper = s.to_ascii_uppercase();
            prop_assert_eq!(
                AirportCode::parse_normalized(&s).unwrap(),
                AirportCode::parse(&upper).unwrap()
            );
        }

        /// Arbitrary input never panics
        #[test]
        fn never_panics(s in ".*") {
            let _ = AirportCode::parse(&s);
            let _ = AirportCode::parse_normalized(&s);
        }
    }
}
