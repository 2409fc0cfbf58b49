//! Incident numbers
//!
//! An incident number reads `<T>IR<HH><NNNN><C>`:
//!
//! - `T` the incident type code (`F`, `M`, `B`, `X`, `I`, `E`, `O`)
//! - `IR` a fixed marker
//! - `HH` the home sequence, base 36, zero-padded to two characters
//! - `NNNN` the per-home incident count, base 36, zero-padded to four
//! - `C` a Luhn mod 36 check character over everything before it
//!
//! All characters come from `0-9A-Z`. The check character catches every
//! single-character substitution and all adjacent transpositions except the
//! `0`/`Z` pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::IncidentType;

/// Symbols in value order
pub const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Radix of the alphabet
const RADIX: u64 = 36;

/// Width of the home code
pub const HOME_CODE_WIDTH: usize = 2;

/// Width of the sequence
pub const SEQUENCE_WIDTH: usize = 4;

/// Total length of an incident number
pub const INCIDENT_NUMBER_LENGTH: usize = 1 + 2 + HOME_CODE_WIDTH + SEQUENCE_WIDTH + 1;

/// Errors building or parsing incident numbers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// A counter does not fit its fixed width
    #[error("{field} value {value} does not fit in {width} base-36 characters")]
    WidthOverflow {
        /// Which component overflowed
        field: &'static str,
        /// Value that did not fit
        value: u64,
        /// Available width
        width: usize,
    },

    /// A character outside `0-9A-Z`
    #[error("'{0}' is not a base-36 character")]
    InvalidCharacter(char),

    /// Wrong overall length
    #[error("incident number must be {expected} characters, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// The `IR` marker is missing or the type code is unknown
    #[error("malformed incident number: {0}")]
    Malformed(String),

    /// The check character does not match the payload
    #[error("check character mismatch: expected '{expected}', found '{found}'")]
    ChecksumMismatch {
        /// Character computed from the payload
        expected: char,
        /// Character present in the number
        found: char,
    },
}

/// Value of a base-36 character; lower-case letters are accepted
pub fn char_value(c: char) -> Result<u32, IdentifierError> {
    c.to_digit(36).ok_or(IdentifierError::InvalidCharacter(c))
}

/// Encode `value` in base 36, left-padded with `0` to `width` characters
pub fn to_base36_padded(
    value: u64,
    width: usize,
    field: &'static str,
) -> Result<String, IdentifierError> {
    let overflow = IdentifierError::WidthOverflow { field, value, width };
    let limit = u32::try_from(width)
        .ok()
        .and_then(|w| RADIX.checked_pow(w))
        .ok_or_else(|| overflow.clone())?;
    if value >= limit {
        return Err(overflow);
    }

    let mut digits = vec![b'0'; width];
    let mut remaining = value;
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(remaining % RADIX) as usize];
        remaining /= RADIX;
    }
    Ok(digits.into_iter().map(char::from).collect())
}

/// Luhn mod 36 check character for `payload`
///
/// Scanning from the right, values are doubled on the rightmost character and
/// every second one after it. A doubled value of 36 or more is folded back as
/// `v / 36 + v % 36`. The check value brings the total to a multiple of 36.
pub fn check_character(payload: &str) -> Result<char, IdentifierError> {
    let mut total = 0u32;
    for (position, c) in payload.chars().rev().enumerate() {
        let mut addend = char_value(c)?;
        if position % 2 == 0 {
            addend *= 2;
            if addend >= RADIX as u32 {
                addend = addend / RADIX as u32 + addend % RADIX as u32;
            }
        }
        total += addend;
    }
    let check = (RADIX as u32 - total % RADIX as u32) % RADIX as u32;
    Ok(char::from(ALPHABET[check as usize]))
}

/// Whether `number` ends in the correct check character for the rest of it
pub fn is_valid(number: &str) -> bool {
    let mut chars = number.chars();
    match chars.next_back() {
        Some(last) => {
            let payload = chars.as_str();
            !payload.is_empty()
                && check_character(payload).map_or(false, |expected| {
                    expected == last.to_ascii_uppercase()
                })
        }
        None => false,
    }
}

/// A validated incident number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IncidentNumber(String);

impl IncidentNumber {
    /// Build the number for the `sequence`-th incident of the home with
    /// `home_sequence`
    pub fn compose(
        incident_type: IncidentType,
        home_sequence: u32,
        sequence: u32,
    ) -> Result<Self, IdentifierError> {
        let home_code = to_base36_padded(u64::from(home_sequence), HOME_CODE_WIDTH, "home code")?;
        let sequence_code = to_base36_padded(u64::from(sequence), SEQUENCE_WIDTH, "sequence")?;
        let payload = format!("{}IR{}{}", incident_type.code(), home_code, sequence_code);
        let check = check_character(&payload)?;
        Ok(Self(format!("{}{}", payload, check)))
    }

    /// The number as text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Incident type encoded in the first character
    pub fn incident_type(&self) -> Option<IncidentType> {
        self.0.get(..1).and_then(|code| code.parse().ok())
    }

    /// Home sequence decoded from the home code
    pub fn home_sequence(&self) -> u32 {
        decode(&self.0[3..3 + HOME_CODE_WIDTH])
    }

    /// Per-home sequence decoded from the sequence field
    pub fn sequence(&self) -> u32 {
        decode(&self.0[3 + HOME_CODE_WIDTH..3 + HOME_CODE_WIDTH + SEQUENCE_WIDTH])
    }
}

fn decode(digits: &str) -> u32 {
    digits.chars().filter_map(|c| c.to_digit(36)).fold(0, |acc, digit| acc * 36 + digit)
}

impl FromStr for IncidentNumber {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        if upper.len() != INCIDENT_NUMBER_LENGTH {
            return Err(IdentifierError::InvalidLength {
                expected: INCIDENT_NUMBER_LENGTH,
                actual: upper.chars().count(),
            });
        }
        if let Some(bad) = upper.chars().find(|c| c.to_digit(36).is_none()) {
            return Err(IdentifierError::InvalidCharacter(bad));
        }
        if upper.get(..1).and_then(|code| code.parse::<IncidentType>().ok()).is_none() {
            return Err(IdentifierError::Malformed(format!("unknown type code in {}", upper)));
        }
        if &upper[1..3] != "IR" {
            return Err(IdentifierError::Malformed(format!("missing IR marker in {}", upper)));
        }

        let (payload, check) = upper.split_at(INCIDENT_NUMBER_LENGTH - 1);
        let expected = check_character(payload)?;
        let found = check.chars().next().unwrap_or('?');
        if expected != found {
            return Err(IdentifierError::ChecksumMismatch { expected, found });
        }
        Ok(Self(upper))
    }
}

impl TryFrom<String> for IncidentNumber {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IncidentNumber> for String {
    fn from(number: IncidentNumber) -> Self {
        number.0
    }
}

impl fmt::Display for IncidentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36_padding() {
        assert_eq!(to_base36_padded(1, 2, "home code").unwrap(), "01");
        assert_eq!(to_base36_padded(35, 2, "home code").unwrap(), "0Z");
        assert_eq!(to_base36_padded(36, 2, "home code").unwrap(), "10");
        assert_eq!(to_base36_padded(1295, 2, "home code").unwrap(), "ZZ");
        assert_eq!(to_base36_padded(3, 4, "sequence").unwrap(), "0003");
    }

    #[test]
    fn test_width_overflow_fails_loudly() {
        assert_eq!(
            to_base36_padded(1296, 2, "home code"),
            Err(IdentifierError::WidthOverflow { field: "home code", value: 1296, width: 2 })
        );
        assert!(IncidentNumber::compose(IncidentType::Fall, 1, 36u32.pow(4)).is_err());
        assert!(IncidentNumber::compose(IncidentType::Fall, 1, 36u32.pow(4) - 1).is_ok());
    }

    #[test]
    fn test_third_fall_in_first_home() {
        let number = IncidentNumber::compose(IncidentType::Fall, 1, 3).unwrap();
        assert_eq!(number.as_str(), "FIR010003X");
        assert_eq!(check_character("FIR010003").unwrap(), 'X');
        assert_eq!(number.home_sequence(), 1);
        assert_eq!(number.sequence(), 3);
        assert_eq!(number.incident_type(), Some(IncidentType::Fall));
    }

    #[test]
    fn test_check_character_independent_recomputation() {
        // F=15 I=18 R=27 0 1 0 0 0 3, doubling from the right
        let values = [15u32, 18, 27, 0, 1, 0, 0, 0, 3];
        let total: u32 = values
            .iter()
            .rev()
            .enumerate()
            .map(|(i, v)| {
                let doubled = if i % 2 == 0 { v * 2 } else { *v };
                doubled / 36 + doubled % 36
            })
            .sum();
        assert_eq!(total, 75);
        assert_eq!(ALPHABET[((36 - total % 36) % 36) as usize], b'X');
    }

    #[test]
    fn test_parse_round_trip_and_rejections() {
        let number = IncidentNumber::compose(IncidentType::Elopement, 37, 1000).unwrap();
        assert_eq!(number.as_str().parse::<IncidentNumber>().unwrap(), number);
        assert_eq!(number.as_str().to_lowercase().parse::<IncidentNumber>().unwrap(), number);

        assert!(matches!("FIR010003".parse::<IncidentNumber>(), Err(IdentifierError::InvalidLength { .. })));
        assert!(matches!("FIR010003Y".parse::<IncidentNumber>(), Err(IdentifierError::ChecksumMismatch { .. })));
        assert!(matches!("FXR010003X".parse::<IncidentNumber>(), Err(IdentifierError::Malformed(_))));
        assert!(matches!("FIR01000-X".parse::<IncidentNumber>(), Err(IdentifierError::InvalidCharacter('-'))));
    }

    #[test]
    fn test_serde_validates() {
        let json = serde_json::to_string(&IncidentNumber::compose(IncidentType::Fall, 1, 3).unwrap()).unwrap();
        assert_eq!(json, "\"FIR010003X\"");
        assert!(serde_json::from_str::<IncidentNumber>("\"FIR010003Y\"").is_err());
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("FIR010003X"));
        assert!(!is_valid("FIR010004X"));
        assert!(!is_valid(""));
        assert!(!is_valid("X"));
    }
}
