//! Tests for incident numbers and their Luhn mod 36 check character
//!
//! These tests verify the fixed format, the worked example for the third fall
//! of the first home, and the error-detection properties of the check
//! character.

use care_history_simulator::events::{
    check_character, is_valid, HomeIncidentCounter, IdentifierError, IncidentNumber, ALPHABET,
    INCIDENT_NUMBER_LENGTH,
};
use care_history_simulator::types::{IncidentType, WeightedVariant};
use proptest::prelude::*;

/// Independent recomputation of the check character, scanning left to right
fn recompute(payload: &str) -> char {
    let values: Vec<u32> = payload.chars().map(|c| c.to_digit(36).unwrap()).collect();
    let len = values.len();
    let total: u32 = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let from_right = len - 1 - index;
            if from_right % 2 == 0 {
                let doubled = value * 2;
                doubled / 36 + doubled % 36
            } else {
                *value
            }
        })
        .sum();
    char::from(ALPHABET[((36 - total % 36) % 36) as usize])
}

#[test]
fn test_third_fall_of_first_home() {
    let mut counter = HomeIncidentCounter::new(1);
    counter.next_number(IncidentType::Fall).unwrap();
    counter.next_number(IncidentType::Medication).unwrap();
    let third = counter.next_number(IncidentType::Fall).unwrap();

    assert_eq!(&third.as_str()[..9], "FIR010003");
    assert_eq!(third.as_str(), "FIR010003X");
    assert_eq!(recompute("FIR010003"), 'X');
    assert_eq!(check_character("FIR010003").unwrap(), 'X');
    assert!(is_valid(third.as_str()));
}

#[test]
fn test_components_decode() {
    let number = IncidentNumber::compose(IncidentType::Elopement, 35, 36).unwrap();
    assert_eq!(number.as_str().len(), INCIDENT_NUMBER_LENGTH);
    assert!(number.as_str().starts_with("EIR0Z0010"));
    assert_eq!(number.incident_type(), Some(IncidentType::Elopement));
    assert_eq!(number.home_sequence(), 35);
    assert_eq!(number.sequence(), 36);
}

#[test]
fn test_width_overflow_fails_loudly() {
    let error = IncidentNumber::compose(IncidentType::Other, 36 * 36, 1).unwrap_err();
    assert!(matches!(error, IdentifierError::WidthOverflow { field: "home code", .. }));

    let error = IncidentNumber::compose(IncidentType::Other, 1, 36 * 36 * 36 * 36).unwrap_err();
    assert!(matches!(error, IdentifierError::WidthOverflow { field: "sequence", .. }));
}

#[test]
fn test_parse_rejects_bad_check_character() {
    let error = "FIR010003Y".parse::<IncidentNumber>().unwrap_err();
    assert_eq!(error, IdentifierError::ChecksumMismatch { expected: 'X', found: 'Y' });
    assert!("FIR010003X".parse::<IncidentNumber>().is_ok());
    assert!("fir010003x".parse::<IncidentNumber>().is_ok());
}

#[test]
fn test_serde_uses_plain_string() {
    let number = IncidentNumber::compose(IncidentType::Fall, 1, 3).unwrap();
    let json = serde_json::to_string(&number).unwrap();
    assert_eq!(json, "\"FIR010003X\"");
    assert!(serde_json::from_str::<IncidentNumber>("\"FIR010003Y\"").is_err());
}

#[test]
fn test_sequence_strictly_increases_per_home() {
    let mut counter = HomeIncidentCounter::new(4);
    let mut previous = 0;
    for index in 0..200 {
        let kind = IncidentType::ALL[index % IncidentType::ALL.len()];
        let number = counter.next_number(kind).unwrap();
        assert!(number.sequence() > previous);
        assert_eq!(number.home_sequence(), 4);
        previous = number.sequence();
    }
    assert_eq!(counter.issued(), 200);
}

#[test]
fn test_only_zero_z_transpositions_go_undetected() {
    let mut checked = 0;
    for home in [1u32, 7, 35, 36, 200] {
        for sequence in (1u32..2000).step_by(7) {
            let kind = IncidentType::ALL[(sequence as usize) % IncidentType::ALL.len()];
            let number = IncidentNumber::compose(kind, home, sequence).unwrap();
            let chars: Vec<char> = number.as_str().chars().collect();

            for index in 0..chars.len() - 1 {
                if chars[index] == chars[index + 1] {
                    continue;
                }
                let mut swapped = chars.clone();
                swapped.swap(index, index + 1);
                let swapped: String = swapped.into_iter().collect();
                checked += 1;

                if is_valid(&swapped) {
                    let mut pair = [chars[index], chars[index + 1]];
                    pair.sort();
                    assert_eq!(pair, ['0', 'Z'], "undetected swap in {}", number);
                }
            }
        }
    }
    assert!(checked > 1000);
}

fn incident_type() -> impl Strategy<Value = IncidentType> {
    prop::sample::select(IncidentType::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_generated_numbers_verify(
        kind in incident_type(),
        home in 1u32..1296,
        sequence in 1u32..1_679_616,
    ) {
        let number = IncidentNumber::compose(kind, home, sequence).unwrap();
        let text = number.as_str();
        prop_assert_eq!(text.len(), INCIDENT_NUMBER_LENGTH);
        prop_assert!(is_valid(text));
        prop_assert_eq!(recompute(&text[..text.len() - 1]), text.chars().last().unwrap());
        prop_assert_eq!(number.home_sequence(), home);
        prop_assert_eq!(number.sequence(), sequence);
        prop_assert_eq!(text.parse::<IncidentNumber>().unwrap(), number.clone());
    }

    #[test]
    fn prop_single_character_mutation_detected(
        kind in incident_type(),
        home in 1u32..1296,
        sequence in 1u32..1_679_616,
        position in 0usize..10,
        replacement in 0usize..36,
    ) {
        let number = IncidentNumber::compose(kind, home, sequence).unwrap();
        let mut chars: Vec<char> = number.as_str().chars().collect();
        let new_char = char::from(ALPHABET[replacement]);
        prop_assume!(chars[position] != new_char);

        chars[position] = new_char;
        let mutated: String = chars.into_iter().collect();
        prop_assert!(!is_valid(&mutated), "{} -> {} still verifies", number, mutated);
    }
}
