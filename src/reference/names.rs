//! Person name, street address and phone number text
//!
//! The generators only need "a plausible name/address/phone"; [`NameSource`] is
//! the seam, [`BuiltinNameSource`] draws from small built-in lists.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::types::Gender;

/// Source of realistic-looking personal text
pub trait NameSource: std::fmt::Debug {
    /// Given name, matched to `gender` when one is supplied
    fn first_name(&self, gender: Option<Gender>, rng: &mut dyn RngCore) -> String;

    /// Family name
    fn last_name(&self, rng: &mut dyn RngCore) -> String;

    /// Street line of an address
    fn street_address(&self, rng: &mut dyn RngCore) -> String;

    /// Phone number, using `area_code` when given
    fn phone_number(&self, area_code: Option<&str>, rng: &mut dyn RngCore) -> String;
}

const MALE_FIRST_NAMES: &[&str] = &[
    "James", "Robert", "John", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Daniel", "Matthew", "Anthony", "Donald", "Mark", "Paul", "Steven", "Andrew",
    "Kenneth", "George", "Edward", "Harold", "Walter", "Arthur", "Eugene", "Ralph", "Frank",
    "Raymond", "Howard", "Gerald",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Mary", "Patricia", "Linda", "Barbara", "Elizabeth", "Jennifer", "Susan", "Margaret",
    "Dorothy", "Nancy", "Karen", "Betty", "Helen", "Sandra", "Donna", "Carol", "Ruth", "Sharon",
    "Michelle", "Laura", "Sarah", "Shirley", "Joyce", "Evelyn", "Frances", "Virginia", "Jean",
    "Alice", "Judith", "Rose",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts",
];

const STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Pine", "Cedar", "Elm", "Lakeview", "Hillcrest", "Madrona", "Alder",
    "Juniper", "Spruce", "Birch", "Willow", "Cascade", "Rainier",
];

const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Way", "Dr", "Ln", "Ct", "Pl", "Blvd"];

const AREA_CODES: &[&str] = &["206", "253", "360", "425", "509"];

/// Default [`NameSource`] backed by built-in lists
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinNameSource;

impl BuiltinNameSource {
    /// Create the built-in name source
    pub fn new() -> Self {
        Self
    }
}

fn pick(pool: &[&str], rng: &mut dyn RngCore) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

impl NameSource for BuiltinNameSource {
    fn first_name(&self, gender: Option<Gender>, rng: &mut dyn RngCore) -> String {
        let gender = gender.unwrap_or_else(|| {
            if rng.gen_bool(0.5) {
                Gender::Male
            } else {
                Gender::Female
            }
        });
        match gender {
            Gender::Male => pick(MALE_FIRST_NAMES, rng),
            Gender::Female => pick(FEMALE_FIRST_NAMES, rng),
        }
    }

    fn last_name(&self, rng: &mut dyn RngCore) -> String {
        pick(LAST_NAMES, rng)
    }

    fn street_address(&self, rng: &mut dyn RngCore) -> String {
        let number = rng.gen_range(100..20_000);
        let street = pick(STREET_NAMES, rng);
        let suffix = pick(STREET_SUFFIXES, rng);
        format!("{} {} {}", number, street, suffix)
    }

    fn phone_number(&self, area_code: Option<&str>, rng: &mut dyn RngCore) -> String {
        let area = match area_code {
            Some(code) => code.to_string(),
            None => pick(AREA_CODES, rng),
        };
        // 555-01xx is reserved for fictional use
        format!("({}) 555-{:04}", area, rng.gen_range(100..200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_name_matches_gender() {
        let names = BuiltinNameSource::new();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let name = names.first_name(Some(Gender::Female), &mut rng);
            assert!(FEMALE_FIRST_NAMES.contains(&name.as_str()));
        }
    }

    #[test]
    fn test_phone_number_format() {
        let names = BuiltinNameSource::new();
        let mut rng = StdRng::seed_from_u64(2);
        let phone = names.phone_number(Some("425"), &mut rng);
        assert!(phone.starts_with("(425) 555-01"), "{}", phone);
        assert_eq!(phone.len(), 14);
    }

    #[test]
    fn test_street_address_has_number() {
        let names = BuiltinNameSource::new();
        let mut rng = StdRng::seed_from_u64(2);
        let address = names.street_address(&mut rng);
        let number: u32 = address.split_whitespace().next().unwrap().parse().unwrap();
        assert!((100..20_000).contains(&number));
    }
}
