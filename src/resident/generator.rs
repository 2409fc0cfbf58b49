//! Resident profile generation
//!
//! Builds the person behind an admission: demographics, diagnoses, allergies,
//! prescriptions, physician and emergency contact. Stay decisions belong to the
//! lifecycle simulator, not here.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::facility::Home;
use crate::reference::{
    NameSource, ALLERGIES, DIAGNOSES, MEDICATIONS, PHYSICIANS, RELATIONSHIPS,
};
use crate::resident::resident::{Medication, Resident};
use crate::simulation::horizon::start_of_day;
use crate::types::{AdlLevel, BedId, Gender, ResidentId, UserId};

/// Chance that the emergency contact shares the resident's family name
const SHARED_SURNAME_PROBABILITY: f64 = 0.7;

/// Builds resident profiles from the reference pools
#[derive(Debug, Clone, Copy)]
pub struct ResidentGenerator<'a> {
    names: &'a dyn NameSource,
}

impl<'a> ResidentGenerator<'a> {
    /// Create a generator using `names` for personal text
    pub fn new(names: &'a dyn NameSource) -> Self {
        Self { names }
    }

    /// New active resident of `home` in `bed_id`, admitted on `admission_date`
    pub fn generate(
        &self,
        home: &Home,
        bed_id: BedId,
        admission_date: NaiveDate,
        created_by: UserId,
        rng: &mut dyn RngCore,
    ) -> Resident {
        let gender = if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female };
        let first_name = self.names.first_name(Some(gender), rng);
        let last_name = self.names.last_name(rng);

        let age: i64 = rng.gen_range(65..=95);
        let date_of_birth = admission_date - Duration::days(age * 365 + rng.gen_range(0..=364));

        let diagnosis_count = rng.gen_range(1..=4);
        let diagnoses = DIAGNOSES
            .choose_multiple(rng, diagnosis_count)
            .map(|diagnosis| diagnosis.to_string())
            .collect();

        let allergy_count = rng.gen_range(0..=3);
        let allergies =
            ALLERGIES.choose_multiple(rng, allergy_count).map(|allergy| allergy.to_string()).collect();

        let medication_count = rng.gen_range(3..=8);
        let mut formulary: Vec<_> = MEDICATIONS.iter().collect();
        formulary.shuffle(rng);
        let mut medications: Vec<Medication> = Vec::with_capacity(medication_count);
        for drug in formulary {
            if medications.len() == medication_count {
                break;
            }
            // one strength per drug
            if medications.iter().any(|existing| existing.name == drug.name) {
                continue;
            }
            medications.push(Medication {
                name: drug.name.to_string(),
                dosage: drug.dosage.to_string(),
                route: drug.route.to_string(),
            });
        }

        let physician = PHYSICIANS.choose(rng).copied().unwrap_or(PHYSICIANS[0]);

        let contact_last = if rng.gen_bool(SHARED_SURNAME_PROBABILITY) {
            last_name.clone()
        } else {
            self.names.last_name(rng)
        };
        let contact_first = self.names.first_name(None, rng);
        let emergency_contact_phone = self.names.phone_number(home.area_code(), rng);
        let relationship = RELATIONSHIPS.choose(rng).copied().unwrap_or("Family");
        let adl_baseline = AdlLevel::BASELINES.choose(rng).copied().unwrap_or(AdlLevel::Independent);

        let admitted_at = start_of_day(admission_date);
        Resident {
            id: ResidentId::generate(rng),
            home_id: home.id,
            bed_id,
            first_name,
            last_name,
            gender,
            date_of_birth,
            admission_date,
            admitted_at,
            discharge_date: None,
            discharge_reason: None,
            discharge_kind: None,
            is_active: true,
            diagnoses,
            allergies,
            medications,
            primary_physician: physician.name.to_string(),
            primary_physician_phone: physician.phone.to_string(),
            emergency_contact_name: format!("{} {}", contact_first, contact_last),
            emergency_contact_phone,
            emergency_contact_relationship: relationship.to_string(),
            adl_baseline,
            created_at: admitted_at,
            created_by_id: created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::HomeGenerator;
    use crate::reference::BuiltinNameSource;
    use crate::simulation::horizon::SimulationHorizon;
    use crate::types::SimulationConfig;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_profile_ranges() {
        let names = BuiltinNameSource::new();
        let horizon =
            SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 730);
        let mut rng = StdRng::seed_from_u64(12);
        let admin = UserId::generate(&mut rng);
        let mut homes = HomeGenerator::with_seed(1);
        let home = homes
            .generate_home(0, &SimulationConfig::default(), &horizon, admin, &names)
            .unwrap();
        let bed = homes.generate_beds(&home)[0].id;
        let generator = ResidentGenerator::new(&names);

        for _ in 0..200 {
            let admission = home.opening_date() + Duration::days(10);
            let resident = generator.generate(&home, bed, admission, admin, &mut rng);

            assert!((64..=95).contains(&resident.age_on(admission)), "{}", resident.age_on(admission));
            assert!((1..=4).contains(&resident.diagnoses.len()));
            assert!(resident.allergies.len() <= 3);
            assert!((3..=8).contains(&resident.medications.len()));
            assert!(resident.is_active);
            assert_eq!(resident.admitted_at, start_of_day(admission));
            assert_eq!(resident.home_id, home.id);
        }
    }
}
