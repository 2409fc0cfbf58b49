//! Resident record

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::horizon::SimulationHorizon;
use crate::types::{AdlLevel, BedId, DischargeKind, Gender, HomeId, ResidentId, UserId};

/// A prescribed medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    /// Drug name
    pub name: String,
    /// Dose per administration
    pub dosage: String,
    /// Route of administration
    pub route: String,
}

/// A person living in a home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    /// Unique identifier
    pub id: ResidentId,
    /// Home the resident lives in
    pub home_id: HomeId,
    /// Bed held for the whole stay
    pub bed_id: BedId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Gender
    pub gender: Gender,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Admission date
    pub admission_date: NaiveDate,
    /// Admission instant, midnight of the admission date
    pub admitted_at: DateTime<Utc>,
    /// Discharge date, exclusive end of the stay
    pub discharge_date: Option<NaiveDate>,
    /// Why the resident left
    pub discharge_reason: Option<String>,
    /// Whether the discharge was decided at admission or by attrition
    pub discharge_kind: Option<DischargeKind>,
    /// True while no discharge is recorded
    pub is_active: bool,
    /// Diagnoses on file
    pub diagnoses: Vec<String>,
    /// Known allergies
    pub allergies: Vec<String>,
    /// Current prescriptions
    pub medications: Vec<Medication>,
    /// Primary care physician
    pub primary_physician: String,
    /// Physician office phone
    pub primary_physician_phone: String,
    /// Emergency contact name
    pub emergency_contact_name: String,
    /// Emergency contact phone
    pub emergency_contact_phone: String,
    /// Emergency contact relationship
    pub emergency_contact_relationship: String,
    /// Usual level of help needed with daily living
    pub adl_baseline: AdlLevel,
    /// Record creation instant
    pub created_at: DateTime<Utc>,
    /// Caregiver who admitted the resident
    pub created_by_id: UserId,
}

impl Resident {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on `date`
    pub fn age_on(&self, date: NaiveDate) -> i32 {
        let mut age = date.year() - self.date_of_birth.year();
        if (date.month(), date.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            age -= 1;
        }
        age
    }

    /// Whether any diagnosis is a dementia
    pub fn has_dementia(&self) -> bool {
        self.diagnoses.iter().any(|diagnosis| {
            let lower = diagnosis.to_lowercase();
            lower.contains("dementia") || lower.contains("alzheimer")
        })
    }

    /// Whether hypertension is on file
    pub fn has_hypertension(&self) -> bool {
        self.diagnoses.iter().any(|diagnosis| diagnosis.to_lowercase().contains("hypertension"))
    }

    /// Exclusive last day of care: the discharge date, or the horizon end date
    pub fn window_end(&self, horizon: &SimulationHorizon) -> NaiveDate {
        self.discharge_date.map_or(horizon.end_date(), |date| date.min(horizon.end_date()))
    }

    /// Whether the resident lives in the home on `date`
    pub fn is_resident_on(&self, date: NaiveDate) -> bool {
        self.admission_date <= date && self.discharge_date.map_or(true, |end| date < end)
    }

    /// Record the discharge. A resident is discharged at most once.
    pub fn discharge(
        &mut self,
        date: NaiveDate,
        reason: impl Into<String>,
        kind: DischargeKind,
    ) -> SimulationResult<()> {
        if let Some(previous) = self.discharge_date {
            return Err(SimulationError::invariant_violation(format!(
                "resident {} already discharged on {}",
                self.id, previous
            )));
        }
        if date <= self.admission_date {
            return Err(SimulationError::invariant_violation(format!(
                "resident {} cannot leave on {} after arriving on {}",
                self.id, date, self.admission_date
            )));
        }

        self.discharge_date = Some(date);
        self.discharge_reason = Some(reason.into());
        self.discharge_kind = Some(kind);
        self.is_active = false;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::simulation::horizon::start_of_day;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Minimal resident for unit tests
    pub(crate) fn resident(admission: NaiveDate, diagnoses: &[&str]) -> Resident {
        let mut rng = StdRng::seed_from_u64(admission.num_days_from_ce() as u64);
        Resident {
            id: ResidentId::generate(&mut rng),
            home_id: HomeId::generate(&mut rng),
            bed_id: BedId::generate(&mut rng),
            first_name: "Alice".to_string(),
            last_name: "Moore".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1940, 6, 15).unwrap(),
            admission_date: admission,
            admitted_at: start_of_day(admission),
            discharge_date: None,
            discharge_reason: None,
            discharge_kind: None,
            is_active: true,
            diagnoses: diagnoses.iter().map(|d| d.to_string()).collect(),
            allergies: Vec::new(),
            medications: vec![Medication {
                name: "Lisinopril".to_string(),
                dosage: "10mg".to_string(),
                route: "Oral".to_string(),
            }],
            primary_physician: "Dr. Sarah Mitchell".to_string(),
            primary_physician_phone: "(206) 555-0101".to_string(),
            emergency_contact_name: "Bob Moore".to_string(),
            emergency_contact_phone: "(206) 555-0150".to_string(),
            emergency_contact_relationship: "Son".to_string(),
            adl_baseline: AdlLevel::PartialAssist,
            created_at: start_of_day(admission),
            created_by_id: UserId::generate(&mut rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::resident;
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_discharge_once() {
        let mut resident = resident(date(2024, 1, 1), &["Hypertension"]);
        resident.discharge(date(2024, 3, 1), "Deceased", DischargeKind::Scheduled).unwrap();
        assert!(!resident.is_active);
        assert_eq!(resident.discharge_kind, Some(DischargeKind::Scheduled));

        let again = resident.discharge(date(2024, 4, 1), "Deceased", DischargeKind::Attrition);
        assert!(matches!(again, Err(SimulationError::InvariantViolation(_))));
        assert_eq!(resident.discharge_date, Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_discharge_must_follow_admission() {
        let mut resident = resident(date(2024, 1, 1), &[]);
        assert!(resident.discharge(date(2024, 1, 1), "x", DischargeKind::Attrition).is_err());
        assert!(resident.is_active);
    }

    #[test]
    fn test_condition_flags() {
        assert!(resident(date(2024, 1, 1), &["Alzheimer's disease"]).has_dementia());
        assert!(resident(date(2024, 1, 1), &["Vascular dementia"]).has_dementia());
        assert!(!resident(date(2024, 1, 1), &["COPD"]).has_dementia());
        assert!(resident(date(2024, 1, 1), &["Hypertension"]).has_hypertension());
    }

    #[test]
    fn test_age_and_presence() {
        let mut resident = resident(date(2024, 1, 1), &[]);
        assert_eq!(resident.age_on(date(2024, 6, 14)), 83);
        assert_eq!(resident.age_on(date(2024, 6, 15)), 84);

        resident.discharge(date(2024, 2, 1), "Deceased", DischargeKind::Scheduled).unwrap();
        assert!(resident.is_resident_on(date(2024, 1, 31)));
        assert!(!resident.is_resident_on(date(2024, 2, 1)));
        assert!(!resident.is_resident_on(date(2023, 12, 31)));
    }
}
