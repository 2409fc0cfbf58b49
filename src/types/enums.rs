//! Enumeration types for the care history generator
//!
//! Enumerations that are drawn at random carry their probability table through
//! [`WeightedVariant`]; [`validate_weight_tables`] checks them all before a run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::weighted::{WeightTableError, WeightedVariant};

/// Resident gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Role held by a staff user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Business administrator; assigns caregivers and closes incidents
    Admin,
    /// Platform operator
    Sysadmin,
    /// Direct-care staff assigned to one or more homes
    Caregiver,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "Admin"),
            UserRole::Sysadmin => write!(f, "Sysadmin"),
            UserRole::Caregiver => write!(f, "Caregiver"),
        }
    }
}

/// Administrative bed status. Occupancy is tracked by the ledger, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BedStatus {
    /// In service
    Available,
    /// Withdrawn from service
    OutOfService,
}

/// Assistance level recorded for one activity of daily living
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdlLevel {
    /// Performs the activity without help
    Independent,
    /// Needs some help
    PartialAssist,
    /// Needs full help
    Dependent,
    /// Activity not performed
    NotApplicable,
}

impl AdlLevel {
    /// Baselines a resident can be assigned at admission
    pub const BASELINES: [AdlLevel; 3] =
        [AdlLevel::Independent, AdlLevel::PartialAssist, AdlLevel::Dependent];

    /// Levels observed on a given day for a resident with this baseline.
    /// Repeated entries make a level proportionally more likely.
    pub fn daily_pool(self) -> &'static [AdlLevel] {
        use AdlLevel::*;
        match self {
            Independent => &[Independent, Independent, PartialAssist],
            PartialAssist => &[Independent, PartialAssist, PartialAssist, Dependent],
            Dependent | NotApplicable => &[PartialAssist, Dependent, Dependent],
        }
    }
}

/// Outcome of one scheduled medication pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicationStatus {
    /// Given as scheduled
    Administered,
    /// Resident declined
    Refused,
    /// Given after the scheduled time
    GivenLate,
    /// Given before the scheduled time
    GivenEarly,
    /// Withheld on physician order
    Held,
}

impl WeightedVariant for MedicationStatus {
    const TABLE_NAME: &'static str = "medication_status";
    const ALL: &'static [Self] = &[
        MedicationStatus::Administered,
        MedicationStatus::Refused,
        MedicationStatus::GivenLate,
        MedicationStatus::GivenEarly,
        MedicationStatus::Held,
    ];
    const WEIGHTS: &'static [(Self, f64)] = &[
        (MedicationStatus::Administered, 0.92),
        (MedicationStatus::Refused, 0.04),
        (MedicationStatus::GivenLate, 0.02),
        (MedicationStatus::GivenEarly, 0.01),
        (MedicationStatus::Held, 0.01),
    ];
}

impl MedicationStatus {
    /// Note recorded alongside a non-standard administration
    pub fn note(self) -> Option<&'static str> {
        match self {
            MedicationStatus::Administered => None,
            MedicationStatus::Refused => Some("Resident refused medication. Physician notified."),
            MedicationStatus::Held => Some("Medication held per physician order."),
            MedicationStatus::GivenLate => Some("Administered late due to schedule conflict."),
            MedicationStatus::GivenEarly => Some("Given early per resident request."),
        }
    }
}

/// Category of a behavior note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorCategory {
    /// Conduct and cooperation
    Behavior,
    /// Emotional state
    Mood,
    /// Anything else worth recording
    General,
}

/// Severity attached to a behavior note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorSeverity {
    /// Routine observation
    Low,
    /// Worth watching
    Medium,
    /// Needs follow-up
    High,
}

impl WeightedVariant for BehaviorSeverity {
    const TABLE_NAME: &'static str = "behavior_severity";
    const ALL: &'static [Self] =
        &[BehaviorSeverity::Low, BehaviorSeverity::Medium, BehaviorSeverity::High];
    const WEIGHTS: &'static [(Self, f64)] = &[
        (BehaviorSeverity::Low, 0.70),
        (BehaviorSeverity::Medium, 0.25),
        (BehaviorSeverity::High, 0.05),
    ];
}

/// Category of a scheduled activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityCategory {
    /// Games, films, crafts
    Recreational,
    /// Visits and celebrations
    Social,
    /// Physical exercise
    Exercise,
    /// Everything else
    Other,
}

/// Incident category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    /// Resident fall
    Fall,
    /// Medication administration error
    Medication,
    /// Behavioral episode
    Behavioral,
    /// Acute medical event
    Medical,
    /// Minor injury other than a fall
    Injury,
    /// Resident attempted to leave unsupervised
    Elopement,
    /// Anything else
    Other,
}

impl WeightedVariant for IncidentType {
    const TABLE_NAME: &'static str = "incident_type";
    const ALL: &'static [Self] = &[
        IncidentType::Fall,
        IncidentType::Medication,
        IncidentType::Behavioral,
        IncidentType::Medical,
        IncidentType::Injury,
        IncidentType::Elopement,
        IncidentType::Other,
    ];
    const WEIGHTS: &'static [(Self, f64)] = &[
        (IncidentType::Fall, 0.35),
        (IncidentType::Medication, 0.15),
        (IncidentType::Behavioral, 0.15),
        (IncidentType::Medical, 0.15),
        (IncidentType::Injury, 0.10),
        (IncidentType::Other, 0.08),
        (IncidentType::Elopement, 0.02),
    ];
}

impl IncidentType {
    /// Leading character of the incident number
    pub fn code(self) -> char {
        match self {
            IncidentType::Fall => 'F',
            IncidentType::Medication => 'M',
            IncidentType::Behavioral => 'B',
            IncidentType::Medical => 'X',
            IncidentType::Injury => 'I',
            IncidentType::Elopement => 'E',
            IncidentType::Other => 'O',
        }
    }

    /// Severity values drawn uniformly for this type; repeats skew the distribution
    pub fn severity_pool(self) -> &'static [u8] {
        match self {
            IncidentType::Fall => &[2, 3, 3, 4],
            IncidentType::Medication => &[2, 2, 3],
            IncidentType::Behavioral => &[1, 2, 2, 3],
            IncidentType::Medical => &[2, 3, 3, 4],
            IncidentType::Injury => &[2, 3, 3, 4],
            IncidentType::Elopement => &[4, 4, 5],
            IncidentType::Other => &[1, 2, 2],
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentType::Fall => write!(f, "Fall"),
            IncidentType::Medication => write!(f, "Medication"),
            IncidentType::Behavioral => write!(f, "Behavioral"),
            IncidentType::Medical => write!(f, "Medical"),
            IncidentType::Injury => write!(f, "Injury"),
            IncidentType::Elopement => write!(f, "Elopement"),
            IncidentType::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for IncidentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fall" | "f" => Ok(IncidentType::Fall),
            "medication" | "m" => Ok(IncidentType::Medication),
            "behavioral" | "b" => Ok(IncidentType::Behavioral),
            "medical" | "x" => Ok(IncidentType::Medical),
            "injury" | "i" => Ok(IncidentType::Injury),
            "elopement" | "e" => Ok(IncidentType::Elopement),
            "other" | "o" => Ok(IncidentType::Other),
            _ => Err(format!("Invalid incident type: {}", s)),
        }
    }
}

/// Workflow state of an incident report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    /// Started but not submitted
    Draft,
    /// Submitted for review
    Submitted,
    /// Being investigated
    UnderReview,
    /// Investigation finished
    Closed,
}

impl WeightedVariant for IncidentStatus {
    const TABLE_NAME: &'static str = "incident_status";
    const ALL: &'static [Self] = &[
        IncidentStatus::Draft,
        IncidentStatus::Submitted,
        IncidentStatus::UnderReview,
        IncidentStatus::Closed,
    ];
    const WEIGHTS: &'static [(Self, f64)] = &[
        (IncidentStatus::Closed, 0.75),
        (IncidentStatus::UnderReview, 0.15),
        (IncidentStatus::Submitted, 0.08),
        (IncidentStatus::Draft, 0.02),
    ];
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentStatus::Draft => write!(f, "Draft"),
            IncidentStatus::Submitted => write!(f, "Submitted"),
            IncidentStatus::UnderReview => write!(f, "Under Review"),
            IncidentStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// Kind of external or in-home appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentType {
    /// Primary care visit
    GeneralPractice,
    /// Dentist
    Dental,
    /// Eye specialist
    Ophthalmology,
    /// Foot care
    Podiatry,
    /// Physical therapy session
    PhysicalTherapy,
    /// Occupational therapy session
    OccupationalTherapy,
    /// Heart specialist
    Cardiology,
    /// Nerve and brain specialist
    Neurology,
    /// Skin specialist
    Dermatology,
    /// Mental health review
    Psychiatry,
    /// Blood draw or lab tests
    LabWork,
    /// X-ray or scan
    Imaging,
    /// Hearing check
    Audiology,
    /// Speech therapy session
    SpeechTherapy,
    /// Social worker visit
    SocialWorker,
    /// Scheduled family visit
    FamilyVisit,
}

impl WeightedVariant for AppointmentType {
    const TABLE_NAME: &'static str = "appointment_type";
    const ALL: &'static [Self] = &[
        AppointmentType::GeneralPractice,
        AppointmentType::Dental,
        AppointmentType::Ophthalmology,
        AppointmentType::Podiatry,
        AppointmentType::PhysicalTherapy,
        AppointmentType::OccupationalTherapy,
        AppointmentType::Cardiology,
        AppointmentType::Neurology,
        AppointmentType::Dermatology,
        AppointmentType::Psychiatry,
        AppointmentType::LabWork,
        AppointmentType::Imaging,
        AppointmentType::Audiology,
        AppointmentType::SpeechTherapy,
        AppointmentType::SocialWorker,
        AppointmentType::FamilyVisit,
    ];
    const WEIGHTS: &'static [(Self, f64)] = &[
        (AppointmentType::GeneralPractice, 0.25),
        (AppointmentType::Dental, 0.10),
        (AppointmentType::Ophthalmology, 0.08),
        (AppointmentType::Podiatry, 0.08),
        (AppointmentType::PhysicalTherapy, 0.08),
        (AppointmentType::OccupationalTherapy, 0.05),
        (AppointmentType::Cardiology, 0.07),
        (AppointmentType::Neurology, 0.05),
        (AppointmentType::Dermatology, 0.04),
        (AppointmentType::Psychiatry, 0.04),
        (AppointmentType::LabWork, 0.06),
        (AppointmentType::Imaging, 0.03),
        (AppointmentType::Audiology, 0.03),
        (AppointmentType::SpeechTherapy, 0.02),
        (AppointmentType::SocialWorker, 0.01),
        (AppointmentType::FamilyVisit, 0.01),
    ];
}

impl AppointmentType {
    /// Therapy visits are sometimes done in the home
    pub fn is_therapy(self) -> bool {
        matches!(
            self,
            AppointmentType::PhysicalTherapy
                | AppointmentType::OccupationalTherapy
                | AppointmentType::SpeechTherapy
        )
    }
}

/// Status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    /// Not yet happened
    Scheduled,
    /// Attended
    Completed,
    /// Called off in advance
    Cancelled,
    /// Resident did not attend
    NoShow,
    /// Moved to another slot
    Rescheduled,
}

/// How a past appointment turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentOutcome {
    /// Attended
    Completed,
    /// Called off in advance
    Cancelled,
    /// Resident did not attend
    NoShow,
    /// Moved to another slot
    Rescheduled,
}

impl WeightedVariant for AppointmentOutcome {
    const TABLE_NAME: &'static str = "appointment_outcome";
    const ALL: &'static [Self] = &[
        AppointmentOutcome::Completed,
        AppointmentOutcome::Cancelled,
        AppointmentOutcome::NoShow,
        AppointmentOutcome::Rescheduled,
    ];
    const WEIGHTS: &'static [(Self, f64)] = &[
        (AppointmentOutcome::Completed, 0.80),
        (AppointmentOutcome::Cancelled, 0.12),
        (AppointmentOutcome::NoShow, 0.05),
        (AppointmentOutcome::Rescheduled, 0.03),
    ];
}

impl From<AppointmentOutcome> for AppointmentStatus {
    fn from(outcome: AppointmentOutcome) -> Self {
        match outcome {
            AppointmentOutcome::Completed => AppointmentStatus::Completed,
            AppointmentOutcome::Cancelled => AppointmentStatus::Cancelled,
            AppointmentOutcome::NoShow => AppointmentStatus::NoShow,
            AppointmentOutcome::Rescheduled => AppointmentStatus::Rescheduled,
        }
    }
}

/// Kind of resident document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Individualized care plan
    CarePlan,
    /// Treatment or media consent
    ConsentForm,
    /// Insurance summary
    Insurance,
    /// Copy of identification
    Identification,
    /// Power of attorney, advance directive or POLST
    Legal,
    /// Physical examination report
    MedicalReport,
}

impl DocumentType {
    /// Lowercase stem used in generated file names
    pub fn file_stem(self) -> &'static str {
        match self {
            DocumentType::CarePlan => "care_plan",
            DocumentType::ConsentForm => "consent",
            DocumentType::Insurance => "insurance",
            DocumentType::Identification => "id_copy",
            DocumentType::Legal => "legal",
            DocumentType::MedicalReport => "medical_report",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::CarePlan => write!(f, "Care Plan"),
            DocumentType::ConsentForm => write!(f, "Consent Form"),
            DocumentType::Insurance => write!(f, "Insurance"),
            DocumentType::Identification => write!(f, "Identification"),
            DocumentType::Legal => write!(f, "Legal"),
            DocumentType::MedicalReport => write!(f, "Medical Report"),
        }
    }
}

/// How a residency ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DischargeKind {
    /// Decided at admission time together with the stay length
    Scheduled,
    /// Triggered by the per-step hazard on a long open stay
    Attrition,
}

impl fmt::Display for DischargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DischargeKind::Scheduled => write!(f, "scheduled"),
            DischargeKind::Attrition => write!(f, "attrition"),
        }
    }
}

/// Validate every probability table attached to an enumeration
pub fn validate_weight_tables() -> Result<(), WeightTableError> {
    MedicationStatus::validate_weights()?;
    BehaviorSeverity::validate_weights()?;
    IncidentType::validate_weights()?;
    IncidentStatus::validate_weights()?;
    AppointmentType::validate_weights()?;
    AppointmentOutcome::validate_weights()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_weight_tables_validate() {
        assert_eq!(validate_weight_tables(), Ok(()));
    }

    #[test]
    fn test_incident_type_codes_are_distinct() {
        let mut codes: Vec<char> = IncidentType::ALL.iter().map(|t| t.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), IncidentType::ALL.len());
    }

    #[test]
    fn test_severity_pools_in_range() {
        for incident_type in IncidentType::ALL {
            for severity in incident_type.severity_pool() {
                assert!((1..=5).contains(severity));
            }
        }
        assert!(IncidentType::Elopement.severity_pool().iter().all(|s| *s >= 4));
        assert!(IncidentType::Other.severity_pool().iter().all(|s| *s <= 2));
    }

    #[test]
    fn test_incident_type_from_str() {
        assert_eq!("fall".parse::<IncidentType>(), Ok(IncidentType::Fall));
        assert_eq!("X".parse::<IncidentType>(), Ok(IncidentType::Medical));
        assert!("flood".parse::<IncidentType>().is_err());
    }

    #[test]
    fn test_medication_note_only_for_exceptions() {
        assert!(MedicationStatus::Administered.note().is_none());
        for status in &MedicationStatus::ALL[1..] {
            assert!(status.note().is_some());
        }
    }

    #[test]
    fn test_adl_pools_follow_baseline() {
        assert!(!AdlLevel::Independent.daily_pool().contains(&AdlLevel::Dependent));
        assert!(!AdlLevel::Dependent.daily_pool().contains(&AdlLevel::Independent));
    }
}
