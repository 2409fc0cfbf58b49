//! Which documents a resident's file holds, and when each was created

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::reference::{FOLLOW_UP_CONSENTS, LEGAL_DOCUMENTS};
use crate::resident::Resident;
use crate::simulation::horizon::SimulationHorizon;
use crate::types::DocumentType;

/// Chance of a follow-up consent form after admission
pub const FOLLOW_UP_CONSENT_PROBABILITY: f64 = 0.5;

/// One document to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    /// Kind of document
    pub document_type: DocumentType,
    /// Consent kind, legal document name or exam kind
    pub subtype: Option<String>,
    /// Creation instant, inside the horizon
    pub created_at: DateTime<Utc>,
}

impl DocumentRequest {
    fn new(document_type: DocumentType, subtype: Option<&str>, created_at: DateTime<Utc>) -> Self {
        Self { document_type, subtype: subtype.map(str::to_string), created_at }
    }
}

/// Plans the document set of each resident around their admission
#[derive(Debug, Clone, Copy)]
pub struct DocumentPlanner {
    horizon: SimulationHorizon,
}

impl DocumentPlanner {
    /// Create a planner over `horizon`
    pub fn new(horizon: SimulationHorizon) -> Self {
        Self { horizon }
    }

    /// Documents for `resident`, in planning order
    pub fn plan(&self, resident: &Resident, rng: &mut dyn RngCore) -> Vec<DocumentRequest> {
        let base = resident.admitted_at;

        let mut plan = vec![
            DocumentRequest::new(DocumentType::CarePlan, None, self.horizon.clamp(base)),
            DocumentRequest::new(DocumentType::ConsentForm, Some("General Treatment"), self.offset(base, -7, 0, rng)),
            DocumentRequest::new(DocumentType::Insurance, None, self.offset(base, -14, 0, rng)),
            DocumentRequest::new(DocumentType::Identification, None, self.offset(base, -7, 0, rng)),
        ];

        let legal_count = rng.gen_range(1..=2);
        let legal: Vec<&str> = LEGAL_DOCUMENTS.choose_multiple(rng, legal_count).copied().collect();
        for name in legal {
            plan.push(DocumentRequest::new(DocumentType::Legal, Some(name), self.offset(base, -30, 7, rng)));
        }

        plan.push(DocumentRequest::new(
            DocumentType::MedicalReport,
            Some("Admission Physical Exam"),
            self.offset(base, -30, 14, rng),
        ));

        let stay_days = (resident.window_end(&self.horizon) - resident.admission_date).num_days();
        if stay_days > 365 {
            plan.push(DocumentRequest::new(
                DocumentType::MedicalReport,
                Some("Annual Physical Exam"),
                self.offset(base, 365 - 14, 365 + 14, rng),
            ));
        }

        if rng.gen_bool(FOLLOW_UP_CONSENT_PROBABILITY) {
            let consent = FOLLOW_UP_CONSENTS.choose(rng).copied();
            plan.push(DocumentRequest::new(DocumentType::ConsentForm, consent, self.offset(base, 7, 90, rng)));
        }

        plan
    }

    /// `base` moved by a random whole number of days in `from..=to`, kept in the horizon
    fn offset(&self, base: DateTime<Utc>, from: i64, to: i64, rng: &mut dyn RngCore) -> DateTime<Utc> {
        self.horizon.clamp(base + Duration::days(rng.gen_range(from..=to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resident::resident::fixtures::resident;
    use chrono::{NaiveDate, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn horizon() -> SimulationHorizon {
        SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 730)
    }

    #[test]
    fn test_core_documents_always_planned() {
        let mut rng = StdRng::seed_from_u64(1);
        let stay = resident(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(), &[]);
        let plan = DocumentPlanner::new(horizon()).plan(&stay, &mut rng);

        assert_eq!(plan[0].document_type, DocumentType::CarePlan);
        assert_eq!(plan[0].created_at, stay.admitted_at);
        for kind in [DocumentType::ConsentForm, DocumentType::Insurance, DocumentType::Identification] {
            assert!(plan.iter().any(|request| request.document_type == kind));
        }
        let legal = plan.iter().filter(|request| request.document_type == DocumentType::Legal).count();
        assert!((1..=2).contains(&legal));
        assert!(!plan.iter().any(|request| request.subtype.as_deref() == Some("Annual Physical Exam")));
    }

    #[test]
    fn test_long_stay_gets_annual_physical() {
        let horizon = horizon();
        let stay = resident(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), &[]);
        let mut rng = StdRng::seed_from_u64(2);
        let plan = DocumentPlanner::new(horizon).plan(&stay, &mut rng);

        let annual = plan
            .iter()
            .find(|request| request.subtype.as_deref() == Some("Annual Physical Exam"))
            .unwrap();
        let offset = (annual.created_at - stay.admitted_at).num_days();
        assert!((351..=379).contains(&offset));
    }

    #[test]
    fn test_timestamps_clamped_into_horizon() {
        let horizon = horizon();
        let stay = resident(horizon.start_date(), &[]);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            for request in DocumentPlanner::new(horizon).plan(&stay, &mut rng) {
                assert!(horizon.contains(request.created_at));
            }
        }
    }
}
