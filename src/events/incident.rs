//! Incident reports
//!
//! Incidents are sampled per home on an irregular 10 to 30 day cadence. Each
//! one gets a checksummed incident number drawn from a [`HomeIncidentCounter`]
//! owned by the caller, so numbering is scoped to one run and one home.
//!
//! Status is sampled as a terminal state rather than walked through the
//! workflow. The timestamp fields follow from it:
//!
//! | status      | updatedAt          | closedAt / closedById / closureNotes |
//! |-------------|--------------------|--------------------------------------|
//! | Draft       | null               | null                                 |
//! | Submitted   | occurred + 1..24h  | null                                 |
//! | UnderReview | occurred + 1..24h  | null                                 |
//! | Closed      | equal to closedAt  | occurred + 1..7 days                 |

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::incident_number::{IdentifierError, IncidentNumber};
use crate::facility::Home;
use crate::reference::{INCIDENT_CLOSURE_NOTE, INCIDENT_IMAGES, INCIDENT_LOCATIONS, PHOTO_CAPTIONS};
use crate::resident::Resident;
use crate::simulation::error::SimulationResult;
use crate::simulation::horizon::{working_time, SimulationHorizon};
use crate::types::{
    HomeId, IncidentId, IncidentStatus, IncidentType, PhotoId, ResidentId, UserId, WeightedVariant,
};
use crate::user::CaregiverRoster;

/// Chance that a step with residents present produces an incident
pub const INCIDENT_PROBABILITY: f64 = 0.40;

/// Chance that an incident involves a specific resident
pub const RESIDENT_INVOLVED_PROBABILITY: f64 = 0.90;

/// Running incident count of one home
///
/// The count only ever increases, so successive numbers from one counter have
/// strictly increasing sequence fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeIncidentCounter {
    home_sequence: u32,
    issued: u32,
}

impl HomeIncidentCounter {
    /// Counter for the home with 1-based creation order `home_sequence`
    pub fn new(home_sequence: u32) -> Self {
        Self { home_sequence, issued: 0 }
    }

    /// Numbers issued so far
    pub fn issued(&self) -> u32 {
        self.issued
    }

    /// Issue the next number for an incident of `incident_type`
    ///
    /// Fails without consuming a count when the sequence no longer fits.
    pub fn next_number(&mut self, incident_type: IncidentType) -> Result<IncidentNumber, IdentifierError> {
        let sequence = self.issued + 1;
        let number = IncidentNumber::compose(incident_type, self.home_sequence, sequence)?;
        self.issued = sequence;
        Ok(number)
    }
}

/// Photo attached to an incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentPhoto {
    /// Unique identifier
    pub id: PhotoId,
    /// Owning incident
    pub incident_id: IncidentId,
    /// Storage path of the image
    pub blob_path: String,
    /// Original file name
    pub file_name: String,
    /// Always `image/png`
    pub content_type: String,
    /// Size in bytes
    pub file_size_bytes: u64,
    /// Position in the incident's gallery
    pub display_order: u32,
    /// Optional caption
    pub caption: Option<String>,
    /// Upload instant
    pub created_at: DateTime<Utc>,
    /// Uploader, the reporter
    pub created_by_id: UserId,
}

/// An incident report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Unique identifier
    pub id: IncidentId,
    /// Checksummed human-readable number
    pub incident_number: IncidentNumber,
    /// Resident involved, if any
    pub resident_id: Option<ResidentId>,
    /// Home it happened in
    pub home_id: HomeId,
    /// Category
    pub incident_type: IncidentType,
    /// Severity from 1 to 5
    pub severity: u8,
    /// Workflow state
    pub status: IncidentStatus,
    /// When it happened
    pub occurred_at: DateTime<Utc>,
    /// Place in the home
    pub location: String,
    /// What happened
    pub description: String,
    /// What staff did
    pub actions_taken: String,
    /// Caregiver filing the report
    pub reported_by_id: UserId,
    /// Report creation instant
    pub created_at: DateTime<Utc>,
    /// Last change; null while Draft
    pub updated_at: Option<DateTime<Utc>>,
    /// Closure instant
    pub closed_at: Option<DateTime<Utc>>,
    /// Who closed it
    pub closed_by_id: Option<UserId>,
    /// Closure remark
    pub closure_notes: Option<String>,
    /// Attached photos
    pub photos: Vec<IncidentPhoto>,
}

impl Incident {
    /// Whether the optional timestamps agree with the status
    pub fn status_fields_coherent(&self) -> bool {
        let closed = self.status == IncidentStatus::Closed;
        let closure_fields = [
            self.closed_at.is_some(),
            self.closed_by_id.is_some(),
            self.closure_notes.is_some(),
        ];
        (self.updated_at.is_some() == (self.status != IncidentStatus::Draft))
            && closure_fields.iter().all(|present| *present == closed)
            && (!closed || self.updated_at == self.closed_at)
    }

    /// Every timestamp carried by the report and its photos
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        let mut stamps = vec![self.occurred_at, self.created_at];
        stamps.extend(self.updated_at);
        stamps.extend(self.closed_at);
        stamps.extend(self.photos.iter().map(|photo| photo.created_at));
        stamps
    }
}

fn description(incident_type: IncidentType, location: &str, rng: &mut dyn RngCore) -> String {
    match incident_type {
        IncidentType::Fall => format!(
            "Resident found on floor in {}. Stated they lost balance while attempting to stand.",
            location
        ),
        IncidentType::Medication => format!(
            "Medication administration error discovered during {} med pass.",
            ["morning", "evening"].choose(rng).copied().unwrap_or("morning")
        ),
        IncidentType::Behavioral => format!(
            "Resident exhibited agitated behavior in {}. Verbal intervention attempted.",
            location
        ),
        IncidentType::Medical => format!(
            "Resident complained of {} in {}.",
            ["chest discomfort", "shortness of breath", "dizziness", "severe headache"]
                .choose(rng)
                .copied()
                .unwrap_or("dizziness"),
            location
        ),
        IncidentType::Injury => format!(
            "Resident sustained minor {} in {}.",
            ["skin tear", "bruise", "abrasion"].choose(rng).copied().unwrap_or("bruise"),
            location
        ),
        IncidentType::Elopement => {
            "Resident found attempting to leave facility through main entrance.".to_string()
        }
        IncidentType::Other => format!("Incident occurred in {}. See detailed notes.", location),
    }
}

fn actions_taken(incident_type: IncidentType) -> &'static str {
    match incident_type {
        IncidentType::Fall => {
            "Assessed for injuries. Vitals checked. Family notified. Incident documented. Fall risk reassessed."
        }
        IncidentType::Medication => {
            "Physician notified. Medication reconciliation performed. Additional staff training scheduled."
        }
        IncidentType::Behavioral => {
            "De-escalation techniques applied. Care plan reviewed. Family notified of behavior changes."
        }
        IncidentType::Medical => {
            "Vitals monitored. Physician contacted. Emergency services notified. Family updated on condition."
        }
        IncidentType::Injury => {
            "First aid administered. Wound care provided. Physician informed. Incident documented."
        }
        IncidentType::Elopement => {
            "Resident safely returned. Security measures reviewed. Family and physician notified."
        }
        IncidentType::Other => {
            "Appropriate intervention provided. Supervisor notified. Incident documented per policy."
        }
    }
}

/// Samples incident reports for homes
#[derive(Debug, Clone, Copy)]
pub struct IncidentGenerator {
    horizon: SimulationHorizon,
}

impl IncidentGenerator {
    /// Create a generator over `horizon`
    pub fn new(horizon: SimulationHorizon) -> Self {
        Self { horizon }
    }

    /// Walk the home's history and report incidents
    ///
    /// `counter` must belong to `home`; it is advanced once per incident.
    pub fn generate_for_home(
        &self,
        home: &Home,
        residents: &[Resident],
        roster: &CaregiverRoster,
        counter: &mut HomeIncidentCounter,
        rng: &mut dyn RngCore,
    ) -> SimulationResult<Vec<Incident>> {
        let mut incidents = Vec::new();
        let end = self.horizon.end_date();
        let mut date = home.opening_date() + Duration::days(rng.gen_range(14..=45));

        while date < end {
            let present: Vec<ResidentId> = residents
                .iter()
                .filter(|resident| resident.is_resident_on(date))
                .map(|resident| resident.id)
                .collect();

            if !present.is_empty() && rng.gen_bool(INCIDENT_PROBABILITY) {
                if let Some(reporter) = roster.pick(home.id, rng) {
                    let resident_id = if rng.gen_bool(RESIDENT_INVOLVED_PROBABILITY) {
                        present.choose(rng).copied()
                    } else {
                        None
                    };
                    let occurred_at = working_time(date, rng);
                    let incident = self.generate(
                        home,
                        resident_id,
                        reporter,
                        occurred_at,
                        roster.admins(),
                        counter,
                        rng,
                    )?;
                    incidents.push(incident);
                }
            }

            date = date + Duration::days(rng.gen_range(10..=30));
        }

        debug!(home = %home.name, incidents = incidents.len(), "Reported incidents");
        Ok(incidents)
    }

    /// Build one report
    ///
    /// The closer comes from `admins` when it is non-empty, otherwise the
    /// reporter closes their own report.
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        &self,
        home: &Home,
        resident_id: Option<ResidentId>,
        reporter: UserId,
        occurred_at: DateTime<Utc>,
        admins: &[UserId],
        counter: &mut HomeIncidentCounter,
        rng: &mut dyn RngCore,
    ) -> SimulationResult<Incident> {
        let incident_type = IncidentType::sample(rng);
        let incident_number = counter.next_number(incident_type)?;
        let severity = incident_type.severity_pool().choose(rng).copied().unwrap_or(2);
        let status = IncidentStatus::sample(rng);
        let location = INCIDENT_LOCATIONS.choose(rng).copied().unwrap_or("Common Area");
        let id = IncidentId::generate(rng);

        let mut updated_at = None;
        let mut closed_at = None;
        let mut closed_by_id = None;
        let mut closure_notes = None;

        if status != IncidentStatus::Draft {
            let submitted = occurred_at + Duration::hours(rng.gen_range(1..=24));
            updated_at = Some(self.horizon.clamp(submitted));
        }
        if status == IncidentStatus::Closed {
            let closed = self.horizon.clamp(occurred_at + Duration::days(rng.gen_range(1..=7)));
            closed_at = Some(closed);
            updated_at = Some(closed);
            closure_notes = Some(INCIDENT_CLOSURE_NOTE.to_string());
            closed_by_id = Some(admins.choose(rng).copied().unwrap_or(reporter));
        }

        let photos = self.photos(home.id, id, reporter, occurred_at, rng);

        Ok(Incident {
            id,
            incident_number,
            resident_id,
            home_id: home.id,
            incident_type,
            severity,
            status,
            occurred_at,
            location: location.to_string(),
            description: description(incident_type, location, rng),
            actions_taken: actions_taken(incident_type).to_string(),
            reported_by_id: reporter,
            created_at: occurred_at,
            updated_at,
            closed_at,
            closed_by_id,
            closure_notes,
            photos,
        })
    }

    fn photos(
        &self,
        home_id: HomeId,
        incident_id: IncidentId,
        uploader: UserId,
        occurred_at: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Vec<IncidentPhoto> {
        let count = rng.gen_range(1..=3);
        let images: Vec<&str> = INCIDENT_IMAGES.choose_multiple(rng, count).copied().collect();

        images
            .into_iter()
            .zip(0u32..)
            .map(|(file_name, display_order)| {
                let id = PhotoId::generate(rng);
                IncidentPhoto {
                    id,
                    incident_id,
                    blob_path: format!(
                        "incident-photos/{}/{}/{}.png",
                        home_id.as_uuid(),
                        incident_id.as_uuid(),
                        id.as_uuid()
                    ),
                    file_name: file_name.to_string(),
                    content_type: "image/png".to_string(),
                    file_size_bytes: rng.gen_range(50_000..=500_000),
                    display_order,
                    caption: PHOTO_CAPTIONS.choose(rng).copied().flatten().map(str::to_string),
                    created_at: occurred_at,
                    created_by_id: uploader,
                }
            })
            .collect()
    }
}
