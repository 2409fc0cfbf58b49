//! Resident appointments
//!
//! Each resident gets an appointment every two to six weeks from a week or so
//! after admission until the end of their stay. Appointments inside the horizon
//! are past and carry an outcome; optional upcoming ones beyond the horizon
//! stay `Scheduled`.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::window::ResidentEvent;
use crate::reference::{
    AppointmentVenue, LocationKind, NameSource, APPOINTMENT_VENUES, PHYSICIANS, TRANSPORTATION_OPTIONS,
};
use crate::resident::Resident;
use crate::simulation::horizon::{at_time, SimulationHorizon};
use crate::types::{
    AppointmentId, AppointmentOutcome, AppointmentStatus, AppointmentType, HomeId, ResidentId, UserId,
    WeightedVariant,
};
use crate::user::CaregiverRoster;

/// Chance that a therapy appointment is a home visit
pub const THERAPY_HOME_VISIT_PROBABILITY: f64 = 0.40;

/// Location text of a home visit
pub const HOME_VISIT: &str = "Home visit";

/// An appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique identifier
    pub id: AppointmentId,
    /// Resident attending
    pub resident_id: ResidentId,
    /// Resident's home
    pub home_id: HomeId,
    /// Kind of appointment
    pub appointment_type: AppointmentType,
    /// Current status
    pub status: AppointmentStatus,
    /// Short title
    pub title: String,
    /// Start instant
    pub scheduled_at: DateTime<Utc>,
    /// Length in minutes
    pub duration_minutes: u32,
    /// Venue name, or "Home visit"
    pub location: String,
    /// Provider, if recorded
    pub provider_name: Option<String>,
    /// Provider phone, if recorded
    pub provider_phone: Option<String>,
    /// Preparation notes
    pub notes: Option<String>,
    /// Transportation arrangements
    pub transportation_notes: Option<String>,
    /// Reminder already sent
    pub reminder_sent: bool,
    /// Caregiver who booked it
    pub created_by_id: UserId,
    /// Booking instant
    pub created_at: DateTime<Utc>,
    /// Completion instant for completed appointments
    pub completed_at: Option<DateTime<Utc>>,
    /// Caregiver who completed it
    pub completed_by_id: Option<UserId>,
    /// What happened
    pub outcome_notes: Option<String>,
}

impl Appointment {
    /// Whether the appointment lies beyond the horizon
    pub fn is_upcoming(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }
}

impl ResidentEvent for Appointment {
    fn resident_id(&self) -> ResidentId {
        self.resident_id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }
}

fn titles(kind: AppointmentType) -> &'static [&'static str] {
    use AppointmentType::*;
    match kind {
        GeneralPractice => &["Primary care checkup", "Follow-up visit", "Annual physical", "Wellness visit"],
        Dental => &["Dental checkup", "Teeth cleaning", "Dental exam", "Oral health screening"],
        Ophthalmology => &["Eye exam", "Vision screening", "Ophthalmology follow-up", "Glaucoma check"],
        Podiatry => &["Podiatry visit", "Foot care appointment", "Diabetic foot check", "Nail care"],
        PhysicalTherapy => &["PT session", "Physical therapy", "Gait training", "Strength assessment"],
        OccupationalTherapy => &["OT session", "Occupational therapy", "ADL assessment", "Home safety review"],
        SpeechTherapy => &["Speech therapy session", "Swallowing evaluation", "Communication therapy"],
        Psychiatry => &["Psychiatry follow-up", "Mental health check", "Medication review - Psych"],
        Dermatology => &["Skin check", "Dermatology appointment", "Rash evaluation", "Skin cancer screening"],
        Cardiology => &["Cardiology follow-up", "Heart checkup", "Cardiac evaluation", "Pacemaker check"],
        Neurology => &["Neurology appointment", "Cognitive assessment", "Tremor evaluation", "Memory clinic"],
        LabWork => &["Lab work - routine", "Blood draw", "Lab tests", "Fasting lab work"],
        Imaging => &["X-ray", "CT scan", "MRI", "Ultrasound", "Bone density scan"],
        Audiology => &["Hearing test", "Audiology check", "Hearing aid adjustment", "Ear exam"],
        SocialWorker => &["Social services meeting", "Care coordination", "Benefits review"],
        FamilyVisit => &["Family care conference", "Family meeting", "Care planning meeting"],
    }
}

fn durations(kind: AppointmentType) -> &'static [u32] {
    use AppointmentType::*;
    match kind {
        GeneralPractice | Dental | Psychiatry | Cardiology | Audiology => &[30, 45, 60],
        Ophthalmology | Podiatry | SpeechTherapy => &[30, 45],
        PhysicalTherapy | OccupationalTherapy | Neurology | SocialWorker => &[45, 60],
        Dermatology | LabWork => &[15, 30],
        Imaging => &[30, 60, 90],
        FamilyVisit => &[60, 90, 120],
    }
}

fn venue_kind(kind: AppointmentType) -> LocationKind {
    match kind {
        AppointmentType::LabWork => LocationKind::Lab,
        AppointmentType::Imaging => LocationKind::Imaging,
        AppointmentType::Dental => LocationKind::Dental,
        AppointmentType::Ophthalmology => LocationKind::Eye,
        AppointmentType::Podiatry => LocationKind::Podiatry,
        AppointmentType::Audiology => LocationKind::Audiology,
        AppointmentType::Cardiology => LocationKind::Cardiology,
        AppointmentType::PhysicalTherapy
        | AppointmentType::OccupationalTherapy
        | AppointmentType::SpeechTherapy => LocationKind::Therapy,
        _ => LocationKind::Medical,
    }
}

fn credentials(kind: AppointmentType) -> &'static [&'static str] {
    use AppointmentType::*;
    match kind {
        Dental => &["DDS", "DMD"],
        Ophthalmology => &["MD, Ophthalmology", "OD"],
        Podiatry => &["DPM"],
        PhysicalTherapy => &["PT, DPT"],
        OccupationalTherapy => &["OT, OTR/L"],
        SpeechTherapy => &["SLP, CCC"],
        Psychiatry => &["MD, Psychiatry"],
        Cardiology => &["MD, Cardiology"],
        Neurology => &["MD, Neurology"],
        Dermatology => &["MD, Dermatology"],
        Audiology => &["AuD"],
        _ => &[],
    }
}

fn preparation_notes(kind: AppointmentType) -> &'static [&'static str] {
    match kind {
        AppointmentType::GeneralPractice => &[
            "Please bring current medication list.",
            "Fasting required if labs ordered.",
            "Bring insurance card and ID.",
        ],
        AppointmentType::Dental => {
            &["No eating 30 minutes before appointment.", "Bring list of current medications."]
        }
        AppointmentType::LabWork => &[
            "Fasting required - nothing to eat or drink after midnight.",
            "Stay well hydrated before blood draw.",
        ],
        AppointmentType::Imaging => &[
            "No metal objects - remove jewelry before appointment.",
            "Contrast dye may be used - notify of any allergies.",
        ],
        AppointmentType::Cardiology => {
            &["Bring list of all heart medications.", "Wear comfortable loose clothing."]
        }
        AppointmentType::PhysicalTherapy => {
            &["Wear comfortable clothing and sturdy shoes.", "Bring walker/cane if used."]
        }
        _ => &["No special instructions."],
    }
}

fn outcome_notes(outcome: AppointmentOutcome) -> &'static [&'static str] {
    match outcome {
        AppointmentOutcome::Completed => &[
            "Appointment completed as scheduled. No concerns noted.",
            "Visit went well. Follow-up scheduled in 3 months.",
            "Good outcome. Medication adjusted as needed.",
            "Resident tolerated appointment well. Results pending.",
            "Stable condition noted. Continue current care plan.",
            "Provider satisfied with progress. No changes to treatment.",
        ],
        AppointmentOutcome::Cancelled => &[
            "Cancelled due to resident illness.",
            "Cancelled - weather conditions.",
            "Cancelled by provider office - rescheduled.",
            "Family requested cancellation.",
            "Cancelled - transportation unavailable.",
        ],
        AppointmentOutcome::NoShow => &[
            "Resident refused to go to appointment.",
            "Missed appointment - scheduling error.",
            "Could not attend due to acute illness.",
        ],
        AppointmentOutcome::Rescheduled => &[
            "Rescheduled to better accommodate resident's needs.",
            "Provider requested reschedule.",
            "Rescheduled due to conflicting appointment.",
        ],
    }
}

fn pick_text(pool: &[&'static str], rng: &mut dyn RngCore) -> Option<String> {
    pool.choose(rng).map(|text| text.to_string())
}

/// Books appointments for residents
#[derive(Debug, Clone, Copy)]
pub struct AppointmentGenerator<'a> {
    horizon: SimulationHorizon,
    names: &'a dyn NameSource,
    upcoming_days: u32,
}

impl<'a> AppointmentGenerator<'a> {
    /// Create a generator; upcoming appointments are off
    pub fn new(horizon: SimulationHorizon, names: &'a dyn NameSource) -> Self {
        Self { horizon, names, upcoming_days: 0 }
    }

    /// Also book 0 to 2 appointments per active resident within `days` after
    /// the horizon end; 0 disables them
    pub fn with_upcoming_days(mut self, days: u32) -> Self {
        self.upcoming_days = days;
        self
    }

    /// Past appointments over the resident's stay, followed by any upcoming ones
    pub fn generate_for_resident(
        &self,
        resident: &Resident,
        roster: &CaregiverRoster,
        rng: &mut dyn RngCore,
    ) -> Vec<Appointment> {
        let mut appointments = Vec::new();
        let end = resident.window_end(&self.horizon);
        let mut date = resident.admission_date + Duration::days(rng.gen_range(7..=30));

        while date < end {
            if let Some(booked_by) = roster.pick(resident.home_id, rng) {
                let scheduled_at = Self::slot(date, rng);
                appointments.push(self.book(resident, booked_by, scheduled_at, true, rng));
            }
            date = date + Duration::days(rng.gen_range(14..=42));
        }

        if self.upcoming_days > 0 && resident.is_active {
            for _ in 0..rng.gen_range(0..=2) {
                let Some(booked_by) = roster.pick(resident.home_id, rng) else {
                    break;
                };
                let ahead = rng.gen_range(1..=i64::from(self.upcoming_days));
                let scheduled_at = Self::slot(self.horizon.end_date() + Duration::days(ahead), rng);
                appointments.push(self.book(resident, booked_by, scheduled_at, false, rng));
            }
        }

        debug!(resident = %resident.id, appointments = appointments.len(), "Booked appointments");
        appointments
    }

    /// A quarter-hour slot between 08:00 and 17:45
    fn slot(date: NaiveDate, rng: &mut dyn RngCore) -> DateTime<Utc> {
        let minute = [0, 15, 30, 45].choose(rng).copied().unwrap_or(0);
        at_time(date, rng.gen_range(8..=17), minute)
    }

    fn book(
        &self,
        resident: &Resident,
        booked_by: UserId,
        scheduled_at: DateTime<Utc>,
        past: bool,
        rng: &mut dyn RngCore,
    ) -> Appointment {
        let appointment_type = AppointmentType::sample(rng);
        let title = pick_text(titles(appointment_type), rng).unwrap_or_else(|| "Medical appointment".to_string());
        let venue = self.venue(appointment_type, rng);
        let duration_minutes = durations(appointment_type).choose(rng).copied().unwrap_or(30);
        let transportation_notes = TRANSPORTATION_OPTIONS.choose(rng).copied().flatten().map(str::to_string);

        let provider_phone = match venue {
            Some(venue) => Some(venue.phone.to_string()),
            None if rng.gen_bool(0.7) => PHYSICIANS.choose(rng).map(|physician| physician.phone.to_string()),
            None => None,
        };
        let provider_name = if rng.gen_bool(0.7) { Some(self.provider_name(appointment_type, rng)) } else { None };
        let notes = if rng.gen_bool(0.5) { pick_text(preparation_notes(appointment_type), rng) } else { None };

        let booked = scheduled_at - Duration::days(rng.gen_range(3..=21));
        let created_at = self.horizon.clamp(booked.max(resident.admitted_at));

        let mut appointment = Appointment {
            id: AppointmentId::generate(rng),
            resident_id: resident.id,
            home_id: resident.home_id,
            appointment_type,
            status: AppointmentStatus::Scheduled,
            title,
            scheduled_at,
            duration_minutes,
            location: venue.map_or(HOME_VISIT, |venue| venue.name).to_string(),
            provider_name,
            provider_phone,
            notes,
            transportation_notes,
            reminder_sent: past,
            created_by_id: booked_by,
            created_at,
            completed_at: None,
            completed_by_id: None,
            outcome_notes: None,
        };

        if past {
            let outcome = AppointmentOutcome::sample(rng);
            appointment.status = outcome.into();
            appointment.outcome_notes = pick_text(outcome_notes(outcome), rng);
            if outcome == AppointmentOutcome::Completed {
                appointment.completed_at =
                    Some(scheduled_at + Duration::minutes(i64::from(duration_minutes)));
                appointment.completed_by_id = Some(booked_by);
            }
        }

        appointment
    }

    /// Venue for the type; `None` is a home visit
    fn venue(&self, kind: AppointmentType, rng: &mut dyn RngCore) -> Option<&'static AppointmentVenue> {
        if kind.is_therapy() && rng.gen_bool(THERAPY_HOME_VISIT_PROBABILITY) {
            return None;
        }
        let of_kind = |wanted: LocationKind| -> Vec<&'static AppointmentVenue> {
            APPOINTMENT_VENUES.iter().filter(|venue| venue.kind == wanted).collect()
        };
        let mut matching = of_kind(venue_kind(kind));
        if matching.is_empty() {
            matching = of_kind(LocationKind::Medical);
        }
        matching.choose(rng).copied()
    }

    fn provider_name(&self, kind: AppointmentType, rng: &mut dyn RngCore) -> String {
        let first = self.names.first_name(None, rng);
        let last = self.names.last_name(rng);
        match credentials(kind).choose(rng) {
            Some(suffix) => format!("Dr. {} {}, {}", first, last, suffix),
            None => format!("Dr. {} {}", first, last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::window::within_stay;
    use crate::reference::BuiltinNameSource;
    use crate::resident::resident::fixtures::resident;
    use crate::types::{AssignmentId, DischargeKind};
    use crate::user::{HomeAssignment, User};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn horizon() -> SimulationHorizon {
        SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(), 730)
    }

    fn roster_for(resident: &Resident, rng: &mut StdRng) -> CaregiverRoster {
        let assignment = HomeAssignment {
            id: AssignmentId::generate(rng),
            user_id: UserId::generate(rng),
            home_id: resident.home_id,
            assigned_at: resident.admitted_at,
            assigned_by_id: UserId::generate(rng),
            is_active: true,
        };
        CaregiverRoster::build(&[] as &[User], &[assignment])
    }

    #[test]
    fn test_past_appointments_stay_inside_the_stay() {
        let mut rng = StdRng::seed_from_u64(21);
        let horizon = horizon();
        let names = BuiltinNameSource::new();
        let mut stay = resident(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), &[]);
        stay.discharge(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "Deceased", DischargeKind::Scheduled)
            .unwrap();
        let roster = roster_for(&stay, &mut rng);

        let appointments = AppointmentGenerator::new(horizon, &names)
            .with_upcoming_days(30)
            .generate_for_resident(&stay, &roster, &mut rng);
        assert!(appointments.len() >= 5);

        for appointment in &appointments {
            assert!(within_stay(&stay, &horizon, appointment.scheduled_at));
            assert!(appointment.created_at >= stay.admitted_at);
            assert!(appointment.created_at <= appointment.scheduled_at);
            assert!(appointment.reminder_sent);
            assert_ne!(appointment.status, AppointmentStatus::Scheduled);
            assert_eq!(
                appointment.completed_at.is_some(),
                appointment.status == AppointmentStatus::Completed
            );
            assert!(appointment.outcome_notes.is_some());
            assert!(durations(appointment.appointment_type).contains(&appointment.duration_minutes));
            assert!(titles(appointment.appointment_type).contains(&appointment.title.as_str()));
        }
    }

    #[test]
    fn test_upcoming_appointments_only_for_active_residents() {
        let horizon = horizon();
        let names = BuiltinNameSource::new();
        let stay = resident(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(), &[]);
        let generator = AppointmentGenerator::new(horizon, &names).with_upcoming_days(30);

        let mut upcoming = 0;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let roster = roster_for(&stay, &mut rng);
            for appointment in generator.generate_for_resident(&stay, &roster, &mut rng) {
                if appointment.is_upcoming() {
                    upcoming += 1;
                    assert!(appointment.scheduled_at >= horizon.end());
                    assert!(appointment.scheduled_at < horizon.end() + Duration::days(32));
                    assert!(!appointment.reminder_sent);
                    assert!(appointment.completed_at.is_none());
                    assert!(horizon.contains(appointment.created_at));
                } else {
                    assert!(appointment.scheduled_at < horizon.end());
                }
            }
        }
        assert!(upcoming > 0);
    }

    #[test]
    fn test_upcoming_disabled_by_default() {
        let mut rng = StdRng::seed_from_u64(3);
        let names = BuiltinNameSource::new();
        let stay = resident(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), &[]);
        let roster = roster_for(&stay, &mut rng);
        let appointments =
            AppointmentGenerator::new(horizon(), &names).generate_for_resident(&stay, &roster, &mut rng);
        assert!(appointments.iter().all(|appointment| !appointment.is_upcoming()));
    }

    #[test]
    fn test_venue_matches_type() {
        let mut rng = StdRng::seed_from_u64(8);
        let names = BuiltinNameSource::new();
        let generator = AppointmentGenerator::new(horizon(), &names);
        for _ in 0..50 {
            let venue = generator.venue(AppointmentType::LabWork, &mut rng).unwrap();
            assert_eq!(venue.kind, LocationKind::Lab);
            assert!(generator.venue(AppointmentType::Neurology, &mut rng).is_some());
        }
    }
}
