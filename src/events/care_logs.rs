//! Daily care logs
//!
//! For every day of a stay a [`CareLogStream`] rolls independent trials per log
//! kind and emits the records for that day before moving on. The stream owns a
//! seeded generator, so asking for the same resident with the same seed
//! replays the same sequence.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::events::window::{care_days, ResidentEvent};
use crate::reference::{ADL_NOTES, BEHAVIOR_OBSERVATIONS, MEDICATION_TIMES, ROM_EXERCISES, ROM_NOTES};
use crate::resident::{Medication, Resident};
use crate::simulation::horizon::{at_time, working_time, DayRange, SimulationHorizon};
use crate::types::{
    AdlLevel, BehaviorCategory, BehaviorSeverity, HomeId, LogId, MedicationStatus, ResidentId,
    UserId, WeightedVariant,
};
use crate::user::CaregiverRoster;

/// Activities-of-daily-living assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdlLog {
    /// Unique identifier
    pub id: LogId,
    /// Assessed resident
    pub resident_id: ResidentId,
    /// Home of the resident
    pub home_id: HomeId,
    /// Caregiver making the assessment
    pub caregiver_id: UserId,
    /// Assessment instant
    pub logged_at: DateTime<Utc>,
    /// Help needed with bathing
    pub bathing: AdlLevel,
    /// Help needed with dressing
    pub dressing: AdlLevel,
    /// Help needed with toileting
    pub toileting: AdlLevel,
    /// Help needed with transfers
    pub transferring: AdlLevel,
    /// Continence support
    pub continence: AdlLevel,
    /// Help needed with meals
    pub feeding: AdlLevel,
    /// Free-text remarks
    pub notes: Option<String>,
}

/// Vital signs reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsLog {
    /// Unique identifier
    pub id: LogId,
    /// Measured resident
    pub resident_id: ResidentId,
    /// Home of the resident
    pub home_id: HomeId,
    /// Caregiver taking the reading
    pub caregiver_id: UserId,
    /// Reading instant
    pub recorded_at: DateTime<Utc>,
    /// Systolic pressure, mmHg
    pub systolic_bp: u32,
    /// Diastolic pressure, mmHg
    pub diastolic_bp: u32,
    /// Heart rate, beats per minute
    pub pulse: u32,
    /// Body temperature
    pub temperature: f64,
    /// Always "F"
    pub temperature_unit: String,
    /// Oxygen saturation, percent, within 88..=100
    pub oxygen_saturation: u32,
    /// Follow-up remarks for out-of-range readings
    pub notes: Option<String>,
}

/// One scheduled medication pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationLog {
    /// Unique identifier
    pub id: LogId,
    /// Resident receiving the drug
    pub resident_id: ResidentId,
    /// Home of the resident
    pub home_id: HomeId,
    /// Caregiver giving the drug
    pub caregiver_id: UserId,
    /// Drug name
    pub medication_name: String,
    /// Dose
    pub dosage: String,
    /// Route
    pub route: String,
    /// Scheduled instant
    pub scheduled_time: DateTime<Utc>,
    /// When it was actually given; `None` if refused or held
    pub administered_at: Option<DateTime<Utc>>,
    /// Outcome of the pass
    pub status: MedicationStatus,
    /// Status-specific remark
    pub notes: Option<String>,
}

/// Range-of-motion exercise session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RomLog {
    /// Unique identifier
    pub id: LogId,
    /// Exercising resident
    pub resident_id: ResidentId,
    /// Home of the resident
    pub home_id: HomeId,
    /// Caregiver leading the session
    pub caregiver_id: UserId,
    /// Session start
    pub performed_at: DateTime<Utc>,
    /// Exercise performed
    pub exercise: String,
    /// Session length
    pub duration_minutes: u32,
    /// Repetitions, when counted
    pub repetitions: Option<u32>,
    /// Free-text remarks
    pub notes: Option<String>,
}

/// Free-text behavior observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorNote {
    /// Unique identifier
    pub id: LogId,
    /// Observed resident
    pub resident_id: ResidentId,
    /// Home of the resident
    pub home_id: HomeId,
    /// Observing caregiver
    pub caregiver_id: UserId,
    /// Observation instant
    pub noted_at: DateTime<Utc>,
    /// Kind of behavior
    pub category: BehaviorCategory,
    /// How serious it was
    pub severity: BehaviorSeverity,
    /// Observation text
    pub note: String,
}

macro_rules! resident_event {
    ($($record:ty => $field:ident),* $(,)?) => {
        $(
            impl ResidentEvent for $record {
                fn resident_id(&self) -> ResidentId {
                    self.resident_id
                }

                fn occurred_at(&self) -> DateTime<Utc> {
                    self.$field
                }
            }
        )*
    };
}

resident_event! {
    AdlLog => logged_at,
    VitalsLog => recorded_at,
    MedicationLog => scheduled_time,
    RomLog => performed_at,
    BehaviorNote => noted_at,
}

/// Any daily care record
#[derive(Debug, Clone, PartialEq)]
pub enum CareLogEntry {
    /// Daily living assessment
    Adl(AdlLog),
    /// Vital signs
    Vitals(VitalsLog),
    /// Medication pass
    Medication(MedicationLog),
    /// Range-of-motion session
    Rom(RomLog),
    /// Behavior observation
    Behavior(BehaviorNote),
}

impl CareLogEntry {
    /// Resident and instant of the entry
    pub fn event(&self) -> &dyn ResidentEvent {
        match self {
            CareLogEntry::Adl(log) => log,
            CareLogEntry::Vitals(log) => log,
            CareLogEntry::Medication(log) => log,
            CareLogEntry::Rom(log) => log,
            CareLogEntry::Behavior(log) => log,
        }
    }
}

/// Daily care logs grouped by kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CareLogs {
    /// Daily living assessments
    pub adl: Vec<AdlLog>,
    /// Vital signs readings
    pub vitals: Vec<VitalsLog>,
    /// Medication passes
    pub medication: Vec<MedicationLog>,
    /// Range-of-motion sessions
    pub rom: Vec<RomLog>,
    /// Behavior observations
    pub behavior: Vec<BehaviorNote>,
}

impl CareLogs {
    /// Total number of records
    pub fn len(&self) -> usize {
        self.adl.len() + self.vitals.len() + self.medication.len() + self.rom.len() + self.behavior.len()
    }

    /// Whether no records were produced
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append another set of logs
    pub fn append(&mut self, other: &mut CareLogs) {
        self.adl.append(&mut other.adl);
        self.vitals.append(&mut other.vitals);
        self.medication.append(&mut other.medication);
        self.rom.append(&mut other.rom);
        self.behavior.append(&mut other.behavior);
    }
}

impl Extend<CareLogEntry> for CareLogs {
    fn extend<I: IntoIterator<Item = CareLogEntry>>(&mut self, iter: I) {
        for entry in iter {
            match entry {
                CareLogEntry::Adl(log) => self.adl.push(log),
                CareLogEntry::Vitals(log) => self.vitals.push(log),
                CareLogEntry::Medication(log) => self.medication.push(log),
                CareLogEntry::Rom(log) => self.rom.push(log),
                CareLogEntry::Behavior(log) => self.behavior.push(log),
            }
        }
    }
}

/// Daily probabilities for each log kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CareLogRates {
    /// Chance of any ADL assessment on a day
    pub adl: f64,
    /// Chance an ADL assessment carries a note
    pub adl_note: f64,
    /// Chance of any vitals reading on a day
    pub vitals: f64,
    /// Chance each prescribed drug is logged on a day
    pub medication: f64,
    /// Chance of a ROM session on a day
    pub rom: f64,
    /// Chance a ROM session carries a note
    pub rom_note: f64,
    /// Chance of a behavior note on a day
    pub behavior: f64,
    /// Chance of a behavior note on a day for residents with dementia
    pub behavior_dementia: f64,
}

impl Default for CareLogRates {
    fn default() -> Self {
        Self {
            adl: 0.90,
            adl_note: 0.30,
            vitals: 0.85,
            medication: 0.98,
            rom: 0.40,
            rom_note: 0.20,
            behavior: 0.15,
            behavior_dementia: 0.30,
        }
    }
}

/// Builds [`CareLogStream`]s over resident stays
#[derive(Debug, Clone, Copy)]
pub struct CareLogGenerator {
    rates: CareLogRates,
    horizon: SimulationHorizon,
}

impl CareLogGenerator {
    /// Generator with the default rates
    pub fn new(horizon: SimulationHorizon) -> Self {
        Self::with_rates(horizon, CareLogRates::default())
    }

    /// Generator with custom rates
    pub fn with_rates(horizon: SimulationHorizon, rates: CareLogRates) -> Self {
        Self { rates, horizon }
    }

    /// Lazy day-by-day log stream for `resident`; the same seed replays the
    /// same stream
    pub fn stream<'a>(
        &self,
        resident: &'a Resident,
        roster: &'a CaregiverRoster,
        seed: u64,
    ) -> CareLogStream<'a> {
        CareLogStream {
            resident,
            caregivers: roster.caregivers(resident.home_id),
            rates: self.rates,
            days: care_days(resident, &self.horizon),
            rng: StdRng::seed_from_u64(seed),
            pending: VecDeque::new(),
        }
    }
}

/// Iterator over one resident's daily care logs, in day order
#[derive(Debug)]
pub struct CareLogStream<'a> {
    resident: &'a Resident,
    caregivers: &'a [UserId],
    rates: CareLogRates,
    days: DayRange,
    rng: StdRng,
    pending: VecDeque<CareLogEntry>,
}

impl Iterator for CareLogStream<'_> {
    type Item = CareLogEntry;

    fn next(&mut self) -> Option<CareLogEntry> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                return Some(entry);
            }
            let day = self.days.next()?;
            self.fill_day(day);
        }
    }
}

impl CareLogStream<'_> {
    fn fill_day(&mut self, day: NaiveDate) {
        if self.caregivers.is_empty() {
            return;
        }

        if self.rng.gen_bool(self.rates.adl) {
            for _ in 0..self.rng.gen_range(1..=2) {
                let log = self.adl_log(day);
                self.pending.push_back(CareLogEntry::Adl(log));
            }
        }

        if self.rng.gen_bool(self.rates.vitals) {
            for _ in 0..self.rng.gen_range(1..=2) {
                let log = self.vitals_log(day);
                self.pending.push_back(CareLogEntry::Vitals(log));
            }
        }

        let resident = self.resident;
        for medication in &resident.medications {
            if self.rng.gen_bool(self.rates.medication) {
                let log = self.medication_log(day, medication);
                self.pending.push_back(CareLogEntry::Medication(log));
            }
        }

        if self.rng.gen_bool(self.rates.rom) {
            let log = self.rom_log(day);
            self.pending.push_back(CareLogEntry::Rom(log));
        }

        let behavior_rate = if resident.has_dementia() {
            self.rates.behavior_dementia
        } else {
            self.rates.behavior
        };
        if self.rng.gen_bool(behavior_rate) {
            let note = self.behavior_note(day);
            self.pending.push_back(CareLogEntry::Behavior(note));
        }
    }

    fn caregiver(&mut self) -> UserId {
        // fill_day returns early for an empty roster
        self.caregivers[self.rng.gen_range(0..self.caregivers.len())]
    }

    fn adl_log(&mut self, day: NaiveDate) -> AdlLog {
        let pool = self.resident.adl_baseline.daily_pool();
        let mut level = || pool.choose(&mut self.rng).copied().unwrap_or(AdlLevel::Independent);
        let (bathing, dressing, toileting, transferring, continence, feeding) =
            (level(), level(), level(), level(), level(), level());

        let notes = if self.rng.gen_bool(self.rates.adl_note) {
            ADL_NOTES.choose(&mut self.rng).map(|note| note.to_string())
        } else {
            None
        };

        AdlLog {
            id: LogId::generate(&mut self.rng),
            resident_id: self.resident.id,
            home_id: self.resident.home_id,
            caregiver_id: self.caregiver(),
            logged_at: working_time(day, &mut self.rng),
            bathing,
            dressing,
            toileting,
            transferring,
            continence,
            feeding,
            notes,
        }
    }

    fn vitals_log(&mut self, day: NaiveDate) -> VitalsLog {
        let systolic_base: i32 = if self.resident.has_hypertension() { 140 } else { 120 };
        let systolic = systolic_base + self.rng.gen_range(-15..=20);
        let diastolic: i32 = 80 + self.rng.gen_range(-10..=15);
        let pulse: i32 = 72 + self.rng.gen_range(-12..=18);
        let temperature = ((98.6 + self.rng.gen_range(-0.8..1.2)) * 10.0_f64).round() / 10.0;
        let oxygen: i32 = (97 + self.rng.gen_range(-5..=3)).clamp(88, 100);

        let mut remarks = Vec::new();
        if systolic > 150 {
            remarks.push("Elevated BP noted, will monitor.");
        }
        if oxygen < 92 {
            remarks.push("O2 sat lower than usual, encouraged deep breathing.");
        }

        VitalsLog {
            id: LogId::generate(&mut self.rng),
            resident_id: self.resident.id,
            home_id: self.resident.home_id,
            caregiver_id: self.caregiver(),
            recorded_at: working_time(day, &mut self.rng),
            systolic_bp: systolic.unsigned_abs(),
            diastolic_bp: diastolic.unsigned_abs(),
            pulse: pulse.unsigned_abs(),
            temperature,
            temperature_unit: "F".to_string(),
            oxygen_saturation: oxygen.unsigned_abs(),
            notes: if remarks.is_empty() { None } else { Some(remarks.join(" ")) },
        }
    }

    fn medication_log(&mut self, day: NaiveDate, medication: &Medication) -> MedicationLog {
        let (hour, minute) = MEDICATION_TIMES.choose(&mut self.rng).copied().unwrap_or((8, 0));
        let scheduled_time = at_time(day, hour, minute);
        let status = MedicationStatus::sample(&mut self.rng);
        let administered_at = match status {
            MedicationStatus::Administered => {
                Some(scheduled_time + Duration::minutes(self.rng.gen_range(0..=30)))
            }
            MedicationStatus::GivenLate => {
                Some(scheduled_time + Duration::minutes(self.rng.gen_range(31..=90)))
            }
            MedicationStatus::GivenEarly => {
                Some(scheduled_time - Duration::minutes(self.rng.gen_range(15..=45)))
            }
            MedicationStatus::Refused | MedicationStatus::Held => None,
        };

        MedicationLog {
            id: LogId::generate(&mut self.rng),
            resident_id: self.resident.id,
            home_id: self.resident.home_id,
            caregiver_id: self.caregiver(),
            medication_name: medication.name.clone(),
            dosage: medication.dosage.clone(),
            route: medication.route.clone(),
            scheduled_time,
            administered_at,
            status,
            notes: status.note().map(str::to_string),
        }
    }

    fn rom_log(&mut self, day: NaiveDate) -> RomLog {
        let exercise = ROM_EXERCISES.choose(&mut self.rng).copied().unwrap_or("Ankle pumps");
        let duration_minutes = [5, 10, 15, 20].choose(&mut self.rng).copied().unwrap_or(10);
        let repetitions = [None, Some(5), Some(10), Some(15), Some(20)]
            .choose(&mut self.rng)
            .copied()
            .flatten();
        let notes = if self.rng.gen_bool(self.rates.rom_note) {
            ROM_NOTES.choose(&mut self.rng).map(|note| note.to_string())
        } else {
            None
        };

        RomLog {
            id: LogId::generate(&mut self.rng),
            resident_id: self.resident.id,
            home_id: self.resident.home_id,
            caregiver_id: self.caregiver(),
            performed_at: working_time(day, &mut self.rng),
            exercise: exercise.to_string(),
            duration_minutes,
            repetitions,
            notes,
        }
    }

    fn behavior_note(&mut self, day: NaiveDate) -> BehaviorNote {
        let observation = BEHAVIOR_OBSERVATIONS.choose(&mut self.rng).copied().unwrap_or(BEHAVIOR_OBSERVATIONS[0]);
        BehaviorNote {
            id: LogId::generate(&mut self.rng),
            resident_id: self.resident.id,
            home_id: self.resident.home_id,
            caregiver_id: self.caregiver(),
            noted_at: working_time(day, &mut self.rng),
            category: observation.category,
            severity: BehaviorSeverity::sample(&mut self.rng),
            note: observation.text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::window::within_stay;
    use crate::resident::resident::fixtures::resident;
    use crate::types::{AssignmentId, DischargeKind};
    use crate::user::{HomeAssignment, User};
    use chrono::TimeZone;

    fn horizon() -> SimulationHorizon {
        SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 730)
    }

    fn roster_for(resident: &Resident) -> CaregiverRoster {
        let mut rng = StdRng::seed_from_u64(77);
        let assignment = HomeAssignment {
            id: AssignmentId::generate(&mut rng),
            user_id: UserId::generate(&mut rng),
            home_id: resident.home_id,
            assigned_at: resident.admitted_at,
            assigned_by_id: UserId::generate(&mut rng),
            is_active: true,
        };
        CaregiverRoster::build(&[] as &[User], &[assignment])
    }

    #[test]
    fn test_logs_stay_inside_the_stay() {
        let horizon = horizon();
        let mut stay = resident(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), &["Hypertension", "Vascular dementia"]);
        stay.discharge(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), "Deceased", DischargeKind::Scheduled)
            .unwrap();
        let roster = roster_for(&stay);

        let entries: Vec<CareLogEntry> = CareLogGenerator::new(horizon).stream(&stay, &roster, 1).collect();
        assert!(!entries.is_empty());
        for entry in &entries {
            let event = entry.event();
            assert_eq!(event.resident_id(), stay.id);
            assert!(within_stay(&stay, &horizon, event.occurred_at()));
        }
        let last = entries.iter().map(|e| e.event().occurred_at()).max().unwrap();
        assert!(last.date_naive() <= NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    }

    #[test]
    fn test_stream_is_restartable() {
        let stay = resident(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(), &[]);
        let roster = roster_for(&stay);
        let generator = CareLogGenerator::new(horizon());
        let first: Vec<_> = generator.stream(&stay, &roster, 5).collect();
        let second: Vec<_> = generator.stream(&stay, &roster, 5).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_vitals_bounds() {
        let stay = resident(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(), &["Hypertension"]);
        let roster = roster_for(&stay);
        let mut logs = CareLogs::default();
        logs.extend(CareLogGenerator::new(horizon()).stream(&stay, &roster, 9));

        assert!(!logs.vitals.is_empty());
        for vitals in &logs.vitals {
            assert!((125..=160).contains(&vitals.systolic_bp));
            assert!((70..=95).contains(&vitals.diastolic_bp));
            assert!((60..=90).contains(&vitals.pulse));
            assert!((88..=100).contains(&vitals.oxygen_saturation));
            assert!((97.8..=99.8).contains(&vitals.temperature));
            if vitals.systolic_bp > 150 {
                assert!(vitals.notes.as_deref().unwrap().contains("Elevated BP"));
            }
        }
        for log in &logs.medication {
            assert_eq!(log.administered_at.is_none(), matches!(log.status, MedicationStatus::Refused | MedicationStatus::Held));
        }
    }

    #[test]
    fn test_vitals_without_hypertension() {
        let stay = resident(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(), &["Osteoarthritis"]);
        let roster = roster_for(&stay);
        let mut logs = CareLogs::default();
        logs.extend(CareLogGenerator::new(horizon()).stream(&stay, &roster, 21));

        assert!(!logs.vitals.is_empty());
        for vitals in &logs.vitals {
            assert!((105..=140).contains(&vitals.systolic_bp));
            assert!((70..=95).contains(&vitals.diastolic_bp));
            assert!((60..=90).contains(&vitals.pulse));
            assert!((88..=100).contains(&vitals.oxygen_saturation));
            assert_eq!(vitals.temperature_unit, "F");
            if vitals.oxygen_saturation < 92 {
                assert!(vitals.notes.as_deref().unwrap().contains("O2 sat"));
            }
        }
    }

    #[test]
    fn test_no_caregivers_no_logs() {
        let stay = resident(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(), &[]);
        let roster = CaregiverRoster::default();
        assert_eq!(CareLogGenerator::new(horizon()).stream(&stay, &roster, 1).count(), 0);
    }

    #[test]
    fn test_rates_drive_volume() {
        let stay = resident(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &[]);
        let roster = roster_for(&stay);
        let silent = CareLogRates {
            adl: 0.0,
            vitals: 0.0,
            medication: 0.0,
            rom: 0.0,
            behavior: 0.0,
            behavior_dementia: 0.0,
            ..CareLogRates::default()
        };
        assert_eq!(CareLogGenerator::with_rates(horizon(), silent).stream(&stay, &roster, 1).count(), 0);
    }
}
