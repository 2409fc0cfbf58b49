//! Consistency audit of an assembled dataset
//!
//! [`DatasetAuditor`] re-checks, over the finished collections, the properties
//! every generator is supposed to keep on its own: no bed held twice at once,
//! resident records inside the stay, discharge fields agreeing with the bed
//! ledger, coherent incident workflow fields, valid and increasing incident
//! numbers, timestamps inside the horizon and references that resolve.
//! A failed audit means a generator has a bug; the run is aborted.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::events::{is_valid, within_stay, ResidentEvent};
use crate::facility::find_double_bookings;
use crate::resident::Resident;
use crate::simulation::dataset::SyntheticDataset;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::horizon::SimulationHorizon;
use crate::types::{BedId, HomeId, ResidentId, UserId};

/// Violations listed in an error before the rest are summarized
const REPORTED_VIOLATIONS: usize = 20;

/// Checks dataset-wide invariants
#[derive(Debug, Clone, Copy)]
pub struct DatasetAuditor {
    horizon: SimulationHorizon,
}

impl DatasetAuditor {
    /// Create an auditor for data generated over `horizon`
    pub fn new(horizon: SimulationHorizon) -> Self {
        Self { horizon }
    }

    /// Every violation found, empty when the dataset is consistent
    pub fn audit(&self, dataset: &SyntheticDataset) -> Vec<String> {
        let mut violations = Vec::new();
        let residents: HashMap<ResidentId, &Resident> =
            dataset.residents.iter().map(|resident| (resident.id, resident)).collect();

        self.check_beds(dataset, &mut violations);
        self.check_discharges(dataset, &mut violations);
        self.check_references(dataset, &residents, &mut violations);
        self.check_containment(dataset, &residents, &mut violations);
        self.check_incidents(dataset, &mut violations);
        self.check_horizon(dataset, &mut violations);

        debug!(violations = violations.len(), "Audit finished");
        violations
    }

    /// Fail with [`SimulationError::InvariantViolation`] when the audit finds anything
    pub fn check(&self, dataset: &SyntheticDataset) -> SimulationResult<()> {
        let violations = self.audit(dataset);
        if violations.is_empty() {
            return Ok(());
        }

        for violation in violations.iter().take(REPORTED_VIOLATIONS) {
            warn!(%violation, "Dataset invariant violated");
        }
        let mut message = violations.iter().take(REPORTED_VIOLATIONS).cloned().collect::<Vec<_>>().join("; ");
        if violations.len() > REPORTED_VIOLATIONS {
            message.push_str(&format!("; and {} more", violations.len() - REPORTED_VIOLATIONS));
        }
        Err(SimulationError::invariant_violation(message))
    }

    fn check_beds(&self, dataset: &SyntheticDataset, violations: &mut Vec<String>) {
        for (first, second) in find_double_bookings(&dataset.bed_occupancy) {
            violations.push(format!(
                "bed {} held by {} and {} at the same time",
                first.bed_id, first.resident_id, second.resident_id
            ));
        }
    }

    fn check_discharges(&self, dataset: &SyntheticDataset, violations: &mut Vec<String>) {
        let mut intervals: HashMap<ResidentId, usize> = HashMap::new();
        for interval in &dataset.bed_occupancy {
            *intervals.entry(interval.resident_id).or_default() += 1;
        }

        for resident in &dataset.residents {
            if resident.is_active != resident.discharge_date.is_none() {
                violations.push(format!(
                    "resident {} active flag disagrees with discharge date",
                    resident.id
                ));
            }
            if resident.discharge_date.is_some()
                != (resident.discharge_reason.is_some() && resident.discharge_kind.is_some())
            {
                violations.push(format!("resident {} has partial discharge fields", resident.id));
            }
            if intervals.get(&resident.id).copied().unwrap_or(0) != 1 {
                violations.push(format!("resident {} does not hold exactly one bed interval", resident.id));
            }

            let interval = dataset.bed_occupancy.iter().find(|interval| interval.resident_id == resident.id);
            if let Some(interval) = interval {
                if interval.bed_id != resident.bed_id || interval.start != resident.admission_date {
                    violations.push(format!("resident {} bed interval does not match admission", resident.id));
                }
                if interval.end != resident.discharge_date {
                    violations.push(format!(
                        "resident {} interval end {:?} differs from discharge {:?}",
                        resident.id, interval.end, resident.discharge_date
                    ));
                }
            }
        }
    }

    fn check_references(
        &self,
        dataset: &SyntheticDataset,
        residents: &HashMap<ResidentId, &Resident>,
        violations: &mut Vec<String>,
    ) {
        let homes: HashSet<HomeId> = dataset.homes.iter().map(|home| home.id).collect();
        let beds: HashMap<BedId, HomeId> = dataset.beds.iter().map(|bed| (bed.id, bed.home_id)).collect();
        let users: HashSet<UserId> = dataset.users.iter().map(|user| user.id).collect();

        for bed in &dataset.beds {
            if !homes.contains(&bed.home_id) {
                violations.push(format!("bed {} belongs to unknown home {}", bed.id, bed.home_id));
            }
        }
        for assignment in &dataset.caregiver_home_assignments {
            if !homes.contains(&assignment.home_id) || !users.contains(&assignment.user_id) {
                violations.push(format!("assignment {} references unknown home or user", assignment.id));
            }
        }
        for interval in &dataset.bed_occupancy {
            if !beds.contains_key(&interval.bed_id) || !residents.contains_key(&interval.resident_id) {
                violations.push(format!(
                    "occupancy of bed {} references unknown bed or resident",
                    interval.bed_id
                ));
            }
        }
        for resident in &dataset.residents {
            if beds.get(&resident.bed_id) != Some(&resident.home_id) {
                violations.push(format!("resident {} bed is not in their home", resident.id));
            }
        }

        let activities: HashSet<_> = dataset.activities.iter().map(|activity| activity.id).collect();
        for participation in &dataset.activity_participants {
            if !activities.contains(&participation.activity_id) {
                violations.push(format!("participation {} references unknown activity", participation.id));
            }
        }
        for incident in &dataset.incidents {
            if !homes.contains(&incident.home_id) || !users.contains(&incident.reported_by_id) {
                violations.push(format!("incident {} references unknown home or reporter", incident.incident_number));
            }
        }
        for document in &dataset.documents {
            if !residents.contains_key(&document.resident_id) {
                violations.push(format!("document {} references unknown resident", document.id));
            }
        }
    }

    fn check_containment(
        &self,
        dataset: &SyntheticDataset,
        residents: &HashMap<ResidentId, &Resident>,
        violations: &mut Vec<String>,
    ) {
        let mut check = |kind: &str, event: &dyn ResidentEvent| match residents.get(&event.resident_id()) {
            Some(resident) if within_stay(resident, &self.horizon, event.occurred_at()) => {}
            Some(_) => violations.push(format!(
                "{} for resident {} at {} falls outside the stay",
                kind,
                event.resident_id(),
                event.occurred_at()
            )),
            None => violations.push(format!("{} references unknown resident {}", kind, event.resident_id())),
        };

        dataset.adl_logs.iter().for_each(|log| check("ADL log", log));
        dataset.vitals_logs.iter().for_each(|log| check("vitals log", log));
        dataset.medication_logs.iter().for_each(|log| check("medication log", log));
        dataset.rom_logs.iter().for_each(|log| check("ROM log", log));
        dataset.behavior_notes.iter().for_each(|note| check("behavior note", note));
        dataset.activity_participants.iter().for_each(|participation| check("participation", participation));
        dataset
            .appointments
            .iter()
            .filter(|appointment| !appointment.is_upcoming())
            .for_each(|appointment| check("appointment", appointment));

        for incident in &dataset.incidents {
            let Some(resident_id) = incident.resident_id else {
                continue;
            };
            match residents.get(&resident_id) {
                Some(resident) if resident.home_id != incident.home_id => violations.push(format!(
                    "incident {} involves a resident of another home",
                    incident.incident_number
                )),
                Some(resident) if !within_stay(resident, &self.horizon, incident.occurred_at) => {
                    violations.push(format!(
                        "incident {} occurred outside the stay of resident {}",
                        incident.incident_number, resident_id
                    ))
                }
                Some(_) => {}
                None => violations.push(format!(
                    "incident {} references unknown resident {}",
                    incident.incident_number, resident_id
                )),
            }
        }
    }

    fn check_incidents(&self, dataset: &SyntheticDataset, violations: &mut Vec<String>) {
        let sequences: HashMap<HomeId, u32> = dataset.homes.iter().map(|home| (home.id, home.sequence)).collect();
        let mut last_issued: HashMap<HomeId, u32> = HashMap::new();

        for incident in &dataset.incidents {
            let number = &incident.incident_number;
            if !is_valid(number.as_str()) {
                violations.push(format!("incident number {} fails its check character", number));
            }
            if !incident.status_fields_coherent() {
                violations.push(format!("incident {} has fields inconsistent with status {}", number, incident.status));
            }
            if number.incident_type() != Some(incident.incident_type) {
                violations.push(format!("incident {} type code disagrees with {}", number, incident.incident_type));
            }
            if sequences.get(&incident.home_id) != Some(&number.home_sequence()) {
                violations.push(format!("incident {} carries the wrong home code", number));
            }

            let previous = last_issued.insert(incident.home_id, number.sequence()).unwrap_or(0);
            if number.sequence() <= previous {
                violations.push(format!("incident {} does not follow sequence {}", number, previous));
            }
        }
    }

    fn check_horizon(&self, dataset: &SyntheticDataset, violations: &mut Vec<String>) {
        let mut check = |kind: &str, timestamp: DateTime<Utc>| {
            if !self.horizon.contains(timestamp) {
                violations.push(format!("{} timestamp {} outside the horizon", kind, timestamp));
            }
        };

        dataset.homes.iter().for_each(|home| check("home", home.created_at));
        dataset.beds.iter().for_each(|bed| check("bed", bed.created_at));
        dataset.users.iter().for_each(|user| check("user", user.created_at));
        dataset.caregiver_home_assignments.iter().for_each(|assignment| check("assignment", assignment.assigned_at));
        for resident in &dataset.residents {
            check("admission", resident.admitted_at);
            check("resident", resident.created_at);
        }

        dataset.adl_logs.iter().for_each(|log| check("ADL log", log.logged_at));
        dataset.vitals_logs.iter().for_each(|log| check("vitals log", log.recorded_at));
        for log in &dataset.medication_logs {
            check("medication log", log.scheduled_time);
            if let Some(administered_at) = log.administered_at {
                check("medication administration", administered_at);
            }
        }
        dataset.rom_logs.iter().for_each(|log| check("ROM log", log.performed_at));
        dataset.behavior_notes.iter().for_each(|note| check("behavior note", note.noted_at));

        for activity in &dataset.activities {
            check("activity", activity.created_at);
            check("activity start", activity.starts_at());
        }
        dataset.activity_participants.iter().for_each(|participation| check("participation", participation.created_at));

        for incident in &dataset.incidents {
            for timestamp in incident.timestamps() {
                check("incident", timestamp);
            }
        }

        for appointment in &dataset.appointments {
            check("appointment booking", appointment.created_at);
            if !appointment.is_upcoming() {
                check("appointment", appointment.scheduled_at);
                if let Some(completed_at) = appointment.completed_at {
                    check("appointment completion", completed_at);
                }
            }
        }

        dataset.documents.iter().for_each(|document| check("document", document.created_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::OccupancyInterval;
    use crate::resident::resident::fixtures::resident;
    use crate::types::DischargeKind;
    use chrono::{Duration, NaiveDate, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn horizon() -> SimulationHorizon {
        SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 730)
    }

    fn dataset_with(resident: Resident) -> SyntheticDataset {
        let mut dataset = SyntheticDataset::default();
        dataset.bed_occupancy.push(OccupancyInterval {
            bed_id: resident.bed_id,
            resident_id: resident.id,
            start: resident.admission_date,
            end: resident.discharge_date,
        });
        dataset.residents.push(resident);
        dataset
    }

    #[test]
    fn test_double_booking_reported() {
        let stay = resident(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), &[]);
        let mut dataset = dataset_with(stay.clone());
        let mut rng = StdRng::seed_from_u64(4);
        dataset.bed_occupancy.push(OccupancyInterval {
            bed_id: stay.bed_id,
            resident_id: ResidentId::generate(&mut rng),
            start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end: None,
        });

        let violations = DatasetAuditor::new(horizon()).audit(&dataset);
        assert!(violations.iter().any(|violation| violation.contains("at the same time")));
    }

    #[test]
    fn test_interval_must_match_discharge() {
        let mut stay = resident(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), &[]);
        let mut dataset = dataset_with(stay.clone());
        stay.discharge(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), "Moved", DischargeKind::Scheduled).unwrap();
        dataset.residents[0] = stay;

        let violations = DatasetAuditor::new(horizon()).audit(&dataset);
        assert!(violations.iter().any(|violation| violation.contains("differs from discharge")));
    }

    #[test]
    fn test_check_fails_on_violation() {
        let mut stay = resident(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), &[]);
        stay.is_active = false;
        let dataset = dataset_with(stay);

        let error = DatasetAuditor::new(horizon()).check(&dataset).unwrap_err();
        assert!(matches!(error, SimulationError::InvariantViolation(_)));
    }

    #[test]
    fn test_admission_outside_horizon_reported() {
        let horizon = horizon();
        let stay = resident(horizon.start_date() - Duration::days(3), &[]);
        let dataset = dataset_with(stay);

        let violations = DatasetAuditor::new(horizon).audit(&dataset);
        assert!(violations.iter().any(|violation| violation.contains("outside the horizon")));
    }
}
