//! Statistics collection and reporting
//!
//! [`GenerationStatistics`] is computed once from the finished dataset and is
//! the single source for the summary printed after a run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::simulation::dataset::SyntheticDataset;
use crate::types::{DischargeKind, UserRole};

/// Counts describing one generated dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    // Infrastructure
    /// Homes generated
    pub total_homes: usize,
    /// Beds across all homes
    pub total_beds: usize,
    /// Staff accounts
    pub total_users: usize,
    /// Caregiver accounts
    pub total_caregivers: usize,
    /// Caregiver to home assignments, cross-home ones included
    pub total_assignments: usize,

    // Residents
    /// Residents ever admitted
    pub total_residents: usize,
    /// Residents still in a bed at the horizon end
    pub active_residents: usize,
    /// Discharges booked at admission
    pub scheduled_discharges: usize,
    /// Discharges by attrition
    pub attrition_discharges: usize,

    // Events
    /// ADL assessments
    pub adl_logs: usize,
    /// Vital sign readings
    pub vitals_logs: usize,
    /// Medication administration records
    pub medication_logs: usize,
    /// Range-of-motion sessions
    pub rom_logs: usize,
    /// Behavior notes
    pub behavior_notes: usize,
    /// Activities
    pub activities: usize,
    /// Activity participations
    pub activity_participants: usize,
    /// Incident reports
    pub incidents: usize,
    /// Incident reports per status
    pub incidents_by_status: BTreeMap<String, usize>,
    /// Photos attached to incidents
    pub incident_photos: usize,
    /// Appointments, upcoming ones included
    pub appointments: usize,
    /// Appointments scheduled past the horizon
    pub upcoming_appointments: usize,
    /// Document metadata records
    pub documents: usize,

    // Run metadata
    /// Horizon length in days
    pub days_simulated: i64,
    /// Wall-clock time spent generating
    pub generation_duration: Duration,
}

impl GenerationStatistics {
    /// Count everything in `dataset`
    pub fn from_dataset(dataset: &SyntheticDataset, days_simulated: i64, generation_duration: Duration) -> Self {
        let mut incidents_by_status = BTreeMap::new();
        for incident in &dataset.incidents {
            *incidents_by_status.entry(incident.status.to_string()).or_insert(0) += 1;
        }
        let discharges = |kind: DischargeKind| {
            dataset.residents.iter().filter(|resident| resident.discharge_kind == Some(kind)).count()
        };

        Self {
            total_homes: dataset.homes.len(),
            total_beds: dataset.beds.len(),
            total_users: dataset.users.len(),
            total_caregivers: dataset.users.iter().filter(|user| user.has_role(UserRole::Caregiver)).count(),
            total_assignments: dataset.caregiver_home_assignments.len(),
            total_residents: dataset.residents.len(),
            active_residents: dataset.residents.iter().filter(|resident| resident.is_active).count(),
            scheduled_discharges: discharges(DischargeKind::Scheduled),
            attrition_discharges: discharges(DischargeKind::Attrition),
            adl_logs: dataset.adl_logs.len(),
            vitals_logs: dataset.vitals_logs.len(),
            medication_logs: dataset.medication_logs.len(),
            rom_logs: dataset.rom_logs.len(),
            behavior_notes: dataset.behavior_notes.len(),
            activities: dataset.activities.len(),
            activity_participants: dataset.activity_participants.len(),
            incidents: dataset.incidents.len(),
            incidents_by_status,
            incident_photos: dataset.incidents.iter().map(|incident| incident.photos.len()).sum(),
            appointments: dataset.appointments.len(),
            upcoming_appointments: dataset.appointments.iter().filter(|appointment| appointment.is_upcoming()).count(),
            documents: dataset.documents.len(),
            days_simulated,
            generation_duration,
        }
    }

    /// Daily care records of every kind
    pub fn care_logs(&self) -> usize {
        self.adl_logs + self.vitals_logs + self.medication_logs + self.rom_logs + self.behavior_notes
    }

    /// Percentage of beds held at the horizon end
    pub fn occupancy_percentage(&self) -> f64 {
        if self.total_beds == 0 {
            0.0
        } else {
            (self.active_residents as f64 / self.total_beds as f64) * 100.0
        }
    }

    /// Average care records per simulated day
    pub fn care_logs_per_day(&self) -> f64 {
        if self.days_simulated <= 0 {
            0.0
        } else {
            self.care_logs() as f64 / self.days_simulated as f64
        }
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} homes | {} beds ({:.1}% occupied) | {} residents ({} active) | {} care logs | {} incidents | {} appointments | {} documents",
            self.total_homes,
            self.total_beds,
            self.occupancy_percentage(),
            self.total_residents,
            self.active_residents,
            self.care_logs(),
            self.incidents,
            self.appointments,
            self.documents
        )
    }

    /// Multi-line report printed after a run
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Generation Summary Report ===\n\n");
        report.push_str(&format!(
            "Generation Duration: {:.2} seconds\n",
            self.generation_duration.as_secs_f64()
        ));
        report.push_str(&format!("Days Simulated: {}\n\n", self.days_simulated));

        report.push_str("Homes and Staff:\n");
        report.push_str(&format!("  • Homes: {}\n", self.total_homes));
        report.push_str(&format!("  • Beds: {}\n", self.total_beds));
        report.push_str(&format!(
            "  • Users: {} ({} caregivers, {} assignments)\n\n",
            self.total_users, self.total_caregivers, self.total_assignments
        ));

        report.push_str("Residents:\n");
        report.push_str(&format!("  • Admitted: {}\n", self.total_residents));
        report.push_str(&format!(
            "  • Active at end: {} ({:.1}% occupancy)\n",
            self.active_residents,
            self.occupancy_percentage()
        ));
        report.push_str(&format!("  • Scheduled discharges: {}\n", self.scheduled_discharges));
        report.push_str(&format!("  • Attrition discharges: {}\n\n", self.attrition_discharges));

        report.push_str("Care Logs:\n");
        report.push_str(&format!(
            "  • Total: {} (avg {:.1}/day)\n",
            self.care_logs(),
            self.care_logs_per_day()
        ));
        report.push_str(&format!("  • ADL: {}\n", self.adl_logs));
        report.push_str(&format!("  • Vitals: {}\n", self.vitals_logs));
        report.push_str(&format!("  • Medication: {}\n", self.medication_logs));
        report.push_str(&format!("  • Range of motion: {}\n", self.rom_logs));
        report.push_str(&format!("  • Behavior notes: {}\n\n", self.behavior_notes));

        report.push_str("Activities:\n");
        report.push_str(&format!("  • Sessions: {}\n", self.activities));
        report.push_str(&format!("  • Participations: {}\n\n", self.activity_participants));

        report.push_str("Incidents:\n");
        report.push_str(&format!("  • Reports: {} ({} photos)\n", self.incidents, self.incident_photos));
        for (status, count) in &self.incidents_by_status {
            report.push_str(&format!("  • {}: {}\n", status, count));
        }
        report.push('\n');

        report.push_str("Appointments and Documents:\n");
        report.push_str(&format!(
            "  • Appointments: {} ({} upcoming)\n",
            self.appointments, self.upcoming_appointments
        ));
        report.push_str(&format!("  • Documents: {}\n", self.documents));

        report
    }
}

impl fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}
