//! The assembled synthetic dataset

use serde::{Deserialize, Serialize};

use crate::documents::DocumentMetadata;
use crate::events::{
    Activity, AdlLog, Appointment, BehaviorNote, CareLogs, Incident, MedicationLog, Participation, RomLog,
    VitalsLog,
};
use crate::facility::{Bed, Home, OccupancyInterval};
use crate::resident::Resident;
use crate::types::ResidentId;
use crate::user::{HomeAssignment, User};

/// Every collection produced by one run, in generation order
///
/// Serialized with camelCase keys, one array per collection; this is the shape
/// of `all_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticDataset {
    /// Homes in opening order
    pub homes: Vec<Home>,
    /// Beds grouped by home
    pub beds: Vec<Bed>,
    /// Occupancy intervals grouped by home
    pub bed_occupancy: Vec<OccupancyInterval>,
    /// Administrators followed by caregivers
    pub users: Vec<User>,
    /// Caregiver to home assignments
    pub caregiver_home_assignments: Vec<HomeAssignment>,
    /// Residents grouped by home, in admission order
    pub residents: Vec<Resident>,
    /// ADL assessments
    pub adl_logs: Vec<AdlLog>,
    /// Vital sign readings
    pub vitals_logs: Vec<VitalsLog>,
    /// Medication administration records
    pub medication_logs: Vec<MedicationLog>,
    /// Range-of-motion sessions
    pub rom_logs: Vec<RomLog>,
    /// Behavior notes
    pub behavior_notes: Vec<BehaviorNote>,
    /// Home activities
    pub activities: Vec<Activity>,
    /// Activity attendance
    pub activity_participants: Vec<Participation>,
    /// Incident reports
    pub incidents: Vec<Incident>,
    /// Appointments
    pub appointments: Vec<Appointment>,
    /// Document metadata
    pub documents: Vec<DocumentMetadata>,
}

impl SyntheticDataset {
    /// Move a batch of care logs into the dataset
    pub fn absorb_care_logs(&mut self, logs: CareLogs) {
        let CareLogs { adl, vitals, medication, rom, behavior } = logs;
        self.adl_logs.extend(adl);
        self.vitals_logs.extend(vitals);
        self.medication_logs.extend(medication);
        self.rom_logs.extend(rom);
        self.behavior_notes.extend(behavior);
    }

    /// Number of care log records of all kinds
    pub fn care_log_count(&self) -> usize {
        self.adl_logs.len()
            + self.vitals_logs.len()
            + self.medication_logs.len()
            + self.rom_logs.len()
            + self.behavior_notes.len()
    }

    /// Number of records across every collection
    pub fn record_count(&self) -> usize {
        self.homes.len()
            + self.beds.len()
            + self.bed_occupancy.len()
            + self.users.len()
            + self.caregiver_home_assignments.len()
            + self.residents.len()
            + self.care_log_count()
            + self.activities.len()
            + self.activity_participants.len()
            + self.incidents.len()
            + self.appointments.len()
            + self.documents.len()
    }

    /// Resident by id
    pub fn resident(&self, id: ResidentId) -> Option<&Resident> {
        self.residents.iter().find(|resident| resident.id == id)
    }
}
