//! Resident-scoped event records
//!
//! Every record tied to a resident exposes who it is about and when it happened
//! through [`ResidentEvent`], so containment in the resident's stay can be
//! checked uniformly.

use chrono::{DateTime, NaiveDate, Utc};

use crate::resident::Resident;
use crate::simulation::horizon::{DayRange, SimulationHorizon};
use crate::types::ResidentId;

/// A record about one resident at one instant
pub trait ResidentEvent {
    /// Resident the record is about
    fn resident_id(&self) -> ResidentId;

    /// When it happened
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Days on which care is delivered to `resident`: admission date inclusive to
/// discharge date (or horizon end date) exclusive
pub fn care_days(resident: &Resident, horizon: &SimulationHorizon) -> DayRange {
    horizon.days(resident.admission_date, resident.window_end(horizon))
}

/// Whether `timestamp` falls in the resident's stay, the horizon end standing
/// in for a missing discharge
pub fn within_stay(resident: &Resident, horizon: &SimulationHorizon, timestamp: DateTime<Utc>) -> bool {
    let end: Option<NaiveDate> = resident.discharge_date;
    let before_end = match end {
        Some(date) => timestamp.date_naive() < date,
        None => timestamp < horizon.end(),
    };
    timestamp >= resident.admitted_at && before_end
}
