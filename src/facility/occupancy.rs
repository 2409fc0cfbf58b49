//! Bed occupancy ledger
//!
//! One [`OccupancyLedger`] per home keeps, for every bed, the list of half-open
//! date intervals `[start, end)` during which a resident held it. An open
//! interval (`end == None`) runs to the end of the horizon.
//!
//! The ledger refuses any assignment that would overlap an existing interval on
//! the same bed. Callers are expected to ask [`OccupancyLedger::free_beds_from`]
//! first; an overlap reaching [`OccupancyLedger::assign`] is a modeling defect
//! and is reported as [`SimulationError::InvariantViolation`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{BedId, HomeId, ResidentId};

/// A resident's hold on a bed over `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyInterval {
    /// Occupied bed
    pub bed_id: BedId,
    /// Occupying resident
    pub resident_id: ResidentId,
    /// Admission date (inclusive)
    pub start: NaiveDate,
    /// Discharge date (exclusive); `None` while the stay is open
    pub end: Option<NaiveDate>,
}

impl OccupancyInterval {
    /// Whether the stay is still open
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whether the bed is held on `date`
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.map_or(true, |end| date < end)
    }

    /// Whether this interval intersects `[start, end)`; `None` is unbounded
    pub fn overlaps(&self, start: NaiveDate, end: Option<NaiveDate>) -> bool {
        let begins_before_other_ends = end.map_or(true, |end| self.start < end);
        let ends_after_other_begins = self.end.map_or(true, |own_end| start < own_end);
        begins_before_other_ends && ends_after_other_begins
    }

    /// Length of the stay in days, measured up to `until` for open stays
    pub fn length_days(&self, until: NaiveDate) -> i64 {
        (self.end.unwrap_or(until) - self.start).num_days()
    }
}

/// Occupancy history of one home
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyLedger {
    home_id: HomeId,
    beds: Vec<BedId>,
    intervals: Vec<Vec<OccupancyInterval>>,
}

impl OccupancyLedger {
    /// Empty ledger over `beds`, in bed order
    pub fn new(home_id: HomeId, beds: Vec<BedId>) -> Self {
        let intervals = vec![Vec::new(); beds.len()];
        Self { home_id, beds, intervals }
    }

    /// Home this ledger belongs to
    pub fn home_id(&self) -> HomeId {
        self.home_id
    }

    /// Number of beds
    pub fn capacity(&self) -> usize {
        self.beds.len()
    }

    /// Beds held on `date`
    pub fn occupied_on(&self, date: NaiveDate) -> usize {
        self.intervals
            .iter()
            .filter(|history| history.iter().any(|interval| interval.covers(date)))
            .count()
    }

    /// Whether `bed_id` has no interval covering `date`
    pub fn is_free_on(&self, bed_id: BedId, date: NaiveDate) -> bool {
        self.history(bed_id)
            .map(|history| history.iter().all(|interval| !interval.covers(date)))
            .unwrap_or(false)
    }

    /// Beds free on `date`, in bed order
    pub fn free_beds_on(&self, date: NaiveDate) -> Vec<BedId> {
        self.beds.iter().copied().filter(|bed| self.is_free_on(*bed, date)).collect()
    }

    /// Beds with nothing booked from `date` onwards, in bed order
    ///
    /// This is the check used before an open-ended admission: a bed that is free
    /// on `date` but already promised to a later stay is not offered.
    pub fn free_beds_from(&self, date: NaiveDate) -> Vec<BedId> {
        self.beds
            .iter()
            .zip(&self.intervals)
            .filter(|(_, history)| history.iter().all(|interval| !interval.overlaps(date, None)))
            .map(|(bed, _)| *bed)
            .collect()
    }

    /// Record that `resident_id` takes `bed_id` from `start` with an open end
    pub fn assign(
        &mut self,
        bed_id: BedId,
        resident_id: ResidentId,
        start: NaiveDate,
    ) -> SimulationResult<()> {
        let position = self.position(bed_id)?;
        let history = &mut self.intervals[position];

        if let Some(clash) = history.iter().find(|interval| interval.overlaps(start, None)) {
            return Err(SimulationError::invariant_violation(format!(
                "bed {} is held by {} from {} and cannot take {} on {}",
                bed_id, clash.resident_id, clash.start, resident_id, start
            )));
        }

        history.push(OccupancyInterval { bed_id, resident_id, start, end: None });
        history.sort_by_key(|interval| interval.start);
        Ok(())
    }

    /// Close the open interval of `resident_id` at `date`
    pub fn discharge(&mut self, resident_id: ResidentId, date: NaiveDate) -> SimulationResult<()> {
        let interval = self
            .intervals
            .iter_mut()
            .flat_map(|history| history.iter_mut())
            .filter(|interval| interval.resident_id == resident_id && interval.is_open())
            .max_by_key(|interval| interval.start)
            .ok_or_else(|| {
                SimulationError::invariant_violation(format!(
                    "resident {} has no open bed interval to close",
                    resident_id
                ))
            })?;

        if date <= interval.start {
            return Err(SimulationError::invariant_violation(format!(
                "discharge of {} on {} is not after admission on {}",
                resident_id, date, interval.start
            )));
        }

        interval.end = Some(date);
        Ok(())
    }

    /// Most recent interval of `resident_id`
    pub fn interval_of(&self, resident_id: ResidentId) -> Option<&OccupancyInterval> {
        self.intervals
            .iter()
            .flatten()
            .filter(|interval| interval.resident_id == resident_id)
            .max_by_key(|interval| interval.start)
    }

    /// Intervals still open
    pub fn open_intervals(&self) -> impl Iterator<Item = &OccupancyInterval> + '_ {
        self.intervals.iter().flatten().filter(|interval| interval.is_open())
    }

    /// History of one bed, ordered by start date
    pub fn history(&self, bed_id: BedId) -> Option<&[OccupancyInterval]> {
        self.beds
            .iter()
            .position(|bed| *bed == bed_id)
            .map(|position| self.intervals[position].as_slice())
    }

    /// Every interval, bed by bed, each bed ordered by start date
    pub fn intervals(&self) -> impl Iterator<Item = &OccupancyInterval> + '_ {
        self.intervals.iter().flatten()
    }

    /// Consume the ledger, returning every interval bed by bed
    pub fn into_intervals(self) -> Vec<OccupancyInterval> {
        self.intervals.into_iter().flatten().collect()
    }

    fn position(&self, bed_id: BedId) -> SimulationResult<usize> {
        self.beds.iter().position(|bed| *bed == bed_id).ok_or_else(|| {
            SimulationError::invariant_violation(format!(
                "bed {} does not belong to home {}",
                bed_id, self.home_id
            ))
        })
    }
}

/// Check that no two intervals of the same bed overlap
pub fn find_double_bookings(intervals: &[OccupancyInterval]) -> Vec<(OccupancyInterval, OccupancyInterval)> {
    let mut clashes = Vec::new();
    for (index, first) in intervals.iter().enumerate() {
        for second in &intervals[index + 1..] {
            if first.bed_id == second.bed_id && first.overlaps(second.start, second.end) {
                clashes.push((*first, *second));
            }
        }
    }
    clashes
}
