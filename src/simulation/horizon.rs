//! Simulation horizon and calendar helpers
//!
//! The horizon is the half-open window `[start, end)` every generated timestamp
//! must fall in. Day-granular streams treat `end_date()` as exclusive, so a
//! record dated on any earlier day is always strictly before `end`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// First hour of the caregiver working day
pub const WORKDAY_START_HOUR: u32 = 6;

/// Last hour of the caregiver working day
pub const WORKDAY_END_HOUR: u32 = 22;

/// Midnight UTC at the start of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// `date` at `hour:minute` UTC; out-of-range clock values fall back to midnight
pub fn at_time(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_time(time))
}

/// Random minute of the working day on `date`
pub fn working_time(date: NaiveDate, rng: &mut dyn RngCore) -> DateTime<Utc> {
    let hour = rng.gen_range(WORKDAY_START_HOUR..=WORKDAY_END_HOUR);
    let minute = rng.gen_range(0..60);
    at_time(date, hour, minute)
}

/// Iterator over calendar days in `[from, until)`
#[derive(Debug, Clone)]
pub struct DayRange {
    next: Option<NaiveDate>,
    until: NaiveDate,
}

impl DayRange {
    /// Days from `from` up to but excluding `until`
    pub fn new(from: NaiveDate, until: NaiveDate) -> Self {
        Self { next: Some(from), until }
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|day| *day < self.until)?;
        self.next = current.succ_opt();
        Some(current)
    }
}

/// The window `[start, end)` a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationHorizon {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SimulationHorizon {
    /// Horizon of `days` days ending at `end`
    pub fn ending_at(end: DateTime<Utc>, days: i64) -> Self {
        Self { start: end - Duration::days(days), end }
    }

    /// First instant of the horizon
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// First instant past the horizon
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Calendar day containing the horizon start
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Calendar day containing the horizon end; exclusive for day-granular streams
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Horizon length in whole days
    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether `timestamp` lies in `[start, end)`
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    /// Whether `date` is a day the day-granular streams may use
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date < self.end_date()
    }

    /// Pull `timestamp` into the horizon: no earlier than `start`, no later than
    /// one second before `end`
    pub fn clamp(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        let latest = self.end - Duration::seconds(1);
        timestamp.max(self.start).min(latest)
    }

    /// Midnight of `date`, but never before the horizon start
    pub fn day_start(&self, date: NaiveDate) -> DateTime<Utc> {
        start_of_day(date).max(self.start)
    }

    /// Every usable day from `from` up to `until` (exclusive), cut at the horizon end
    pub fn days(&self, from: NaiveDate, until: NaiveDate) -> DayRange {
        DayRange::new(from.max(self.start_date()), until.min(self.end_date()))
    }

    /// Random day in `[from, until)` within the horizon, if any
    pub fn random_day(
        &self,
        from: NaiveDate,
        until: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> Option<NaiveDate> {
        let from = from.max(self.start_date());
        let until = until.min(self.end_date());
        let span = (until - from).num_days();
        if span <= 0 {
            return None;
        }
        Some(from + Duration::days(rng.gen_range(0..span)))
    }
}
