//! Admission and discharge lifecycle
//!
//! Drives one home through the horizon:
//!
//! 1. Right after opening, admit one or two residents into free beds, in date
//!    order.
//! 2. From 45 days after opening, advance in 7 to 21 day steps. At each step,
//!    long open stays may end by attrition, then, if a bed is free, a new
//!    resident may be admitted with a stay length decided up front and, with a
//!    smaller chance, a discharge booked for the end of that stay.
//!
//! Every bed change goes through the home's [`OccupancyLedger`], so the census
//! coming out of here never double-books a bed.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::{debug, instrument};

use crate::facility::{Bed, Home, OccupancyLedger};
use crate::reference::{ATTRITION_DISCHARGE_REASONS, SCHEDULED_DISCHARGE_REASONS};
use crate::resident::generator::ResidentGenerator;
use crate::resident::resident::Resident;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::horizon::SimulationHorizon;
use crate::types::config::lifecycle;
use crate::types::{DischargeKind, ResidentId};
use crate::user::CaregiverRoster;

/// Residents of one home together with its bed ledger
#[derive(Debug, Clone)]
pub struct HomeCensus {
    /// Residents in admission order
    pub residents: Vec<Resident>,
    /// Bed intervals of the home
    pub ledger: OccupancyLedger,
}

impl HomeCensus {
    /// Residents still living in the home at the end of the horizon
    pub fn active_count(&self) -> usize {
        self.residents.iter().filter(|resident| resident.is_active).count()
    }
}

/// Stay decided at admission time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPlan {
    /// Intended length of stay in days
    pub length_days: i64,
    /// Whether the discharge is booked now
    pub discharge_scheduled: bool,
}

impl StayPlan {
    /// Draw a stay length and whether its discharge is booked at admission
    pub fn sample(rng: &mut dyn RngCore) -> Self {
        Self {
            length_days: rng.gen_range(lifecycle::MIN_STAY_DAYS..=lifecycle::MAX_STAY_DAYS),
            discharge_scheduled: rng.gen_bool(lifecycle::SCHEDULED_DISCHARGE_PROBABILITY),
        }
    }
}

/// Runs the admission/discharge lifecycle of a home
#[derive(Debug, Clone, Copy)]
pub struct LifecycleSimulator<'a> {
    residents: ResidentGenerator<'a>,
    roster: &'a CaregiverRoster,
    horizon: SimulationHorizon,
}

impl<'a> LifecycleSimulator<'a> {
    /// Create a simulator over `horizon`
    pub fn new(
        residents: ResidentGenerator<'a>,
        roster: &'a CaregiverRoster,
        horizon: SimulationHorizon,
    ) -> Self {
        Self { residents, roster, horizon }
    }

    /// Simulate `home` from its opening to the horizon end
    #[instrument(skip_all, fields(home = %home.name))]
    pub fn simulate_home(
        &self,
        home: &Home,
        beds: &[Bed],
        rng: &mut dyn RngCore,
    ) -> SimulationResult<HomeCensus> {
        let mut census = HomeCensus {
            residents: Vec::new(),
            ledger: OccupancyLedger::new(home.id, beds.iter().map(|bed| bed.id).collect()),
        };
        let opening = home.opening_date();
        let end = self.horizon.end_date();

        let initial = rng
            .gen_range(lifecycle::MIN_INITIAL_RESIDENTS..=lifecycle::MAX_INITIAL_RESIDENTS)
            .min(census.ledger.capacity());
        let mut initial_dates: Vec<NaiveDate> = (0..initial)
            .map(|_| {
                opening
                    + Duration::days(rng.gen_range(0..=lifecycle::INITIAL_ADMISSION_WINDOW_DAYS))
            })
            .filter(|date| *date < end)
            .collect();
        initial_dates.sort();
        for date in initial_dates {
            self.admit(home, &mut census, date, None, rng)?;
        }

        let mut current = opening + Duration::days(lifecycle::FIRST_STEP_OFFSET_DAYS);
        while current < end {
            self.apply_attrition(&mut census, current, rng)?;

            if census.ledger.occupied_on(current) < census.ledger.capacity()
                && rng.gen_bool(lifecycle::ADMISSION_PROBABILITY)
            {
                let plan = StayPlan::sample(rng);
                self.admit(home, &mut census, current, Some(plan), rng)?;
            }

            let step = rng.gen_range(lifecycle::MIN_STEP_DAYS..=lifecycle::MAX_STEP_DAYS);
            current = current + Duration::days(step);
        }

        debug!(
            residents = census.residents.len(),
            active = census.active_count(),
            "Lifecycle finished"
        );
        Ok(census)
    }

    /// Admit one resident on `date` if a bed is free; returns the new resident id
    ///
    /// With no free bed the attempt is skipped and `None` returned.
    pub fn admit(
        &self,
        home: &Home,
        census: &mut HomeCensus,
        date: NaiveDate,
        plan: Option<StayPlan>,
        rng: &mut dyn RngCore,
    ) -> SimulationResult<Option<ResidentId>> {
        let free = census.ledger.free_beds_from(date);
        let Some(bed_id) = free.choose(rng).copied() else {
            if census.ledger.occupied_on(date) < census.ledger.capacity() {
                return Err(SimulationError::invariant_violation(format!(
                    "{} has {} of {} beds occupied on {} but none can be assigned",
                    home.name,
                    census.ledger.occupied_on(date),
                    census.ledger.capacity(),
                    date
                )));
            }
            debug!(%date, "No free bed, admission skipped");
            return Ok(None);
        };

        let created_by = self.roster.pick(home.id, rng).unwrap_or(home.created_by_id);
        let mut resident = self.residents.generate(home, bed_id, date, created_by, rng);
        census.ledger.assign(bed_id, resident.id, date)?;

        if let Some(plan) = plan {
            let discharge_date = date + Duration::days(plan.length_days);
            if plan.discharge_scheduled && discharge_date < self.horizon.end_date() {
                let reason = SCHEDULED_DISCHARGE_REASONS.choose(rng).copied().unwrap_or("Deceased");
                resident.discharge(discharge_date, reason, DischargeKind::Scheduled)?;
                census.ledger.discharge(resident.id, discharge_date)?;
            }
        }

        debug!(resident = %resident.id, bed = %bed_id, %date, "Admitted");
        let id = resident.id;
        census.residents.push(resident);
        Ok(Some(id))
    }

    /// Discharge long open stays with the per-step attrition hazard
    fn apply_attrition(
        &self,
        census: &mut HomeCensus,
        date: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> SimulationResult<()> {
        let candidates: Vec<ResidentId> = census
            .ledger
            .open_intervals()
            .filter(|interval| interval.length_days(date) > lifecycle::HAZARD_MIN_STAY_DAYS)
            .map(|interval| interval.resident_id)
            .collect();

        for resident_id in candidates {
            if !rng.gen_bool(lifecycle::HAZARD_DISCHARGE_PROBABILITY) {
                continue;
            }
            let resident = census
                .residents
                .iter_mut()
                .find(|resident| resident.id == resident_id)
                .ok_or_else(|| {
                    SimulationError::invariant_violation(format!(
                        "ledger names unknown resident {}",
                        resident_id
                    ))
                })?;
            let reason = ATTRITION_DISCHARGE_REASONS.choose(rng).copied().unwrap_or("Transferred");
            resident.discharge(date, reason, DischargeKind::Attrition)?;
            census.ledger.discharge(resident_id, date)?;
            debug!(resident = %resident_id, %date, "Attrition discharge");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::HomeGenerator;
    use crate::reference::BuiltinNameSource;
    use crate::types::SimulationConfig;
    use crate::user::StaffGenerator;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixture {
        home: Home,
        beds: Vec<Bed>,
        roster: CaregiverRoster,
        horizon: SimulationHorizon,
    }

    fn fixture(seed: u64) -> Fixture {
        let names = BuiltinNameSource::new();
        let horizon =
            SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 730);
        let mut generator = HomeGenerator::with_seed(seed);
        let admin = crate::types::UserId::generate(&mut StdRng::seed_from_u64(seed));
        let home = generator
            .generate_home(0, &SimulationConfig::default(), &horizon, admin, &names)
            .unwrap();
        let beds = generator.generate_beds(&home);
        let staff = StaffGenerator::with_seed(seed).generate_staff(
            std::slice::from_ref(&home),
            (2, 3),
            0.0,
            &horizon,
            &names,
        );
        Fixture { home, beds, roster: staff.roster(), horizon }
    }

    #[test]
    fn test_census_is_consistent() {
        let names = BuiltinNameSource::new();
        for seed in 0..20 {
            let f = fixture(seed);
            let simulator = LifecycleSimulator::new(ResidentGenerator::new(&names), &f.roster, f.horizon);
            let census = simulator
                .simulate_home(&f.home, &f.beds, &mut StdRng::seed_from_u64(seed))
                .unwrap();

            assert!(!census.residents.is_empty());
            let intervals: Vec<_> = census.ledger.intervals().copied().collect();
            assert!(crate::facility::find_double_bookings(&intervals).is_empty());
            assert_eq!(intervals.len(), census.residents.len());

            for resident in &census.residents {
                let interval = census.ledger.interval_of(resident.id).unwrap();
                assert_eq!(interval.bed_id, resident.bed_id);
                assert_eq!(interval.start, resident.admission_date);
                assert_eq!(interval.end, resident.discharge_date);
                assert_eq!(resident.is_active, resident.discharge_date.is_none());
                assert!(resident.admission_date >= f.home.opening_date());
                assert!(resident.admission_date < f.horizon.end_date());
                if let Some(end) = resident.discharge_date {
                    assert!(end > resident.admission_date && end < f.horizon.end_date());
                    assert!(resident.discharge_reason.is_some());
                }
                assert!(f.roster.works_at(resident.created_by_id, f.home.id));
            }
        }
    }

    #[test]
    fn test_scheduled_discharge_after_planned_stay() {
        let names = BuiltinNameSource::new();
        let f = fixture(3);
        let simulator = LifecycleSimulator::new(ResidentGenerator::new(&names), &f.roster, f.horizon);
        let mut census = HomeCensus {
            residents: Vec::new(),
            ledger: OccupancyLedger::new(f.home.id, f.beds.iter().map(|bed| bed.id).collect()),
        };
        let day0 = f.horizon.start_date() + Duration::days(60);
        let plan = StayPlan { length_days: 400, discharge_scheduled: true };
        let mut rng = StdRng::seed_from_u64(1);

        let id = simulator.admit(&f.home, &mut census, day0, Some(plan), &mut rng).unwrap().unwrap();
        let resident = census.residents.iter().find(|r| r.id == id).unwrap();
        assert_eq!(resident.discharge_date, Some(day0 + Duration::days(400)));
        assert_eq!(resident.discharge_kind, Some(DischargeKind::Scheduled));
        assert!(!resident.is_active);
        assert!(census.ledger.open_intervals().next().is_none());
    }

    #[test]
    fn test_scheduled_discharge_past_horizon_stays_open() {
        let names = BuiltinNameSource::new();
        let f = fixture(4);
        let simulator = LifecycleSimulator::new(ResidentGenerator::new(&names), &f.roster, f.horizon);
        let mut census = HomeCensus {
            residents: Vec::new(),
            ledger: OccupancyLedger::new(f.home.id, f.beds.iter().map(|bed| bed.id).collect()),
        };
        let late = f.horizon.end_date() - Duration::days(30);
        let plan = StayPlan { length_days: 60, discharge_scheduled: true };
        simulator
            .admit(&f.home, &mut census, late, Some(plan), &mut StdRng::seed_from_u64(2))
            .unwrap();
        assert!(census.residents[0].is_active);
    }

    #[test]
    fn test_full_home_skips_admission() {
        let names = BuiltinNameSource::new();
        let f = fixture(5);
        let simulator = LifecycleSimulator::new(ResidentGenerator::new(&names), &f.roster, f.horizon);
        let mut census = HomeCensus {
            residents: Vec::new(),
            ledger: OccupancyLedger::new(f.home.id, f.beds.iter().map(|bed| bed.id).collect()),
        };
        let day = f.horizon.start_date() + Duration::days(100);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..f.beds.len() {
            assert!(simulator.admit(&f.home, &mut census, day, None, &mut rng).unwrap().is_some());
        }
        assert_eq!(simulator.admit(&f.home, &mut census, day, None, &mut rng).unwrap(), None);
        assert_eq!(census.residents.len(), f.beds.len());
    }

    #[test]
    fn test_same_seed_same_census() {
        let names = BuiltinNameSource::new();
        let f = fixture(6);
        let simulator = LifecycleSimulator::new(ResidentGenerator::new(&names), &f.roster, f.horizon);
        let first = simulator.simulate_home(&f.home, &f.beds, &mut StdRng::seed_from_u64(9)).unwrap();
        let second = simulator.simulate_home(&f.home, &f.beds, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(first.residents, second.residents);
        assert_eq!(first.ledger, second.ledger);
    }
}
