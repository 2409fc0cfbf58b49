//! Home and bed generation
//!
//! Homes open on a fixed schedule relative to the horizon start (see
//! [`opening_window`]); each gets a unique name, a Washington address and a
//! handful of beds created together with it.

use chrono::Duration;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::facility::home::{Bed, Home};
use crate::reference::{NameSource, CITIES, HOME_NAME_PREFIXES, HOME_NAME_SUFFIXES};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::horizon::SimulationHorizon;
use crate::types::{opening_window, BedId, BedStatus, HomeId, SimulationConfig, UserId};

/// Number of random draws before falling back to a scan for an unused name
const NAME_ATTEMPTS: usize = 50;

/// Generator for homes and their beds
pub struct HomeGenerator {
    rng: Box<dyn RngCore>,
    used_names: HashSet<String>,
}

impl fmt::Debug for HomeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeGenerator").field("used_names", &self.used_names.len()).finish()
    }
}

impl HomeGenerator {
    /// Create a new home generator with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Create a home generator drawing from an existing random source
    pub fn from_rng(rng: Box<dyn RngCore>) -> Self {
        Self { rng, used_names: HashSet::new() }
    }

    /// Generate `config.home_count` homes with their beds, in opening order
    pub fn generate_homes(
        &mut self,
        config: &SimulationConfig,
        horizon: &SimulationHorizon,
        created_by: UserId,
        names: &dyn NameSource,
    ) -> SimulationResult<Vec<(Home, Vec<Bed>)>> {
        let mut homes = Vec::with_capacity(config.home_count);

        for index in 0..config.home_count {
            let home = self.generate_home(index, config, horizon, created_by, names)?;
            let beds = self.generate_beds(&home);
            debug!(home = %home.name, sequence = home.sequence, beds = beds.len(), opened = %home.opening_date(), "Generated home");
            homes.push((home, beds));
        }

        Ok(homes)
    }

    /// Generate the home at 0-based `index` in opening order
    pub fn generate_home(
        &mut self,
        index: usize,
        config: &SimulationConfig,
        horizon: &SimulationHorizon,
        created_by: UserId,
        names: &dyn NameSource,
    ) -> SimulationResult<Home> {
        let (min_offset, max_offset) = opening_window(index);
        let offset = self.rng.gen_range(min_offset..=max_offset);
        let opening_date = horizon.start_date() + Duration::days(offset);
        if !horizon.contains_date(opening_date) {
            return Err(SimulationError::configuration_error(format!(
                "home {} would open on {}, outside the horizon",
                index + 1,
                opening_date
            )));
        }

        let sequence = u32::try_from(index + 1)
            .map_err(|_| SimulationError::configuration_error("home count does not fit u32"))?;
        let (min_beds, max_beds) = config.beds_per_home();
        let capacity = self.rng.gen_range(min_beds..=max_beds);
        let city = CITIES.choose(&mut self.rng).copied().unwrap_or(CITIES[0]);
        let name = self.unique_name(sequence);

        Ok(Home {
            id: HomeId::generate(&mut self.rng),
            sequence,
            name,
            address: names.street_address(&mut self.rng),
            city: city.name.to_string(),
            state: city.state.to_string(),
            zip_code: format!("{}{}", city.zip_prefix, self.rng.gen_range(10..=99)),
            phone_number: names.phone_number(None, &mut self.rng),
            capacity,
            is_active: true,
            created_at: horizon.day_start(opening_date),
            created_by_id: created_by,
        })
    }

    /// Generate the beds of `home`
    pub fn generate_beds(&mut self, home: &Home) -> Vec<Bed> {
        (1..=home.capacity)
            .map(|room| Bed {
                id: BedId::generate(&mut self.rng),
                home_id: home.id,
                label: format!("Room {}", room),
                status: BedStatus::Available,
                is_active: true,
                created_at: home.created_at,
            })
            .collect()
    }

    /// Draw an unused `prefix + suffix` name, falling back to a numbered name
    /// once every combination is taken
    fn unique_name(&mut self, sequence: u32) -> String {
        for _ in 0..NAME_ATTEMPTS {
            let prefix = HOME_NAME_PREFIXES.choose(&mut self.rng).copied().unwrap_or("Haven");
            let suffix = HOME_NAME_SUFFIXES.choose(&mut self.rng).copied().unwrap_or("Care Home");
            let name = format!("{} {}", prefix, suffix);
            if self.used_names.insert(name.clone()) {
                return name;
            }
        }

        let unused = HOME_NAME_PREFIXES
            .iter()
            .flat_map(|prefix| HOME_NAME_SUFFIXES.iter().map(move |suffix| format!("{} {}", prefix, suffix)))
            .find(|name| !self.used_names.contains(name));

        let name = unused.unwrap_or_else(|| format!("Care Home {}", sequence));
        self.used_names.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::BuiltinNameSource;
    use chrono::{TimeZone, Utc};

    fn horizon() -> SimulationHorizon {
        SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 730)
    }

    fn opening_instant(horizon: &SimulationHorizon, offset: i64) -> chrono::DateTime<Utc> {
        crate::simulation::horizon::start_of_day(horizon.start_date() + Duration::days(offset))
    }

    fn admin() -> UserId {
        UserId::generate(&mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn test_homes_open_in_their_windows() {
        let config = SimulationConfig::default();
        let horizon = horizon();
        let mut generator = HomeGenerator::with_seed(11);
        let homes = generator
            .generate_homes(&config, &horizon, admin(), &BuiltinNameSource::new())
            .unwrap();

        assert_eq!(homes.len(), config.home_count);
        for (index, (home, beds)) in homes.iter().enumerate() {
            let (min, max) = opening_window(index);
            assert!(home.created_at >= opening_instant(&horizon, min));
            assert!(home.created_at <= opening_instant(&horizon, max));
            assert_eq!(home.sequence as usize, index + 1);
            assert!((4..=6).contains(&home.capacity));
            assert_eq!(beds.len(), home.capacity);
            assert!(beds.iter().all(|bed| bed.home_id == home.id && bed.created_at == home.created_at));
            assert_eq!(home.zip_code.len(), 5);
        }
    }

    #[test]
    fn test_home_names_are_unique() {
        let mut generator = HomeGenerator::with_seed(3);
        let total = HOME_NAME_PREFIXES.len() * HOME_NAME_SUFFIXES.len() + 5;
        let names: HashSet<String> = (0..total as u32).map(|seq| generator.unique_name(seq)).collect();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_same_seed_same_homes() {
        let config = SimulationConfig::default();
        let names = BuiltinNameSource::new();
        let first = HomeGenerator::with_seed(5)
            .generate_homes(&config, &horizon(), admin(), &names)
            .unwrap();
        let second = HomeGenerator::with_seed(5)
            .generate_homes(&config, &horizon(), admin(), &names)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bed_labels() {
        let mut generator = HomeGenerator::with_seed(9);
        let home = generator
            .generate_home(0, &SimulationConfig::default(), &horizon(), admin(), &BuiltinNameSource::new())
            .unwrap();
        let beds = generator.generate_beds(&home);
        assert_eq!(beds[0].label, "Room 1");
        assert!(beds.iter().all(|bed| bed.status == BedStatus::Available && bed.is_active));
    }
}
