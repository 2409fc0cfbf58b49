//! Homes, beds and bed occupancy
//!
//! # Overview
//!
//! - **Home**: a licensed care home with a fixed number of beds
//! - **Bed**: created with its home, never changed afterwards
//! - **OccupancyLedger**: per-home interval ledger that hands out free beds
//! - **HomeRegistry**: homes in opening order with lookup by id
//! - **HomeGenerator**: opens homes over the horizon
//!
//! # Usage Example
//!
//! ```rust
//! use care_history_simulator::facility::*;
//! use care_history_simulator::reference::BuiltinNameSource;
//! use care_history_simulator::simulation::horizon::SimulationHorizon;
//! use care_history_simulator::types::*;
//! use chrono::{TimeZone, Utc};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = SimulationConfig::default();
//! let horizon = SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 730);
//! let mut rng = StdRng::seed_from_u64(7);
//! let admin = UserId::generate(&mut rng);
//!
//! let mut generator = HomeGenerator::with_seed(42);
//! let registry: HomeRegistry = generator
//!     .generate_homes(&config, &horizon, admin, &BuiltinNameSource::new())
//!     .unwrap()
//!     .into_iter()
//!     .collect();
//!
//! let entry = &registry.entries()[0];
//! let ledger = OccupancyLedger::new(entry.home.id, entry.beds.iter().map(|bed| bed.id).collect());
//! assert_eq!(ledger.free_beds_from(entry.home.opening_date()).len(), entry.home.capacity);
//! ```

pub mod generator;
pub mod home;
pub mod occupancy;
pub mod registry;

pub use generator::HomeGenerator;
pub use home::{Bed, Home};
pub use occupancy::{find_double_bookings, OccupancyInterval, OccupancyLedger};
pub use registry::{HomeEntry, HomeRegistry};
