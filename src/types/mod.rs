//! Core types and identifiers for the care history generator
//!
//! - **Identifiers**: UUID newtypes minted from the seeded random stream
//! - **Enums**: typed categories, several carrying a probability table
//! - **Weighted**: weighted selection and weight-table validation
//! - **Configuration**: run configuration with CLI and JSON file support
//!
//! # Usage Example
//!
//! ```rust
//! use care_history_simulator::types::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let home_id = HomeId::generate(&mut rng);
//! let incident_type = IncidentType::sample(&mut rng);
//! assert!(IncidentType::ALL.contains(&incident_type));
//!
//! let config = SimulationConfig { home_count: 3, ..Default::default() };
//! assert!(config.validate().is_ok());
//! # let _ = home_id;
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;
pub mod weighted;

pub use config::*;
pub use enums::*;
pub use identifiers::*;
pub use weighted::*;
