//! Generation orchestration and control
//!
//! This module contains the orchestrator that sequences every generation
//! phase, the simulation horizon, per-phase random streams, the assembled
//! dataset with its audit, output writing, statistics, logging and errors.
//!
//! # Overview
//!
//! - **SimulationOrchestrator**: runs homes, staff, lifecycle, care logs,
//!   activities, incidents, appointments and documents in dependency order
//! - **SimulationHorizon**: the `[start, end)` window every timestamp falls in
//! - **DatasetAuditor**: re-checks cross-record invariants before output
//! - **DatasetWriter**: writes one JSON file per collection plus `all_data.json`
//! - **GenerationStatistics**: counts reported after a run
//! - **SimulationError**: error taxonomy of a run
//!
//! # Usage Example
//!
//! ```rust
//! use care_history_simulator::simulation::*;
//! use care_history_simulator::types::*;
//! use chrono::{TimeZone, Utc};
//!
//! let config = SimulationConfig {
//!     anchor: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
//!     horizon_days: 365,
//!     home_count: 1,
//!     render_documents: false,
//!     ..Default::default()
//! };
//!
//! let output = SimulationOrchestrator::new(config)?.run()?;
//! assert_eq!(output.dataset.homes.len(), 1);
//! println!("{}", output.statistics.summary());
//! # Ok::<(), SimulationError>(())
//! ```

pub mod audit;
pub mod dataset;
pub mod error;
pub mod horizon;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod seeding;
pub mod statistics;

// Re-export all public types for convenience
pub use audit::*;
pub use dataset::*;
pub use error::*;
pub use horizon::*;
pub use logging::*;
pub use orchestrator::*;
pub use output::*;
pub use seeding::*;
pub use statistics::*;
