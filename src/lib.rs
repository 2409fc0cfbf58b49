//! Care History Simulator
//!
//! A deterministic generator of synthetic operational history for a group of
//! residential care homes: homes opening over time, beds filling and emptying,
//! residents admitted and discharged, and the daily records a care team keeps.
//!
//! # Overview
//!
//! The generated dataset is meant as demo and test data for applications that
//! need realistic, fully cross-referenced records without temporal
//! contradictions. No bed is ever held by two residents at once, and no record
//! about a resident falls outside their stay.
//!
//! ## Key Features
//!
//! - **Bed Allocation**: per-home occupancy ledger of half-open intervals
//! - **Admission Lifecycle**: stepped admissions with scheduled and attrition discharges
//! - **Event Streams**: ADL, vitals, medication, range of motion and behavior logs,
//!   activities, incidents and appointments
//! - **Incident Numbers**: base-36 identifiers protected by a Luhn mod 36 check character
//! - **Reproducible Runs**: a fixed seed and horizon anchor replay the same dataset
//! - **Self-Audit**: cross-record invariants checked before anything is written
//!
//! ## Quick Start
//!
//! ```rust
//! use care_history_simulator::*;
//! use chrono::{TimeZone, Utc};
//!
//! let config = SimulationConfig {
//!     seed: 7,
//!     anchor: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
//!     horizon_days: 365,
//!     home_count: 2,
//!     ..Default::default()
//! };
//!
//! let orchestrator = SimulationOrchestrator::new(config)?;
//! let output = orchestrator.run()?;
//! println!("Generated {} residents", output.statistics.total_residents);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enumerations with weight tables, configuration
//! - [`reference`]: Static choice pools and the name/address/phone source
//! - [`facility`]: Homes, beds and the bed occupancy ledger
//! - [`user`]: Administrators, caregivers and home assignments
//! - [`resident`]: Resident records and the admission/discharge lifecycle
//! - [`events`]: Care logs, activities, incidents, appointments, incident numbers
//! - [`documents`]: Document planning and the rendering seam
//! - [`simulation`]: Orchestration, audit, output, statistics, logging and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Facility   │    │    User     │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Homes, Beds │◄───┤ Staff       │
//! │ Enums       │    │ Occupancy   │    │ Roster      │
//! │ Config      │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Resident   │    │   Events    │    │ Simulation  │
//! │             │    │             │    │             │
//! │ Lifecycle   │◄───┤ Care Logs   │◄───┤ Orchestrator│
//! │ Generator   │    │ Incidents   │    │ Audit       │
//! │             │    │ Appointments│    │ Output      │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod documents;
pub mod events;
pub mod facility;
pub mod reference;
pub mod resident;
pub mod simulation;
pub mod types;
pub mod user;

// Core types and identifiers
pub use types::{
    // Identifiers
    BedId,
    HomeId,
    ResidentId,
    UserId,
    // Enums
    DischargeKind,
    IncidentStatus,
    IncidentType,
    // Configuration
    ConfigValidationError,
    SimulationConfig,
};

// Facility and staff
pub use facility::{Bed, Home, OccupancyInterval, OccupancyLedger};
pub use user::{CaregiverRoster, HomeAssignment, User};

// Residents
pub use resident::{LifecycleSimulator, Resident};

// Events
pub use events::{Activity, Appointment, CareLogs, Incident, IncidentNumber};

// Simulation
pub use simulation::{
    DatasetAuditor, DatasetWriter, GenerationOutput, GenerationStatistics, LoggingConfig, SimulationError,
    SimulationHorizon, SimulationOrchestrator, SimulationResult, SyntheticDataset,
};
