//! Residents and their admission/discharge lifecycle
//!
//! - **Resident**: the person, their clinical profile and stay
//! - **ResidentGenerator**: builds profiles from the reference pools
//! - **LifecycleSimulator**: admits and discharges residents over the horizon,
//!   allocating beds through the home's occupancy ledger

pub mod generator;
pub mod lifecycle;
pub mod resident;

pub use generator::ResidentGenerator;
pub use lifecycle::{HomeCensus, LifecycleSimulator, StayPlan};
pub use resident::{Medication, Resident};
