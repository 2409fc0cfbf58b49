//! Resident and home event streams
//!
//! Everything that happens after a resident moves in is generated here:
//!
//! - **Care logs**: daily ADL, vitals, medication, range-of-motion and
//!   behavior records, produced lazily per resident by [`CareLogStream`]
//! - **Activities**: weekly home activities and who attended them
//! - **Incidents**: reports with checksummed [`IncidentNumber`]s and photos
//! - **Appointments**: external and in-home visits with outcomes
//!
//! Records tied to a resident implement [`ResidentEvent`], which the dataset
//! audit uses to check they fall inside the resident's stay.
//!
//! # Usage Example
//!
//! ```rust
//! use care_history_simulator::events::*;
//! use care_history_simulator::types::IncidentType;
//!
//! let mut counter = HomeIncidentCounter::new(1);
//! let first = counter.next_number(IncidentType::Fall).unwrap();
//! assert!(is_valid(first.as_str()));
//! assert_eq!(first.sequence(), 1);
//! ```

pub mod activity;
pub mod appointment;
pub mod care_logs;
pub mod incident;
pub mod incident_number;
pub mod window;

// Re-export all public types for convenience
pub use activity::*;
pub use appointment::*;
pub use care_logs::*;
pub use incident::*;
pub use incident_number::*;
pub use window::*;
