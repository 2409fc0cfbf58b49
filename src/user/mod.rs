//! Staff users, home assignments and the caregiver roster
//!
//! - **User**: an administrator, platform operator or caregiver account
//! - **HomeAssignment**: links a caregiver to a home they work at
//! - **StaffGenerator**: hires staff as homes open
//! - **CaregiverRoster**: who works where, used by every event generator

pub mod generator;
pub mod roster;
pub mod user;

pub use generator::{StaffDirectory, StaffGenerator};
pub use roster::CaregiverRoster;
pub use user::{HomeAssignment, User};
