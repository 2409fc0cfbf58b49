//! Staff user and home assignment records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AssignmentId, HomeId, UserId, UserRole};

/// A staff account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user
    pub id: UserId,
    /// Login email, unique across the run
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone
    pub phone_number: String,
    /// Roles held by the account
    pub roles: Vec<UserRole>,
    /// Whether the account is enabled
    pub is_active: bool,
    /// Whether multi-factor setup was completed
    pub is_mfa_setup_complete: bool,
    /// Whether the invitation email was accepted
    pub invitation_accepted: bool,
    /// Hire instant
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if the user holds `role`
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the user is direct-care staff
    pub fn is_caregiver(&self) -> bool {
        self.has_role(UserRole::Caregiver)
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Link between a caregiver and a home they work at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeAssignment {
    /// Unique identifier
    pub id: AssignmentId,
    /// Assigned caregiver
    pub user_id: UserId,
    /// Home worked at
    pub home_id: HomeId,
    /// When the assignment started
    pub assigned_at: DateTime<Utc>,
    /// Administrator who made the assignment
    pub assigned_by_id: UserId,
    /// Whether the assignment is current
    pub is_active: bool,
}
