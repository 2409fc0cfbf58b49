//! Caregiver roster
//!
//! Read-only view of who works where, built once from the home assignments.
//! Event generators draw caregivers from here.

use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashMap;

use crate::user::user::{HomeAssignment, User};
use crate::types::{HomeId, UserId, UserRole};

/// Caregivers per home plus the administrator pool
#[derive(Debug, Clone, Default)]
pub struct CaregiverRoster {
    by_home: HashMap<HomeId, Vec<UserId>>,
    admins: Vec<UserId>,
}

impl CaregiverRoster {
    /// Build the roster from users and their active assignments, keeping
    /// assignment order within each home
    pub fn build(users: &[User], assignments: &[HomeAssignment]) -> Self {
        let mut by_home: HashMap<HomeId, Vec<UserId>> = HashMap::new();
        for assignment in assignments.iter().filter(|assignment| assignment.is_active) {
            let caregivers = by_home.entry(assignment.home_id).or_default();
            if !caregivers.contains(&assignment.user_id) {
                caregivers.push(assignment.user_id);
            }
        }

        let admins = users
            .iter()
            .filter(|user| user.has_role(UserRole::Admin))
            .map(|user| user.id)
            .collect();

        Self { by_home, admins }
    }

    /// Caregivers assigned to `home_id`
    pub fn caregivers(&self, home_id: HomeId) -> &[UserId] {
        self.by_home.get(&home_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Uniformly chosen caregiver of `home_id`
    pub fn pick(&self, home_id: HomeId, rng: &mut dyn RngCore) -> Option<UserId> {
        self.caregivers(home_id).choose(rng).copied()
    }

    /// Administrators, in creation order
    pub fn admins(&self) -> &[UserId] {
        &self.admins
    }

    /// Uniformly chosen administrator, if any
    pub fn pick_admin(&self, rng: &mut dyn RngCore) -> Option<UserId> {
        self.admins.choose(rng).copied()
    }

    /// Whether `user_id` works at `home_id`
    pub fn works_at(&self, user_id: UserId, home_id: HomeId) -> bool {
        self.caregivers(home_id).contains(&user_id)
    }
}
