//! Staff generation
//!
//! One administrator and one platform operator exist from the start of the
//! horizon. Each home hires its own caregivers shortly before it opens, and
//! later homes sometimes borrow a caregiver from one of the first three.

use chrono::Duration;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::facility::Home;
use crate::reference::{NameSource, STAFF_EMAIL_DOMAIN};
use crate::simulation::horizon::SimulationHorizon;
use crate::types::{AssignmentId, UserId, UserRole};
use crate::user::roster::CaregiverRoster;
use crate::user::user::{HomeAssignment, User};

/// Homes that may lend caregivers to later homes
const LENDING_HOMES: usize = 3;

/// Latest hire before a home opens, in days
const MAX_HIRE_LEAD_DAYS: i64 = 14;

/// Users and assignments produced for a run
#[derive(Debug, Clone, Default)]
pub struct StaffDirectory {
    /// Every user, administrators first
    pub users: Vec<User>,
    /// Every caregiver home assignment
    pub assignments: Vec<HomeAssignment>,
}

impl StaffDirectory {
    /// The first administrator, if one was generated
    pub fn admin(&self) -> Option<&User> {
        self.users.iter().find(|user| user.has_role(UserRole::Admin))
    }

    /// Build the roster view over this directory
    pub fn roster(&self) -> CaregiverRoster {
        CaregiverRoster::build(&self.users, &self.assignments)
    }

    /// Number of caregivers
    pub fn caregiver_count(&self) -> usize {
        self.users.iter().filter(|user| user.is_caregiver()).count()
    }
}

/// Generator for staff users and their home assignments
pub struct StaffGenerator {
    rng: Box<dyn RngCore>,
    used_emails: HashSet<String>,
}

impl fmt::Debug for StaffGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffGenerator").field("used_emails", &self.used_emails.len()).finish()
    }
}

impl StaffGenerator {
    /// Create a new staff generator with a specific seed for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Create a staff generator drawing from an existing random source
    pub fn from_rng(rng: Box<dyn RngCore>) -> Self {
        Self { rng, used_emails: HashSet::new() }
    }

    /// Administrator and platform operator, both created at the horizon start
    pub fn generate_administrators(
        &mut self,
        horizon: &SimulationHorizon,
        names: &dyn NameSource,
    ) -> (User, User) {
        let admin = self.generate_user(UserRole::Admin, horizon.start(), names);
        let sysadmin = self.generate_user(UserRole::Sysadmin, horizon.start(), names);
        (admin, sysadmin)
    }

    /// Hire `min..=max` caregivers for `home`, each assigned to it at opening
    pub fn generate_caregivers(
        &mut self,
        home: &Home,
        count_range: (usize, usize),
        horizon: &SimulationHorizon,
        assigned_by: UserId,
        names: &dyn NameSource,
    ) -> (Vec<User>, Vec<HomeAssignment>) {
        let (min, max) = count_range;
        let count = self.rng.gen_range(min..=max);
        let mut users = Vec::with_capacity(count);
        let mut assignments = Vec::with_capacity(count);

        for _ in 0..count {
            let lead = Duration::days(self.rng.gen_range(0..=MAX_HIRE_LEAD_DAYS));
            let hired_at = (home.created_at - lead).max(horizon.start());
            let caregiver = self.generate_user(UserRole::Caregiver, hired_at, names);
            assignments.push(self.assignment(&caregiver, home, assigned_by));
            users.push(caregiver);
        }

        debug!(home = %home.name, caregivers = users.len(), "Hired caregivers");
        (users, assignments)
    }

    /// For every home past the first three, with `probability` add an assignment
    /// of a caregiver already working at one of the first three homes
    pub fn cross_home_assignments(
        &mut self,
        homes: &[Home],
        staff: &StaffDirectory,
        probability: f64,
        assigned_by: UserId,
    ) -> Vec<HomeAssignment> {
        let lenders: Vec<&HomeAssignment> = staff
            .assignments
            .iter()
            .filter(|assignment| {
                homes.iter().take(LENDING_HOMES).any(|home| home.id == assignment.home_id)
            })
            .collect();

        let mut extra = Vec::new();
        for home in homes.iter().skip(LENDING_HOMES) {
            if !self.rng.gen_bool(probability) {
                continue;
            }
            let Some(lender) = lenders.choose(&mut self.rng) else {
                continue;
            };
            let Some(caregiver) = staff.users.iter().find(|user| user.id == lender.user_id) else {
                continue;
            };
            debug!(caregiver = %caregiver.email, home = %home.name, "Cross-home assignment");
            extra.push(self.assignment(caregiver, home, assigned_by));
        }
        extra
    }

    /// Full staff for `homes`: administrators, caregivers per home, then
    /// cross-home assignments
    pub fn generate_staff(
        &mut self,
        homes: &[Home],
        caregivers_per_home: (usize, usize),
        cross_home_probability: f64,
        horizon: &SimulationHorizon,
        names: &dyn NameSource,
    ) -> StaffDirectory {
        let administrators = self.generate_administrators(horizon, names);
        self.staff_homes(administrators, homes, caregivers_per_home, cross_home_probability, horizon, names)
    }

    /// Staff `homes` under administrators generated beforehand; used when the
    /// homes themselves need the administrator as their creator
    pub fn staff_homes(
        &mut self,
        administrators: (User, User),
        homes: &[Home],
        caregivers_per_home: (usize, usize),
        cross_home_probability: f64,
        horizon: &SimulationHorizon,
        names: &dyn NameSource,
    ) -> StaffDirectory {
        let (admin, sysadmin) = administrators;
        let admin_id = admin.id;
        let mut staff = StaffDirectory { users: vec![admin, sysadmin], assignments: Vec::new() };

        for home in homes {
            let (users, assignments) =
                self.generate_caregivers(home, caregivers_per_home, horizon, admin_id, names);
            staff.users.extend(users);
            staff.assignments.extend(assignments);
        }

        let extra = self.cross_home_assignments(homes, &staff, cross_home_probability, admin_id);
        staff.assignments.extend(extra);
        staff
    }

    fn assignment(&mut self, caregiver: &User, home: &Home, assigned_by: UserId) -> HomeAssignment {
        HomeAssignment {
            id: AssignmentId::generate(&mut self.rng),
            user_id: caregiver.id,
            home_id: home.id,
            assigned_at: home.created_at,
            assigned_by_id: assigned_by,
            is_active: true,
        }
    }

    fn generate_user(
        &mut self,
        role: UserRole,
        created_at: chrono::DateTime<chrono::Utc>,
        names: &dyn NameSource,
    ) -> User {
        let first_name = names.first_name(None, &mut self.rng);
        let last_name = names.last_name(&mut self.rng);
        let email = self.unique_email(&first_name, &last_name);

        User {
            id: UserId::generate(&mut self.rng),
            email,
            first_name,
            last_name,
            phone_number: names.phone_number(None, &mut self.rng),
            roles: vec![role],
            is_active: true,
            is_mfa_setup_complete: true,
            invitation_accepted: true,
            created_at,
        }
    }

    /// `first.last@domain`, with a counter appended on collision
    fn unique_email(&mut self, first_name: &str, last_name: &str) -> String {
        let local: String = format!("{}.{}", first_name, last_name)
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
            .collect();

        let mut candidate = format!("{}@{}", local, STAFF_EMAIL_DOMAIN);
        let mut counter = 2;
        while self.used_emails.contains(&candidate) {
            candidate = format!("{}{}@{}", local, counter, STAFF_EMAIL_DOMAIN);
            counter += 1;
        }
        self.used_emails.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::HomeGenerator;
    use crate::reference::BuiltinNameSource;
    use crate::types::SimulationConfig;
    use chrono::{TimeZone, Utc};

    fn setup() -> (Vec<Home>, SimulationHorizon) {
        let horizon =
            SimulationHorizon::ending_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 730);
        let admin = UserId::generate(&mut StdRng::seed_from_u64(1));
        let homes = HomeGenerator::with_seed(4)
            .generate_homes(&SimulationConfig::default(), &horizon, admin, &BuiltinNameSource::new())
            .unwrap()
            .into_iter()
            .map(|(home, _)| home)
            .collect();
        (homes, horizon)
    }

    #[test]
    fn test_staff_shape() {
        let (homes, horizon) = setup();
        let staff = StaffGenerator::with_seed(8).generate_staff(
            &homes,
            (2, 3),
            0.5,
            &horizon,
            &BuiltinNameSource::new(),
        );

        assert!(staff.users[0].has_role(UserRole::Admin));
        assert!(staff.users[1].has_role(UserRole::Sysadmin));
        assert_eq!(staff.users[0].created_at, horizon.start());

        let roster = staff.roster();
        assert_eq!(roster.admins(), &[staff.users[0].id]);
        for home in &homes {
            let count = roster.caregivers(home.id).len();
            assert!((2..=4).contains(&count), "home {} has {}", home.name, count);
        }
    }

    #[test]
    fn test_caregivers_hired_before_assignment() {
        let (homes, horizon) = setup();
        let staff = StaffGenerator::with_seed(9).generate_staff(
            &homes,
            (2, 3),
            1.0,
            &horizon,
            &BuiltinNameSource::new(),
        );

        for assignment in &staff.assignments {
            let user = staff.users.iter().find(|u| u.id == assignment.user_id).unwrap();
            assert!(user.is_caregiver());
            assert!(user.created_at <= assignment.assigned_at);
            assert!(user.created_at >= horizon.start());
        }
        // every home past the third borrowed one caregiver
        let base: usize = homes.len();
        assert_eq!(staff.assignments.len(), staff.caregiver_count() + base - LENDING_HOMES);
    }

    #[test]
    fn test_emails_are_unique() {
        let mut generator = StaffGenerator::with_seed(1);
        let first = generator.unique_email("Mary", "O'Brien");
        let second = generator.unique_email("Mary", "O'Brien");
        assert_eq!(first, "mary.obrien@lenkcare.example.com");
        assert_eq!(second, "mary.obrien2@lenkcare.example.com");
    }

    #[test]
    fn test_no_cross_assignments_when_disabled() {
        let (homes, horizon) = setup();
        let staff = StaffGenerator::with_seed(2).generate_staff(
            &homes,
            (2, 2),
            0.0,
            &horizon,
            &BuiltinNameSource::new(),
        );
        assert_eq!(staff.assignments.len(), homes.len() * 2);
    }
}
