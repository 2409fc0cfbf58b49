//! Home activities and participation
//!
//! Each home runs two to five activities a week, starting a week after it
//! opens. Participants are drawn from the residents living there on the day of
//! the activity.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::window::ResidentEvent;
use crate::facility::Home;
use crate::reference::{ActivityTemplate, ACTIVITIES};
use crate::resident::Resident;
use crate::simulation::horizon::{at_time, SimulationHorizon};
use crate::types::{ActivityCategory, ActivityId, HomeId, ParticipationId, ResidentId, UserId};
use crate::user::CaregiverRoster;

/// Clock times serialized as `HH:MM`
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    /// Serialize as `HH:MM`
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    /// Parse `HH:MM`
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&text, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A scheduled activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique identifier
    pub id: ActivityId,
    /// Hosting home
    pub home_id: HomeId,
    /// Caregiver running it
    pub caregiver_id: UserId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Category
    pub category: ActivityCategory,
    /// Whether several residents take part
    pub is_group_activity: bool,
    /// Day it takes place
    pub activity_date: NaiveDate,
    /// Start time
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// End time
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Length in minutes
    pub duration_minutes: u32,
    /// Record creation instant
    pub created_at: DateTime<Utc>,
    /// Never updated after creation
    pub updated_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Start instant
    pub fn starts_at(&self) -> DateTime<Utc> {
        at_time(self.activity_date, 0, 0) + (self.start_time - NaiveTime::MIN)
    }
}

/// A resident taking part in an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    /// Unique identifier
    pub id: ParticipationId,
    /// Activity
    pub activity_id: ActivityId,
    /// Participant
    pub resident_id: ResidentId,
    /// Day of the activity
    pub activity_date: NaiveDate,
    /// Record creation instant, the activity start
    pub created_at: DateTime<Utc>,
}

impl ResidentEvent for Participation {
    fn resident_id(&self) -> ResidentId {
        self.resident_id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Activities and participations of one or more homes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitySchedule {
    /// Activities in date order per home
    pub activities: Vec<Activity>,
    /// Participations in activity order
    pub participations: Vec<Participation>,
}

/// Weekly activity planner
#[derive(Debug, Clone, Copy)]
pub struct ActivityGenerator {
    horizon: SimulationHorizon,
}

impl ActivityGenerator {
    /// Create a planner over `horizon`
    pub fn new(horizon: SimulationHorizon) -> Self {
        Self { horizon }
    }

    /// Plan every week of `home` from a week after opening to the horizon end
    pub fn generate_for_home(
        &self,
        home: &Home,
        residents: &[Resident],
        roster: &CaregiverRoster,
        rng: &mut dyn RngCore,
    ) -> ActivitySchedule {
        let mut schedule = ActivitySchedule::default();
        let end = self.horizon.end_date();
        let mut week = home.opening_date() + Duration::days(7);

        while week < end {
            let count = rng.gen_range(2..=5);
            for _ in 0..count {
                let date = week + Duration::days(rng.gen_range(0..=6));
                if date >= end {
                    continue;
                }
                self.plan_activity(home, residents, roster, date, &mut schedule, rng);
            }
            week = week + Duration::weeks(1);
        }

        debug!(
            home = %home.name,
            activities = schedule.activities.len(),
            participations = schedule.participations.len(),
            "Planned activities"
        );
        schedule
    }

    fn plan_activity(
        &self,
        home: &Home,
        residents: &[Resident],
        roster: &CaregiverRoster,
        date: NaiveDate,
        schedule: &mut ActivitySchedule,
        rng: &mut dyn RngCore,
    ) {
        let present: Vec<&Resident> =
            residents.iter().filter(|resident| resident.is_resident_on(date)).collect();
        if present.is_empty() {
            return;
        }
        let Some(caregiver_id) = roster.pick(home.id, rng) else {
            return;
        };
        let Some(template): Option<&ActivityTemplate> = ACTIVITIES.choose(rng) else {
            return;
        };

        let start_time = NaiveTime::from_hms_opt(rng.gen_range(9..=16), 0, 0).unwrap_or(NaiveTime::MIN);
        let duration_minutes: u32 = [30, 45, 60, 90].choose(rng).copied().unwrap_or(60);
        let end_time = start_time + Duration::minutes(i64::from(duration_minutes));
        let created_at = at_time(date, 0, 0) + (start_time - NaiveTime::MIN);

        let activity = Activity {
            id: ActivityId::generate(rng),
            home_id: home.id,
            caregiver_id,
            name: template.name.to_string(),
            description: format!("{} activity session", template.name),
            category: template.category,
            is_group_activity: template.group,
            activity_date: date,
            start_time,
            end_time,
            duration_minutes,
            created_at,
            updated_at: None,
        };

        let seats = if template.group { rng.gen_range(2..=6).min(present.len()) } else { 1 };
        let chosen: Vec<&&Resident> = present.choose_multiple(rng, seats).collect();
        for resident in chosen {
            schedule.participations.push(Participation {
                id: ParticipationId::generate(rng),
                activity_id: activity.id,
                resident_id: resident.id,
                activity_date: date,
                created_at,
            });
        }
        schedule.activities.push(activity);
    }
}
