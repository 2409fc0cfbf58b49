//! Home and bed records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{BedId, BedStatus, HomeId, UserId};

/// A licensed residential care home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    /// Unique identifier
    pub id: HomeId,
    /// 1-based position in opening order; encoded into incident numbers
    pub sequence: u32,
    /// Display name
    pub name: String,
    /// Street line
    pub address: String,
    /// City
    pub city: String,
    /// State code
    pub state: String,
    /// Five-digit zip code
    pub zip_code: String,
    /// Front desk phone
    pub phone_number: String,
    /// Number of beds
    pub capacity: usize,
    /// Whether the home is operating
    pub is_active: bool,
    /// Opening instant
    pub created_at: DateTime<Utc>,
    /// Administrator who registered the home
    pub created_by_id: UserId,
}

impl Home {
    /// Calendar day the home opened
    pub fn opening_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Area code of the home phone, used for related contacts
    pub fn area_code(&self) -> Option<&str> {
        self.phone_number.strip_prefix('(').and_then(|rest| rest.get(..3))
    }
}

/// A bed in a home. Created with the home and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    /// Unique identifier
    pub id: BedId,
    /// Owning home
    pub home_id: HomeId,
    /// Room label, e.g. "Room 3"
    pub label: String,
    /// Administrative status
    pub status: BedStatus,
    /// Whether the bed is in use
    pub is_active: bool,
    /// Same as the owning home's opening instant
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_home_serializes_camel_case() {
        let mut rng = StdRng::seed_from_u64(1);
        let home = Home {
            id: HomeId::generate(&mut rng),
            sequence: 1,
            name: "Cedar Care Home".to_string(),
            address: "100 Pine St".to_string(),
            city: "Kent".to_string(),
            state: "WA".to_string(),
            zip_code: "98031".to_string(),
            phone_number: "(253) 555-0142".to_string(),
            capacity: 5,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap(),
            created_by_id: UserId::generate(&mut rng),
        };

        let json = serde_json::to_value(&home).unwrap();
        assert_eq!(json["zipCode"], "98031");
        assert_eq!(json["createdAt"], "2023-03-01T00:00:00Z");
        assert_eq!(home.area_code(), Some("253"));
        assert_eq!(home.opening_date(), NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
    }
}
