//! Unique identifier types for the care history generator
//!
//! Every entity carries a UUID-based identifier. Identifiers are minted from the
//! run's seeded random stream through [`mint_uuid`], so a fixed seed reproduces
//! the same ids. Serialized form is the plain hyphenated UUID; the `Display`
//! form carries a short kind prefix, which keeps log lines readable.

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::{Builder, Uuid};

/// Mint a version-4 UUID from the given random stream
///
/// This is the single identifier-generation entry point; all id newtypes go
/// through it.
pub fn mint_uuid(rng: &mut dyn RngCore) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Mint a new identifier from the simulation's random stream
            pub fn generate(rng: &mut dyn RngCore) -> Self {
                Self(mint_uuid(rng))
            }

            /// Borrow the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0.simple())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_str(&self.0.hyphenated())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                // Accept the prefixed display form as well as a raw UUID
                let raw = s.strip_prefix(concat!($prefix, "_")).unwrap_or(&s);
                let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
                Ok($name(uuid))
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a care home
    HomeId,
    "HOME"
);
uuid_identifier!(
    /// Unique identifier for a bed within a home
    BedId,
    "BED"
);
uuid_identifier!(
    /// Unique identifier for a staff user (admin, sysadmin or caregiver)
    UserId,
    "USER"
);
uuid_identifier!(
    /// Unique identifier for a caregiver-to-home assignment
    AssignmentId,
    "ASSIGN"
);
uuid_identifier!(
    /// Unique identifier for a resident
    ResidentId,
    "RES"
);
uuid_identifier!(
    /// Unique identifier for a daily or periodic care log entry
    LogId,
    "LOG"
);
uuid_identifier!(
    /// Unique identifier for a scheduled activity
    ActivityId,
    "ACT"
);
uuid_identifier!(
    /// Unique identifier for an activity participation record
    ParticipationId,
    "PART"
);
uuid_identifier!(
    /// Unique identifier for an incident report
    IncidentId,
    "INC"
);
uuid_identifier!(
    /// Unique identifier for an incident photo attachment
    PhotoId,
    "PHOTO"
);
uuid_identifier!(
    /// Unique identifier for an appointment
    AppointmentId,
    "APPT"
);
uuid_identifier!(
    /// Unique identifier for a rendered resident document
    DocumentId,
    "DOC"
);
