//! Fixed choice pools
//!
//! Plain static tables. Generators treat them as opaque uniform pools; where a
//! value should be more likely it is simply listed more than once.

use crate::types::{ActivityCategory, BehaviorCategory};

/// City a home can be located in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// City name
    pub name: &'static str,
    /// Two-letter state code
    pub state: &'static str,
    /// First three digits of the zip code
    pub zip_prefix: &'static str,
}

/// Washington cities homes are placed in
pub const CITIES: &[City] = &[
    City { name: "Seattle", state: "WA", zip_prefix: "981" },
    City { name: "Tacoma", state: "WA", zip_prefix: "984" },
    City { name: "Spokane", state: "WA", zip_prefix: "992" },
    City { name: "Bellevue", state: "WA", zip_prefix: "980" },
    City { name: "Kent", state: "WA", zip_prefix: "980" },
    City { name: "Everett", state: "WA", zip_prefix: "982" },
    City { name: "Renton", state: "WA", zip_prefix: "980" },
    City { name: "Federal Way", state: "WA", zip_prefix: "980" },
    City { name: "Olympia", state: "WA", zip_prefix: "985" },
    City { name: "Bellingham", state: "WA", zip_prefix: "982" },
];

/// First word(s) of a home name
pub const HOME_NAME_PREFIXES: &[&str] = &[
    "Sunrise", "Golden", "Peaceful", "Caring", "Harmony", "Comfort", "Heritage", "Grace", "Haven",
    "Serenity", "Evergreen", "Mountain View", "Lakeside", "Cedar", "Oak",
];

/// Trailing words of a home name
pub const HOME_NAME_SUFFIXES: &[&str] =
    &["Adult Family Home", "Care Home", "Residential Care", "Home Care", "Family Home"];

/// Diagnoses common in elderly residents
pub const DIAGNOSES: &[&str] = &[
    "Alzheimer's disease",
    "Vascular dementia",
    "Parkinson's disease",
    "Type 2 Diabetes",
    "Hypertension",
    "Congestive Heart Failure",
    "COPD",
    "Osteoarthritis",
    "Chronic Kidney Disease",
    "Atrial Fibrillation",
    "Stroke history",
    "Depression",
    "Anxiety disorder",
    "Osteoporosis",
    "Hypothyroidism",
    "Anemia",
    "GERD",
    "Urinary Incontinence",
    "Hearing Loss",
    "Macular Degeneration",
];

/// Recorded allergies
pub const ALLERGIES: &[&str] = &[
    "Penicillin",
    "Sulfa drugs",
    "Aspirin",
    "NSAIDs",
    "Latex",
    "Shellfish",
    "Peanuts",
    "Tree nuts",
    "Eggs",
    "Milk",
    "Soy",
    "Wheat",
    "Codeine",
    "Morphine",
    "Contrast dye",
    "Bee stings",
];

/// One formulary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formulary {
    /// Drug name
    pub name: &'static str,
    /// Dose per administration
    pub dosage: &'static str,
    /// Route of administration
    pub route: &'static str,
}

const fn drug(name: &'static str, dosage: &'static str, route: &'static str) -> Formulary {
    Formulary { name, dosage, route }
}

/// Medications prescribed to residents
pub const MEDICATIONS: &[Formulary] = &[
    drug("Lisinopril", "10mg", "Oral"),
    drug("Lisinopril", "20mg", "Oral"),
    drug("Metformin", "500mg", "Oral"),
    drug("Metformin", "1000mg", "Oral"),
    drug("Amlodipine", "5mg", "Oral"),
    drug("Amlodipine", "10mg", "Oral"),
    drug("Metoprolol", "25mg", "Oral"),
    drug("Metoprolol", "50mg", "Oral"),
    drug("Omeprazole", "20mg", "Oral"),
    drug("Losartan", "50mg", "Oral"),
    drug("Atorvastatin", "20mg", "Oral"),
    drug("Atorvastatin", "40mg", "Oral"),
    drug("Levothyroxine", "50mcg", "Oral"),
    drug("Levothyroxine", "75mcg", "Oral"),
    drug("Gabapentin", "300mg", "Oral"),
    drug("Sertraline", "50mg", "Oral"),
    drug("Donepezil", "5mg", "Oral"),
    drug("Donepezil", "10mg", "Oral"),
    drug("Memantine", "10mg", "Oral"),
    drug("Carbidopa-Levodopa", "25-100mg", "Oral"),
    drug("Furosemide", "20mg", "Oral"),
    drug("Furosemide", "40mg", "Oral"),
    drug("Warfarin", "5mg", "Oral"),
    drug("Aspirin", "81mg", "Oral"),
    drug("Vitamin D3", "1000 IU", "Oral"),
    drug("Calcium Carbonate", "500mg", "Oral"),
    drug("Insulin Glargine", "10 units", "Injection"),
    drug("Insulin Glargine", "20 units", "Injection"),
    drug("Albuterol", "2 puffs", "Inhalation"),
    drug("Fluticasone", "2 puffs", "Inhalation"),
    drug("Nitroglycerin", "0.4mg", "Sublingual"),
    drug("Lorazepam", "0.5mg", "Oral"),
    drug("Acetaminophen", "500mg", "Oral"),
    drug("Bisacodyl", "10mg", "Oral"),
    drug("Docusate", "100mg", "Oral"),
    drug("Eye Drops (Artificial Tears)", "2 drops", "Ophthalmic"),
];

/// Clock times medications are scheduled at, as (hour, minute)
pub const MEDICATION_TIMES: &[(u32, u32)] = &[
    (6, 0),
    (7, 0),
    (8, 0),
    (9, 0),
    (12, 0),
    (13, 0),
    (14, 0),
    (17, 0),
    (18, 0),
    (19, 0),
    (21, 0),
    (22, 0),
];

/// Range-of-motion exercises
pub const ROM_EXERCISES: &[&str] = &[
    "Passive arm raises",
    "Ankle circles",
    "Knee flexion exercises",
    "Shoulder rotations",
    "Wrist flexion and extension",
    "Hip abduction exercises",
    "Elbow flexion exercises",
    "Neck stretches",
    "Finger flexion exercises",
    "Ankle pumps",
    "Leg raises (supine)",
    "Seated leg extensions",
    "Arm circles",
    "Hand grip exercises",
    "Toe curls",
];

/// Activity a home can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityTemplate {
    /// Display name
    pub name: &'static str,
    /// Category
    pub category: ActivityCategory,
    /// Whether several residents take part
    pub group: bool,
}

const fn activity(name: &'static str, category: ActivityCategory, group: bool) -> ActivityTemplate {
    ActivityTemplate { name, category, group }
}

/// Activities homes schedule
pub const ACTIVITIES: &[ActivityTemplate] = &[
    activity("Bingo Night", ActivityCategory::Recreational, true),
    activity("Movie Afternoon", ActivityCategory::Recreational, true),
    activity("Music Therapy Session", ActivityCategory::Recreational, true),
    activity("Arts and Crafts", ActivityCategory::Recreational, true),
    activity("Puzzle Time", ActivityCategory::Recreational, false),
    activity("Reading Time", ActivityCategory::Recreational, false),
    activity("Card Games", ActivityCategory::Social, true),
    activity("Family Visit", ActivityCategory::Social, false),
    activity("Birthday Celebration", ActivityCategory::Social, true),
    activity("Holiday Party", ActivityCategory::Social, true),
    activity("Group Exercise Class", ActivityCategory::Exercise, true),
    activity("Walking Program", ActivityCategory::Exercise, false),
    activity("Chair Yoga", ActivityCategory::Exercise, true),
    activity("Balance Exercises", ActivityCategory::Exercise, false),
    activity("Pet Therapy Visit", ActivityCategory::Other, true),
    activity("Garden Activity", ActivityCategory::Other, true),
    activity("Cooking Class", ActivityCategory::Other, true),
    activity("Religious Service", ActivityCategory::Other, true),
];

/// Places inside a home where incidents happen
pub const INCIDENT_LOCATIONS: &[&str] = &[
    "Bedroom",
    "Bathroom",
    "Living Room",
    "Dining Room",
    "Kitchen",
    "Hallway",
    "Front Entrance",
    "Back Yard",
    "Common Area",
    "Medication Room",
];

/// Stock incident photo file names
pub const INCIDENT_IMAGES: &[&str] = &[
    "image-001.png",
    "image-002.png",
    "image-003.png",
    "image-004.png",
    "image-005.png",
    "image-006.png",
    "image-007.png",
];

/// Photo captions; `None` leaves the caption empty
pub const PHOTO_CAPTIONS: &[Option<&str>] = &[
    Some("Photo of incident location"),
    Some("Documentation of affected area"),
    Some("Evidence of incident conditions"),
    None,
];

/// Behavior note template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorObservation {
    /// Note category
    pub category: BehaviorCategory,
    /// Note text
    pub text: &'static str,
}

const fn observation(category: BehaviorCategory, text: &'static str) -> BehaviorObservation {
    BehaviorObservation { category, text }
}

/// Behavior note templates
pub const BEHAVIOR_OBSERVATIONS: &[BehaviorObservation] = &[
    observation(BehaviorCategory::Behavior, "Resident was cooperative during morning care routine."),
    observation(BehaviorCategory::Behavior, "Resident showed signs of agitation, redirected successfully."),
    observation(BehaviorCategory::Behavior, "Resident engaged well with other residents during group activity."),
    observation(BehaviorCategory::Behavior, "Resident refused to participate in activity, respected preference."),
    observation(BehaviorCategory::Behavior, "Resident wandered during evening hours, gently redirected to room."),
    observation(BehaviorCategory::Mood, "Resident appeared cheerful and talkative today."),
    observation(BehaviorCategory::Mood, "Resident seemed withdrawn, encouraged social interaction."),
    observation(BehaviorCategory::Mood, "Resident expressed missing family, provided emotional support."),
    observation(BehaviorCategory::Mood, "Resident slept well and woke in good spirits."),
    observation(BehaviorCategory::Mood, "Resident anxious about upcoming doctor visit."),
    observation(BehaviorCategory::General, "Resident ate well at all meals today."),
    observation(BehaviorCategory::General, "Resident had good appetite at breakfast, less at dinner."),
    observation(BehaviorCategory::General, "Resident enjoyed watching favorite TV show."),
    observation(BehaviorCategory::General, "Resident participated in physical therapy exercises."),
    observation(BehaviorCategory::General, "Family called to check on resident, relayed message."),
];

/// Optional ADL notes
pub const ADL_NOTES: &[&str] = &[
    "Resident cooperative during care.",
    "Required extra assistance today.",
    "Good day overall.",
    "Resident fatigued this morning.",
    "Completed all tasks with minimal assistance.",
];

/// Optional ROM notes
pub const ROM_NOTES: &[&str] = &[
    "Good range of motion maintained.",
    "Slight stiffness noted, gentle stretching performed.",
    "Resident tolerated exercises well.",
    "Modified exercises due to fatigue.",
];

/// Primary care physician
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Physician {
    /// Name with title
    pub name: &'static str,
    /// Office phone
    pub phone: &'static str,
}

/// Physicians residents are registered with
pub const PHYSICIANS: &[Physician] = &[
    Physician { name: "Dr. Sarah Mitchell", phone: "(206) 555-0101" },
    Physician { name: "Dr. James Chen", phone: "(206) 555-0102" },
    Physician { name: "Dr. Maria Rodriguez", phone: "(253) 555-0103" },
    Physician { name: "Dr. Michael Thompson", phone: "(206) 555-0104" },
    Physician { name: "Dr. Emily Watson", phone: "(425) 555-0105" },
    Physician { name: "Dr. David Kim", phone: "(206) 555-0106" },
    Physician { name: "Dr. Jennifer Lee", phone: "(253) 555-0107" },
    Physician { name: "Dr. Robert Johnson", phone: "(206) 555-0108" },
    Physician { name: "Dr. Lisa Patel", phone: "(425) 555-0109" },
    Physician { name: "Dr. William Garcia", phone: "(360) 555-0110" },
];

/// Emergency contact relationships
pub const RELATIONSHIPS: &[&str] = &[
    "Son",
    "Daughter",
    "Spouse",
    "Brother",
    "Sister",
    "Nephew",
    "Niece",
    "Grandson",
    "Granddaughter",
    "Friend",
    "Power of Attorney",
    "Guardian",
];

/// Reasons for a discharge decided at admission
pub const SCHEDULED_DISCHARGE_REASONS: &[&str] = &[
    "Transferred to skilled nursing facility",
    "Returned home with family",
    "Hospitalized - higher level of care needed",
    "Transferred to memory care facility",
    "Deceased",
    "Family relocation",
    "Transferred to another AFH",
];

/// Reasons for a hazard discharge of a long stay
pub const ATTRITION_DISCHARGE_REASONS: &[&str] = &[
    "Transferred to skilled nursing facility",
    "Returned home with family",
    "Transferred to another AFH",
];

/// Kind of place an appointment happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    /// Hospital or general medical center
    Medical,
    /// Dental clinic
    Dental,
    /// Eye clinic
    Eye,
    /// Podiatry clinic
    Podiatry,
    /// Physical therapy clinic
    Therapy,
    /// Cardiology practice
    Cardiology,
    /// Audiology clinic
    Audiology,
    /// Imaging center
    Imaging,
    /// Laboratory
    Lab,
}

/// External appointment venue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentVenue {
    /// Venue name
    pub name: &'static str,
    /// Street address and city
    pub address: &'static str,
    /// Front desk phone
    pub phone: &'static str,
    /// Kind of venue
    pub kind: LocationKind,
}

const fn venue(
    name: &'static str,
    address: &'static str,
    phone: &'static str,
    kind: LocationKind,
) -> AppointmentVenue {
    AppointmentVenue { name, address, phone, kind }
}

/// Venues appointments are booked at
pub const APPOINTMENT_VENUES: &[AppointmentVenue] = &[
    venue("Overlake Medical Center", "1035 116th Ave NE, Bellevue", "(425) 555-0200", LocationKind::Medical),
    venue("Virginia Mason Medical Center", "1100 9th Ave, Seattle", "(206) 555-0201", LocationKind::Medical),
    venue("Providence Regional Medical Center", "1321 Colby Ave, Everett", "(425) 555-0202", LocationKind::Medical),
    venue("MultiCare Tacoma General", "315 Martin Luther King Jr Way, Tacoma", "(253) 555-0203", LocationKind::Medical),
    venue("Puget Sound Dental Clinic", "2500 3rd Ave, Seattle", "(206) 555-0210", LocationKind::Dental),
    venue("Northwest Eye Associates", "4700 Pt Fosdick Dr, Gig Harbor", "(253) 555-0211", LocationKind::Eye),
    venue("Seattle Podiatry Center", "1600 E Jefferson St, Seattle", "(206) 555-0212", LocationKind::Podiatry),
    venue("Evergreen Physical Therapy", "12040 NE 128th St, Kirkland", "(425) 555-0213", LocationKind::Therapy),
    venue("Sound Cardiology Associates", "1600 116th Ave NE, Bellevue", "(425) 555-0214", LocationKind::Cardiology),
    venue("Pacific Audiology Center", "1500 Metropolitan Park Dr, Tacoma", "(253) 555-0215", LocationKind::Audiology),
    venue("Cascade Imaging Center", "1145 Broadway, Tacoma", "(253) 555-0216", LocationKind::Imaging),
    venue("Quest Diagnostics", "3100 Northup Way, Bellevue", "(425) 555-0217", LocationKind::Lab),
    venue("LabCorp Patient Service Center", "600 University St, Seattle", "(206) 555-0218", LocationKind::Lab),
];

/// Transportation notes; `None` leaves the field empty
pub const TRANSPORTATION_OPTIONS: &[Option<&str>] = &[
    Some("Family member will provide transportation"),
    Some("Medical transport arranged via Hopelink"),
    Some("Wheelchair accessible van scheduled"),
    Some("Staff member to accompany resident"),
    Some("Telehealth - no transportation needed"),
    Some("Home visit - provider coming to facility"),
    None,
];

/// Consent forms signed after admission
pub const FOLLOW_UP_CONSENTS: &[&str] = &[
    "Flu Vaccination",
    "COVID-19 Vaccination",
    "Medication Change",
    "Physical Therapy",
    "Photography/Media Release",
];

/// Legal documents kept on file
pub const LEGAL_DOCUMENTS: &[&str] = &["Power of Attorney", "Advance Directive", "POLST"];

/// Fixed closure note on closed incidents
pub const INCIDENT_CLOSURE_NOTE: &str = "Investigation complete. Preventive measures implemented.";

/// Email domain for staff accounts
pub const STAFF_EMAIL_DOMAIN: &str = "lenkcare.example.com";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_name_space_is_large_enough() {
        assert!(HOME_NAME_PREFIXES.len() * HOME_NAME_SUFFIXES.len() >= 36);
    }

    #[test]
    fn test_attrition_reasons_are_scheduled_reasons() {
        for reason in ATTRITION_DISCHARGE_REASONS {
            assert!(SCHEDULED_DISCHARGE_REASONS.contains(reason));
        }
    }

    #[test]
    fn test_every_venue_kind_has_a_venue() {
        use LocationKind::*;
        for kind in [Medical, Dental, Eye, Podiatry, Therapy, Cardiology, Audiology, Imaging, Lab] {
            assert!(APPOINTMENT_VENUES.iter().any(|v| v.kind == kind), "{:?}", kind);
        }
    }

    #[test]
    fn test_medication_pool_covers_largest_prescription() {
        assert!(MEDICATIONS.len() >= 8);
        assert!(DIAGNOSES.len() >= 4);
        assert!(ALLERGIES.len() >= 3);
    }
}
