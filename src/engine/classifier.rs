use crate::models::worker::Specialization;

const PLUMBING_KEYWORDS: &[&str] = &[
    "leak",
    "pipe",
    "faucet",
    "drain",
    "toilet",
    "water heater",
    "clog",
    "sink",
    "plumb",
];

const ELECTRICAL_KEYWORDS: &[&str] = &[
    "outlet",
    "breaker",
    "wiring",
    "electric",
    "light fixture",
    "power",
    "socket",
    "short circuit",
    "sparking",
];

const HVAC_KEYWORDS: &[&str] = &[
    "hvac",
    "heating",
    "furnace",
    "air condition",
    "a/c",
    "thermostat",
    "ventilation",
    "cooling",
    "radiator",
];

const APPLIANCE_KEYWORDS: &[&str] = &[
    "refrigerator",
    "fridge",
    "dishwasher",
    "oven",
    "stove",
    "washer",
    "dryer",
    "microwave",
    "appliance",
    "garbage disposal",
];

const LOCKSMITH_KEYWORDS: &[&str] = &["lock", "key", "deadbolt", "latch", "locked out"];

const PAINTING_KEYWORDS: &[&str] = &["paint", "repaint", "peeling", "wall stain"];

const CARPENTRY_KEYWORDS: &[&str] = &[
    "cabinet",
    "door frame",
    "shelf",
    "shelving",
    "wood",
    "deck",
    "floorboard",
    "trim",
    "carpentry",
    "window",
];

/// Checked in order; the first set with a hit wins, so the more specific
/// trades sit ahead of the broad ones.
const KEYWORD_SETS: &[(Specialization, &[&str])] = &[
    (Specialization::Plumbing, PLUMBING_KEYWORDS),
    (Specialization::Electrical, ELECTRICAL_KEYWORDS),
    (Specialization::Hvac, HVAC_KEYWORDS),
    (Specialization::ApplianceRepair, APPLIANCE_KEYWORDS),
    (Specialization::Locksmith, LOCKSMITH_KEYWORDS),
    (Specialization::Painting, PAINTING_KEYWORDS),
    (Specialization::Carpentry, CARPENTRY_KEYWORDS),
];

pub fn classify(title: &str, description: &str) -> Specialization {
    let text = format!("{title} {description}").to_lowercase();

    for (specialization, keywords) in KEYWORD_SETS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return *specialization;
        }
    }

    Specialization::GeneralMaintenance
}
