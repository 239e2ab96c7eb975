// Static note templates and word pools for the synthetic corpus.
//
// Each template is a skeleton with {slot} placeholders; the generator fills
// every slot with a draw from the matching pool. Concept phrases carry
// per-variant weights so misspelled forms appear at a low, fixed rate;
// those near-misses are what the fuzzy sensitivity analysis is for.

/// A clinical concept and the weighted surface phrases that express it in
/// generated notes. Higher weight means the variant is drawn more often.
pub struct ConceptPhrase {
    pub group: &'static str,
    pub variants: &'static [(&'static str, u32)],
}

pub const CONCEPT_PHRASES: &[ConceptPhrase] = &[
    ConceptPhrase {
        group: "ARDS",
        variants: &[
            ("acute respiratory distress syndrome", 5),
            ("ARDS", 4),
            // Deliberate misspelling, kept rare
            ("acute respiratroy distress syndrome", 1),
        ],
    },
    ConceptPhrase {
        group: "Mechanical ventilation",
        variants: &[
            ("mechanical ventilation", 6),
            ("mechanically ventilated", 3),
            ("mechanical ventlation", 1),
        ],
    },
    ConceptPhrase {
        group: "Sepsis",
        variants: &[("sepsis", 6), ("septic shock", 3), ("sepssis", 1)],
    },
    ConceptPhrase {
        group: "Pneumonia",
        variants: &[
            ("pneumonia", 7),
            ("community acquired pneumonia", 2),
            ("pnuemonia", 1),
        ],
    },
    ConceptPhrase {
        group: "COPD",
        variants: &[
            ("chronic obstructive pulmonary disease", 3),
            ("COPD", 6),
        ],
    },
    ConceptPhrase {
        group: "Heart failure",
        variants: &[
            ("congestive heart failure", 4),
            ("heart failure", 4),
            ("CHF", 3),
        ],
    },
    ConceptPhrase {
        group: "Atrial fibrillation",
        variants: &[
            ("atrial fibrillation", 5),
            ("afib", 3),
            ("atrial fibrilation", 1),
        ],
    },
    ConceptPhrase {
        group: "Shortness of breath",
        variants: &[("shortness of breath", 6), ("dyspnea", 4)],
    },
];

/// Note skeletons. Slots: {name} {age} {unit} {concept} {symptom}
/// {duration} {day} {closing}. A skeleton may use {concept} more than once;
/// each occurrence is filled with an independent draw.
pub const NOTE_TEMPLATES: &[&str] = &[
    "{name}, a {age} year old patient, was admitted to the {unit} with {concept}. {closing}",
    "Patient {name} presented to the emergency department with {symptom} and was found to have {concept}. {closing}",
    "{name} ({age}) developed {concept} on hospital day {day} and was transferred to the {unit}. {closing}",
    "History: {name} is a {age} year old patient with known {concept}, presenting after {duration} of {symptom}. {closing}",
    "Consult note: asked to evaluate {name} for possible {concept}. The patient has had {symptom} for {duration}. {closing}",
    "{name} remains in the {unit} for management of {concept} complicated by {concept}. {closing}",
    "Discharge summary: {name}, {age}, admitted {duration} ago with {concept}. Hospital course notable for {concept}. {closing}",
    "Overnight event note: {name} had an episode of {symptom}. Given the history of {concept}, the {unit} team was notified. {closing}",
];

pub const FIRST_NAMES: &[&str] = &[
    "John", "Maria", "Wei", "Aisha", "Carlos", "Elena", "Samuel", "Priya",
    "Olga", "Kwame", "Hannah", "Tomas",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Garcia", "Chen", "Okafor", "Johnson", "Petrov", "Nakamura",
    "Ali", "Brown", "Silva", "Kowalski", "Dubois",
];

pub const UNITS: &[&str] = &[
    "medical ICU",
    "surgical ICU",
    "step-down unit",
    "general medicine ward",
    "coronary care unit",
];

pub const SYMPTOMS: &[&str] = &[
    "worsening shortness of breath",
    "fever and a productive cough",
    "chest tightness",
    "hypoxia on room air",
    "altered mental status",
    "a rapid irregular heartbeat",
    "bilateral lower extremity swelling",
];

pub const DURATIONS: &[&str] = &[
    "two days",
    "a week",
    "several hours",
    "three days",
    "the past month",
];

pub const CLOSINGS: &[&str] = &[
    "The patient was started on broad spectrum antibiotics.",
    "Mechanical ventilation was initiated overnight.",
    "The family was updated at the bedside.",
    "Diuresis was continued with good effect.",
    "The patient remained afebrile through the night.",
    "The plan was discussed with the attending on rounds.",
    "Supplemental oxygen was weaned as tolerated.",
    "Repeat imaging was ordered for the morning.",
];
