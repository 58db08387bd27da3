/// Disease taxonomy and per-disease feature schemas.
///
/// Everything a workflow needs — its input schema, its classifier artifact
/// file, its result messages — hangs off the `Disease` variant, so adding a
/// fourth disease is a data change in this file, not new control flow.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Disease
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl Disease {
    pub const ALL: [Disease; 3] = [
        Disease::Diabetes,
        Disease::HeartDisease,
        Disease::Parkinsons,
    ];

    /// URL path segment for this workflow.
    pub fn slug(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart-disease",
            Disease::Parkinsons => "parkinsons",
        }
    }

    /// Human-facing workflow title.
    pub fn title(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes Prediction",
            Disease::HeartDisease => "Heart Disease Prediction",
            Disease::Parkinsons => "Parkinson's Prediction",
        }
    }

    /// Classifier artifact filename under the configured models directory.
    pub fn artifact_file(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes.safetensors",
            Disease::HeartDisease => "heart_disease.safetensors",
            Disease::Parkinsons => "parkinsons.safetensors",
        }
    }

    /// Ordered input schema the classifier was trained on.
    /// Field order is load-bearing: the models know positions, not names.
    pub fn schema(&self) -> &'static [FeatureField] {
        match self {
            Disease::Diabetes => &DIABETES_FIELDS,
            Disease::HeartDisease => &HEART_DISEASE_FIELDS,
            Disease::Parkinsons => &PARKINSONS_FIELDS,
        }
    }

    pub fn positive_message(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetic. Please consult a doctor.",
            Disease::HeartDisease => "Heart disease detected. Please consult a doctor.",
            Disease::Parkinsons => "Parkinson's disease detected. Please consult a doctor.",
        }
    }

    pub fn negative_message(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Not diabetic.",
            Disease::HeartDisease => "No heart disease.",
            Disease::Parkinsons => "No Parkinson's disease.",
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for Disease {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disease::ALL
            .into_iter()
            .find(|d| d.slug() == s)
            .ok_or_else(|| format!("unknown disease workflow: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Sex (diabetes form only — gates the pregnancies field)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

// ---------------------------------------------------------------------------
// Feature schemas
// ---------------------------------------------------------------------------

/// One named numeric input solicited from the user.
#[derive(Debug, Clone, Copy)]
pub struct FeatureField {
    /// Form field name, also the lookup key on submission.
    pub name: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    /// Optional entry hint for coded fields.
    pub hint: Option<&'static str>,
}

const fn field(name: &'static str, label: &'static str) -> FeatureField {
    FeatureField { name, label, hint: None }
}

const fn coded(
    name: &'static str,
    label: &'static str,
    hint: &'static str,
) -> FeatureField {
    FeatureField { name, label, hint: Some(hint) }
}

/// Pima Indians diabetes schema (8 features).
pub static DIABETES_FIELDS: [FeatureField; 8] = [
    field("pregnancies", "Number of Pregnancies"),
    field("glucose", "Glucose Level"),
    field("blood_pressure", "Blood Pressure"),
    field("skin_thickness", "Skin Thickness"),
    field("insulin", "Insulin Level"),
    field("bmi", "BMI"),
    field("diabetes_pedigree", "Diabetes Pedigree Function"),
    field("age", "Age"),
];

/// Cleveland heart disease schema (13 features).
pub static HEART_DISEASE_FIELDS: [FeatureField; 13] = [
    field("age", "Age"),
    coded("sex", "Sex", "1 = male; 0 = female"),
    field("chest_pain_type", "Chest Pain Type"),
    field("resting_blood_pressure", "Resting Blood Pressure"),
    field("cholesterol", "Cholesterol"),
    coded("fasting_blood_sugar", "Fasting Blood Sugar > 120 mg/dl", "1 = yes; 0 = no"),
    field("resting_ecg", "Resting Electrocardiographic Results"),
    field("max_heart_rate", "Max Heart Rate"),
    coded("exercise_angina", "Exercise Induced Angina", "1 = yes; 0 = no"),
    field("st_depression", "ST Depression Induced by Exercise"),
    field("st_slope", "Slope of Peak Exercise ST Segment"),
    field("major_vessels", "Major Vessels Colored by Fluoroscopy"),
    coded("thal", "Thal", "0 = normal; 1 = fixed defect; 2 = reversible defect"),
];

/// Oxford Parkinson's voice-measure schema (22 features).
pub static PARKINSONS_FIELDS: [FeatureField; 22] = [
    field("mdvp_fo", "MDVP:Fo(Hz)"),
    field("mdvp_fhi", "MDVP:Fhi(Hz)"),
    field("mdvp_flo", "MDVP:Flo(Hz)"),
    field("mdvp_jitter_pct", "MDVP:Jitter(%)"),
    field("mdvp_jitter_abs", "MDVP:Jitter(Abs)"),
    field("mdvp_rap", "MDVP:RAP"),
    field("mdvp_ppq", "MDVP:PPQ"),
    field("jitter_ddp", "Jitter:DDP"),
    field("mdvp_shimmer", "MDVP:Shimmer"),
    field("mdvp_shimmer_db", "MDVP:Shimmer(dB)"),
    field("shimmer_apq3", "Shimmer:APQ3"),
    field("shimmer_apq5", "Shimmer:APQ5"),
    field("mdvp_apq", "MDVP:APQ"),
    field("shimmer_dda", "Shimmer:DDA"),
    field("nhr", "NHR"),
    field("hnr", "HNR"),
    field("rpde", "RPDE"),
    field("dfa", "DFA"),
    field("spread1", "Spread1"),
    field("spread2", "Spread2"),
    field("d2", "D2"),
    field("ppe", "PPE"),
];
