//! Advisory prompt builder.
//!
//! Pure, deterministic string construction. Diabetes and heart disease
//! interpolate a clinically legible subset of the feature vector at fixed
//! positions; the Parkinson's voice measures have no such subset, so that
//! template asks for general guidance instead.

use polyclin_common::{Disease, FeatureVector};

/// Required closing sentence of every advisory prompt.
pub const DISCLAIMER: &str = "Important: Include a clear disclaimer that this \
is not medical advice and they should consult healthcare professionals.";

/// Build the advisory prompt for one positive prediction.
///
/// Interpolation indices are fixed against each schema: diabetes reads
/// glucose (1), blood pressure (2), BMI (5), age (7); heart disease reads
/// age (0), resting blood pressure (3), cholesterol (4), max heart rate (7).
pub fn build(disease: Disease, features: &FeatureVector) -> String {
    let v = features.values();
    match disease {
        Disease::Diabetes => format!(
            "As a medical assistant, provide helpful recommendations for someone \
who has been diagnosed with diabetes.\n\
Their details are:\n\
- Glucose Level: {}\n\
- Blood Pressure: {}\n\
- BMI: {}\n\
- Age: {}\n\
\n\
Please provide:\n\
1. Immediate steps they should take\n\
2. Lifestyle modifications\n\
3. Types of medical professionals they should consult\n\
4. Warning signs to watch for\n\
{DISCLAIMER}",
            v[1], v[2], v[5], v[7]
        ),

        Disease::HeartDisease => format!(
            "As a medical assistant, provide helpful recommendations for someone \
who has been diagnosed with heart disease.\n\
Their details are:\n\
- Age: {}\n\
- Blood Pressure: {}\n\
- Cholesterol: {}\n\
- Max Heart Rate: {}\n\
\n\
Please provide:\n\
1. Immediate steps they should take\n\
2. Lifestyle modifications\n\
3. Types of medical professionals they should consult\n\
4. Warning signs to watch for\n\
{DISCLAIMER}",
            v[0], v[3], v[4], v[7]
        ),

        Disease::Parkinsons => format!(
            "As a medical assistant, provide helpful recommendations for someone \
who has been diagnosed with Parkinson's disease.\n\
\n\
Please provide:\n\
1. Immediate steps they should take\n\
2. Lifestyle modifications\n\
3. Types of medical professionals they should consult\n\
4. Support resources and communities\n\
{DISCLAIMER}"
        ),
    }
}
