//! Screening workflow — form rendering and the submit orchestration.
//!
//! One handler pair serves all three workflows; everything disease-specific
//! comes from the `Disease` tables. Submission runs collect → assemble →
//! predict, then branches: a negative label renders its message and stops,
//! a positive label requests advisory text before rendering.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use polyclin_common::{
    features::{collect_fields, FeatureVector},
    Disease, ValidationError,
};
use polyclin_llm::{prompt, AdvisoryError};
use polyclin_models::ModelError;
use tracing::{error, info, warn};

use crate::handlers::page;
use crate::state::{AppState, SharedState};

/// Result of one form submission.
pub enum Outcome {
    /// A field failed numeric validation; no prediction was attempted.
    Invalid(ValidationError),
    /// The classifier itself failed; the session survives.
    InferenceFailed(ModelError),
    Negative,
    /// Positive label. The advisory call's failure is kept distinct here;
    /// rendering folds it into the recommendations panel.
    Positive {
        advisory: Result<String, AdvisoryError>,
    },
}

/// The application flow for one submission.
pub async fn run_screening(
    state: &AppState,
    disease: Disease,
    form: &HashMap<String, String>,
) -> Outcome {
    let fields = collect_fields(disease, form);

    let vector = match FeatureVector::assemble(disease, &fields) {
        Ok(v) => v,
        Err(err) => {
            warn!(disease = %disease, %err, "Rejected submission");
            return Outcome::Invalid(err);
        }
    };

    let prediction = match state.registry.predict(disease, &vector) {
        Ok(p) => p,
        Err(err) => {
            error!(disease = %disease, %err, "Inference failed");
            return Outcome::InferenceFailed(err);
        }
    };

    info!(disease = %disease, label = prediction.label(), "Prediction complete");

    if !prediction.is_positive() {
        return Outcome::Negative;
    }

    info!(disease = %disease, "Getting medical recommendations...");
    let advisory = state.advisory.advise(&prompt::build(disease, &vector)).await;
    if let Err(err) = &advisory {
        error!(disease = %disease, %err, "Advisory request failed");
    }

    Outcome::Positive { advisory }
}

pub async fn screening_form(Path(disease): Path<Disease>) -> Html<String> {
    Html(render_screening_page(disease, None))
}

pub async fn screening_submit(
    State(state): State<SharedState>,
    Path(disease): Path<Disease>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let outcome = run_screening(&state, disease, &form).await;
    Html(render_screening_page(disease, Some(&outcome)))
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn render_screening_page(disease: Disease, outcome: Option<&Outcome>) -> String {
    let result_html = outcome.map(|o| outcome_html(disease, o)).unwrap_or_default();

    let sex_select = if disease == Disease::Diabetes {
        r#"<div class="mb-3">
        <label class="form-label">Select Sex</label>
        <select name="sex" class="form-select">
            <option value="male">Male</option>
            <option value="female">Female</option>
        </select>
        <div class="form-text">Number of pregnancies is recorded as 0 for male subjects.</div>
    </div>"#
    } else {
        ""
    };

    let inputs: String = disease
        .schema()
        .iter()
        .map(|f| {
            let hint = f
                .hint
                .map(|h| format!(r#"<div class="form-text">{h}</div>"#))
                .unwrap_or_default();
            format!(
                r#"<div class="mb-3">
        <label class="form-label">{}</label>
        <input type="text" name="{}" class="form-control">
        {hint}
    </div>"#,
                f.label, f.name
            )
        })
        .collect();

    let body = format!(
        r#"<h2 class="mb-4">Enter {} Details</h2>
    <form method="POST" action="/screen/{}" class="col-md-6">
{sex_select}
{inputs}
        <button type="submit" class="btn btn-primary">Predict {}</button>
    </form>
    {result_html}
    <div class="mt-4">
        <a href="/" class="btn btn-outline-secondary">Back to Main Menu</a>
    </div>"#,
        disease.title(),
        disease.slug(),
        disease.title(),
    );

    page(disease.title(), &body)
}

fn outcome_html(disease: Disease, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Invalid(_) => {
            r#"<div class="alert alert-danger mt-4">Invalid input. Enter numeric values.</div>"#
                .to_string()
        }
        Outcome::InferenceFailed(err) => format!(
            r#"<div class="alert alert-danger mt-4">Prediction failed: {err}</div>"#
        ),
        Outcome::Negative => format!(
            r#"<div class="alert alert-success mt-4">{}</div>"#,
            disease.negative_message()
        ),
        Outcome::Positive { advisory } => {
            let text = match advisory {
                Ok(text) => text.clone(),
                Err(err) => format!("Error getting recommendations: {err}"),
            };
            format!(
                r#"<div class="alert alert-danger mt-4">{}</div>
    <h3>Medical Assistance Recommendations:</h3>
    <div class="card"><div class="card-body">{text}</div></div>"#,
                disease.positive_message()
            )
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use candle_core::{DType, Device, Tensor};
    use polyclin_llm::AdvisoryBackend;
    use polyclin_models::{LinearClassifier, ModelRegistry};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Advisory double: counts calls, records prompts, replies from a script.
    struct ScriptedAdvisory {
        reply: Option<String>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedAdvisory {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AdvisoryBackend for ScriptedAdvisory {
        async fn advise(&self, prompt: &str) -> Result<String, AdvisoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(AdvisoryError::ApiError {
                    status: 503,
                    message: "connection refused".to_string(),
                }),
            }
        }

        fn model_id(&self) -> &str {
            "scripted"
        }
    }

    /// Classifier that always emits the given label, via its bias term.
    fn constant_classifier(disease: Disease, positive: bool) -> LinearClassifier {
        let n = disease.schema().len();
        let weight = Tensor::zeros((1, n), DType::F32, &Device::Cpu).unwrap();
        let bias = if positive { 1.0f32 } else { -1.0f32 };
        let bias = Tensor::from_vec(vec![bias], 1, &Device::Cpu).unwrap();
        LinearClassifier::from_tensors(disease, weight, bias).unwrap()
    }

    fn state_with(
        disease: Disease,
        positive: bool,
        advisory: Arc<ScriptedAdvisory>,
    ) -> AppState {
        let mut models = HashMap::new();
        models.insert(disease, constant_classifier(disease, positive));
        AppState::new(ModelRegistry::from_parts(models), advisory)
    }

    fn diabetes_form() -> HashMap<String, String> {
        let entries = [
            ("sex", "female"),
            ("pregnancies", "2"),
            ("glucose", "200"),
            ("blood_pressure", "90"),
            ("skin_thickness", "20"),
            ("insulin", "80"),
            ("bmi", "35"),
            ("diabetes_pedigree", "0.5"),
            ("age", "50"),
        ];
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn heart_form() -> HashMap<String, String> {
        Disease::HeartDisease
            .schema()
            .iter()
            .map(|f| (f.name.to_string(), "1".to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_positive_prediction_requests_advisory_with_clinical_values() {
        let advisory = Arc::new(ScriptedAdvisory::replying("Stay hydrated and rest."));
        let state = state_with(Disease::Diabetes, true, advisory.clone());

        let outcome = run_screening(&state, Disease::Diabetes, &diabetes_form()).await;

        assert_eq!(advisory.calls.load(Ordering::SeqCst), 1);
        let prompts = advisory.prompts.lock().unwrap();
        for value in ["200", "90", "35", "50"] {
            assert!(prompts[0].contains(value), "prompt missing {value}");
        }

        match &outcome {
            Outcome::Positive { advisory } => {
                assert_eq!(advisory.as_deref().unwrap(), "Stay hydrated and rest.")
            }
            _ => panic!("expected positive outcome"),
        }

        let html = render_screening_page(Disease::Diabetes, Some(&outcome));
        assert!(html.contains("Diabetic. Please consult a doctor."));
        assert!(html.contains("Stay hydrated and rest."));
    }

    #[tokio::test]
    async fn test_negative_prediction_makes_no_advisory_call() {
        let advisory = Arc::new(ScriptedAdvisory::replying("unused"));
        let state = state_with(Disease::HeartDisease, false, advisory.clone());

        let outcome = run_screening(&state, Disease::HeartDisease, &heart_form()).await;

        assert!(matches!(outcome, Outcome::Negative));
        assert_eq!(advisory.calls.load(Ordering::SeqCst), 0);

        let html = render_screening_page(Disease::HeartDisease, Some(&outcome));
        assert!(html.contains("No heart disease."));
        assert!(!html.contains("Medical Assistance Recommendations"));
    }

    #[tokio::test]
    async fn test_invalid_field_skips_prediction_and_advisory() {
        let advisory = Arc::new(ScriptedAdvisory::replying("unused"));
        let state = state_with(Disease::Diabetes, true, advisory.clone());

        let mut form = diabetes_form();
        form.insert("glucose".to_string(), "abc".to_string());
        let outcome = run_screening(&state, Disease::Diabetes, &form).await;

        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert_eq!(advisory.calls.load(Ordering::SeqCst), 0);

        let html = render_screening_page(Disease::Diabetes, Some(&outcome));
        assert!(html.contains("Invalid input. Enter numeric values."));
        // The form stays available for another attempt.
        assert!(html.contains(r#"action="/screen/diabetes""#));
    }

    #[tokio::test]
    async fn test_advisory_failure_folds_into_recommendations_panel() {
        let advisory = Arc::new(ScriptedAdvisory::failing());
        let state = state_with(Disease::Diabetes, true, advisory.clone());

        let outcome = run_screening(&state, Disease::Diabetes, &diabetes_form()).await;

        match &outcome {
            Outcome::Positive { advisory } => assert!(advisory.is_err()),
            _ => panic!("expected positive outcome"),
        }

        let html = render_screening_page(Disease::Diabetes, Some(&outcome));
        assert!(html.contains("Error getting recommendations:"));
        assert!(html.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_male_submission_zeroes_pregnancies_in_prompt_vector() {
        let advisory = Arc::new(ScriptedAdvisory::replying("ok"));
        let state = state_with(Disease::Diabetes, true, advisory.clone());

        let mut form = diabetes_form();
        form.insert("sex".to_string(), "male".to_string());
        form.insert("pregnancies".to_string(), "7".to_string());
        let outcome = run_screening(&state, Disease::Diabetes, &form).await;

        assert!(matches!(outcome, Outcome::Positive { .. }));
        // The gate rewrites the field before assembly, so the submission is
        // valid regardless of what was typed in the pregnancies box.
        assert_eq!(advisory.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unregistered_workflow_surfaces_inference_error() {
        let advisory = Arc::new(ScriptedAdvisory::replying("unused"));
        // Registry only knows diabetes; submit to parkinsons.
        let state = state_with(Disease::Diabetes, true, advisory.clone());

        let form: HashMap<String, String> = Disease::Parkinsons
            .schema()
            .iter()
            .map(|f| (f.name.to_string(), "1.0".to_string()))
            .collect();
        let outcome = run_screening(&state, Disease::Parkinsons, &form).await;

        assert!(matches!(outcome, Outcome::InferenceFailed(_)));
        let html = render_screening_page(Disease::Parkinsons, Some(&outcome));
        assert!(html.contains("Prediction failed:"));
    }

    #[test]
    fn test_form_page_renders_schema_inputs() {
        let html = render_screening_page(Disease::Parkinsons, None);
        for field in Disease::Parkinsons.schema() {
            assert!(html.contains(field.label), "missing label {}", field.label);
        }
        assert!(html.contains("Back to Main Menu"));
        // Only the diabetes form carries the sex selector.
        assert!(!html.contains(r#"name="sex""#));
        assert!(render_screening_page(Disease::Diabetes, None).contains(r#"name="sex""#));
    }
}
