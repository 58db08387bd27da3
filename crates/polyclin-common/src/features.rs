//! Feature collection and vector assembly.
//!
//! Raw form input is textual. `collect_fields` pulls the submitted values
//! into schema order; `FeatureVector::assemble` turns them into numbers or
//! rejects the whole submission.

use std::collections::HashMap;

use crate::disease::{Disease, Sex};
use crate::error::ValidationError;

/// Ordered numeric features for one prediction attempt.
///
/// Invariant: `values.len()` equals the schema length of the disease it was
/// assembled for, and every element is finite. No partial vector exists —
/// assembly either yields a complete vector or a `ValidationError`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// Parse every raw field as a float, in schema order.
    ///
    /// Fails on the first empty, non-numeric, or non-finite field. The
    /// classifiers have no awareness of field names, so order here must
    /// match the schema exactly.
    pub fn assemble(disease: Disease, raw_fields: &[String]) -> Result<Self, ValidationError> {
        let schema = disease.schema();

        let mut values = Vec::with_capacity(schema.len());
        for (index, field) in schema.iter().enumerate() {
            // A short submission reads as empty trailing fields and is
            // rejected, never padded.
            let raw = raw_fields.get(index).map(String::as_str).unwrap_or("");
            let parsed = raw.trim().parse::<f32>().ok().filter(|v| v.is_finite());
            match parsed {
                Some(v) => values.push(v),
                None => {
                    return Err(ValidationError {
                        field: field.name,
                        index,
                        raw: raw.to_string(),
                    })
                }
            }
        }
        Ok(Self { values })
    }

    /// Build a vector from already-numeric values.
    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Gather raw field values from a submitted form map, in schema order.
///
/// Missing fields become empty strings and fail numeric parsing later, so a
/// truncated submission is rejected the same way as a non-numeric one.
///
/// Diabetes carries one domain policy: the pregnancies count is forced to
/// "0" whenever the form's sex control reads male, no matter what was
/// submitted in that field.
pub fn collect_fields(disease: Disease, form: &HashMap<String, String>) -> Vec<String> {
    let mut fields: Vec<String> = disease
        .schema()
        .iter()
        .map(|f| form.get(f.name).cloned().unwrap_or_default())
        .collect();

    if disease == Disease::Diabetes && submitted_sex(form) == Some(Sex::Male) {
        fields[0] = "0".to_string();
    }

    fields
}

fn submitted_sex(form: &HashMap<String, String>) -> Option<Sex> {
    match form.get("sex").map(String::as_str) {
        Some("male") => Some(Sex::Male),
        Some("female") => Some(Sex::Female),
        _ => None,
    }
}
