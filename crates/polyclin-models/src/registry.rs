//! Startup-time model registry: one frozen classifier per disease workflow.

use std::collections::HashMap;
use std::path::Path;

use candle_core::Device;
use polyclin_common::{Disease, FeatureVector};
use tracing::info;

use crate::classifier::{LinearClassifier, Prediction};
use crate::error::{ModelError, Result};

/// Read-only map from disease workflow to its loaded classifier.
///
/// Loading happens once before the server binds; any missing or corrupt
/// artifact aborts startup. After that the registry is never mutated, so it
/// is shared freely across request handlers.
#[derive(Debug)]
pub struct ModelRegistry {
    models: HashMap<Disease, LinearClassifier>,
}

impl ModelRegistry {
    /// Load every workflow's artifact from the models directory.
    pub fn load(dir: &Path, device: &Device) -> Result<Self> {
        let mut models = HashMap::new();
        for disease in Disease::ALL {
            let path = dir.join(disease.artifact_file());
            let classifier = LinearClassifier::from_safetensors(disease, &path, device)?;
            info!(disease = %disease, path = %path.display(), "Loaded classifier artifact");
            models.insert(disease, classifier);
        }
        Ok(Self { models })
    }

    /// Assemble a registry from prebuilt handles.
    pub fn from_parts(models: HashMap<Disease, LinearClassifier>) -> Self {
        Self { models }
    }

    /// Look up the workflow's classifier and run one inference.
    pub fn predict(&self, disease: Disease, features: &FeatureVector) -> Result<Prediction> {
        let classifier = self
            .models
            .get(&disease)
            .ok_or(ModelError::NotRegistered(disease))?;
        classifier.predict(features)
    }
}
