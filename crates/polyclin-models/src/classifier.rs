//! Frozen binary classifier over a Candle linear head.
//!
//! Each artifact is a safetensors file holding `weight` of shape
//! `[1, n_features]` and `bias` of shape `[1]`. The head is loaded once at
//! startup and is read-only afterwards, so sharing it across concurrent
//! requests is safe.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use polyclin_common::{Disease, FeatureVector};

use crate::error::{ModelError, Result};

/// Binary label returned by a classifier for one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Negative,
    Positive,
}

impl Prediction {
    pub fn is_positive(&self) -> bool {
        matches!(self, Prediction::Positive)
    }

    /// The raw label the classifiers were trained to emit.
    pub fn label(&self) -> u8 {
        match self {
            Prediction::Negative => 0,
            Prediction::Positive => 1,
        }
    }
}

/// A loaded, read-only classifier for one disease workflow.
#[derive(Debug)]
pub struct LinearClassifier {
    disease: Disease,
    linear: Linear,
    in_features: usize,
    device: Device,
}

impl LinearClassifier {
    /// Load a classifier head from a safetensors artifact.
    ///
    /// A missing file and a file without the expected tensors are distinct
    /// errors; both are fatal at startup.
    pub fn from_safetensors(disease: Disease, path: &Path, device: &Device) -> Result<Self> {
        if !path.exists() {
            return Err(ModelError::ArtifactMissing(path.to_path_buf()));
        }
        let in_features = disease.schema().len();

        let load = |source: candle_core::Error| ModelError::ArtifactLoad {
            path: path.to_path_buf(),
            source,
        };
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device) }
            .map_err(load)?;
        let weight = vb.get((1, in_features), "weight").map_err(load)?;
        let bias = vb.get(1, "bias").map_err(load)?;

        Ok(Self {
            disease,
            linear: Linear::new(weight, Some(bias)),
            in_features,
            device: device.clone(),
        })
    }

    /// Build a classifier from in-memory tensors.
    pub fn from_tensors(disease: Disease, weight: Tensor, bias: Tensor) -> Result<Self> {
        let (_, in_features) = weight.dims2()?;
        let device = weight.device().clone();
        Ok(Self {
            disease,
            linear: Linear::new(weight, Some(bias)),
            in_features,
            device,
        })
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    /// Run one inference on a single-row batch.
    ///
    /// A transposed or truncated vector would silently mispredict, so the
    /// length check is a hard typed error, not a best-effort pad.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        if features.len() != self.in_features {
            return Err(ModelError::VectorLength {
                disease: self.disease,
                expected: self.in_features,
                got: features.len(),
            });
        }

        let input = Tensor::from_slice(features.values(), (1, self.in_features), &self.device)?;
        let logits = self.linear.forward(&input)?;
        let logit = logits
            .flatten_all()?
            .to_vec1::<f32>()?
            .first()
            .copied()
            .unwrap_or(0.0);

        Ok(if logit > 0.0 {
            Prediction::Positive
        } else {
            Prediction::Negative
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier_with_bias(disease: Disease, bias: f32) -> LinearClassifier {
        let n = disease.schema().len();
        let weight = Tensor::zeros((1, n), DType::F32, &Device::Cpu).unwrap();
        let bias = Tensor::from_vec(vec![bias], 1, &Device::Cpu).unwrap();
        LinearClassifier::from_tensors(disease, weight, bias).unwrap()
    }

    fn vector_of(n: usize, fill: f32) -> FeatureVector {
        FeatureVector::from_values(vec![fill; n])
    }

    #[test]
    fn test_positive_bias_predicts_positive() {
        let clf = classifier_with_bias(Disease::Diabetes, 1.0);
        let label = clf.predict(&vector_of(8, 0.0)).unwrap();
        assert_eq!(label, Prediction::Positive);
        assert_eq!(label.label(), 1);
    }

    #[test]
    fn test_negative_bias_predicts_negative() {
        let clf = classifier_with_bias(Disease::HeartDisease, -1.0);
        let label = clf.predict(&vector_of(13, 0.0)).unwrap();
        assert_eq!(label, Prediction::Negative);
        assert_eq!(label.label(), 0);
    }

    #[test]
    fn test_weight_drives_decision() {
        // Single active weight on the first feature, threshold at 100.
        let mut w = vec![0.0f32; 8];
        w[0] = 1.0;
        let weight = Tensor::from_vec(w, (1, 8), &Device::Cpu).unwrap();
        let bias = Tensor::from_vec(vec![-100.0f32], 1, &Device::Cpu).unwrap();
        let clf = LinearClassifier::from_tensors(Disease::Diabetes, weight, bias).unwrap();

        let mut high = vec![0.0f32; 8];
        high[0] = 150.0;
        let mut low = vec![0.0f32; 8];
        low[0] = 50.0;

        assert!(clf
            .predict(&FeatureVector::from_values(high))
            .unwrap()
            .is_positive());
        assert!(!clf
            .predict(&FeatureVector::from_values(low))
            .unwrap()
            .is_positive());
    }

    #[test]
    fn test_length_mismatch_is_typed_error() {
        let clf = classifier_with_bias(Disease::Parkinsons, 1.0);
        let err = clf.predict(&vector_of(8, 1.0)).unwrap_err();
        match err {
            ModelError::VectorLength {
                disease,
                expected,
                got,
            } => {
                assert_eq!(disease, Disease::Parkinsons);
                assert_eq!(expected, 22);
                assert_eq!(got, 8);
            }
            other => panic!("expected VectorLength, got {other:?}"),
        }
    }
}
