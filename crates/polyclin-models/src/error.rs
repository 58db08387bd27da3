//! Error types for classifier loading and inference.

use std::path::PathBuf;

use polyclin_common::Disease;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model artifact not found: {0}")]
    ArtifactMissing(PathBuf),

    #[error("Failed to load model artifact {path}: {source}")]
    ArtifactLoad {
        path: PathBuf,
        source: candle_core::Error,
    },

    #[error("Feature vector length mismatch for {disease}: expected {expected}, got {got}")]
    VectorLength {
        disease: Disease,
        expected: usize,
        got: usize,
    },

    #[error("No classifier registered for {0}")]
    NotRegistered(Disease),

    #[error("Inference error: {0}")]
    Inference(#[from] candle_core::Error),
}
