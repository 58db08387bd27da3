//! polyclin-models — frozen classifier handles and the startup-time model
//! registry. Artifacts are safetensors logistic heads loaded with Candle.

pub mod classifier;
pub mod error;
pub mod registry;

pub use classifier::{LinearClassifier, Prediction};
pub use error::{ModelError, Result};
pub use registry::ModelRegistry;
