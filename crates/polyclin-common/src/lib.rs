//! polyclin-common — Shared disease taxonomy, feature schemas, and
//! validation used across all Polyclin crates.

pub mod disease;
pub mod error;
pub mod features;

// Re-export commonly used types
pub use disease::{Disease, FeatureField, Sex};
pub use error::ValidationError;
pub use features::FeatureVector;
