//! polyclin-llm — advisory text generation for positive predictions.
//!
//! `prompt` builds the disease-specific request; `backend` sends it to the
//! external generative service and hands back text or a typed error. The
//! orchestrator decides how a failure is displayed.

pub mod backend;
pub mod prompt;

pub use backend::{AdvisoryBackend, AdvisoryError, GeminiBackend};
