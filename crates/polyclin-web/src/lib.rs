//! polyclin-web — the HTTP surface: menu, per-disease screening forms, and
//! the orchestration flow from form submission to prediction and advisory.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
