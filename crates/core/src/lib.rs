//! NeuroNav domain core.
//!
//! Pure logic for learning-style matching: the preference model, the
//! resource ranker, the match-level classifier and the engagement
//! statistics. Persistence and AI collaborators are reached only through the
//! traits in [`store`], so every service in the workspace shares one
//! generation workflow.

pub mod analytics;
pub mod assessment;
pub mod brain_type;
pub mod classify;
pub mod config;
pub mod error;
pub mod generation;
pub mod preference;
pub mod ranking;
pub mod roadmap;
pub mod store;
pub mod types;
