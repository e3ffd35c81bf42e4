//! AI roadmap authoring via the OpenRouter chat-completions API.
//!
//! [`OpenRouterAuthor`] implements [`neuronav_core::generation::RoadmapAuthor`]
//! so the generation workflow can ask a language model for a draft before
//! falling back to rule-based ranking. Response interpretation is pure and
//! lives in [`parse`].

pub mod client;
pub mod config;
pub mod parse;
pub mod prompt;

pub use client::{AiError, OpenRouterAuthor};
pub use config::AiConfig;
