//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the database row, a
//! create DTO for inserts, and the conversion into the matching
//! `neuronav-core` domain record.

pub mod progress;
pub mod quiz_question;
pub mod resource;
pub mod roadmap;
pub mod user;
