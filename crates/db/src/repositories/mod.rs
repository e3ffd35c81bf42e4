//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod progress_repo;
pub mod quiz_question_repo;
pub mod resource_repo;
pub mod roadmap_repo;
pub mod user_repo;

pub use progress_repo::ProgressRepo;
pub use quiz_question_repo::QuizQuestionRepo;
pub use resource_repo::ResourceRepo;
pub use roadmap_repo::RoadmapRepo;
pub use user_repo::UserRepo;
