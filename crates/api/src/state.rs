use std::sync::Arc;

use neuronav_core::config::NavigatorConfig;
use neuronav_core::generation::{RoadmapAuthor, RoadmapGenerator};
use neuronav_core::store::{ProgressStore, QuizStore, ResourceCatalog, RoadmapStore, UserStore};
use neuronav_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Preference, threshold and intensity tables.
    pub navigator: Arc<NavigatorConfig>,
    pub users: Arc<dyn UserStore>,
    pub roadmaps: Arc<dyn RoadmapStore>,
    pub progress: Arc<dyn ProgressStore>,
    /// Editable VARK question bank.
    pub quiz: Arc<dyn QuizStore>,
    /// Idempotent roadmap generation over the same stores.
    pub generator: RoadmapGenerator,
    /// Present when running against Postgres; used by the health check.
    pub pool: Option<DbPool>,
}

impl AppState {
    /// Wire every store seam to one backing store.
    pub fn new<S>(
        config: ServerConfig,
        navigator: NavigatorConfig,
        store: Arc<S>,
        author: Option<Arc<dyn RoadmapAuthor>>,
        pool: Option<DbPool>,
    ) -> Self
    where
        S: UserStore + RoadmapStore + ProgressStore + QuizStore + ResourceCatalog + 'static,
    {
        let navigator = Arc::new(navigator);
        let catalog: Arc<dyn ResourceCatalog> = store.clone();
        let roadmaps: Arc<dyn RoadmapStore> = store.clone();

        let mut generator =
            RoadmapGenerator::new(Arc::clone(&navigator), catalog, Arc::clone(&roadmaps));
        if let Some(author) = author {
            generator = generator.with_author(author);
        }

        Self {
            config: Arc::new(config),
            navigator,
            users: store.clone(),
            roadmaps,
            progress: store.clone(),
            quiz: store,
            generator,
            pool,
        }
    }
}
