//! The joined inputs of an analysis pass and the ways to load them.

use std::collections::HashMap;

use anyhow::Context;
use neuronav_core::analytics::ProgressObservation;
use neuronav_core::brain_type::BrainType;
use neuronav_core::roadmap::Roadmap;
use neuronav_core::store::{ProgressStore, RoadmapStore, UserStore};
use neuronav_core::types::DbId;
use neuronav_db::store::PgStore;

/// Everything `build_events` needs, already loaded.
#[derive(Debug, Default)]
pub struct Dataset {
    /// Users that have completed the assessment.
    pub brain_types: HashMap<DbId, BrainType>,
    pub roadmaps: Vec<Roadmap>,
    pub progress: Vec<ProgressObservation>,
}

impl Dataset {
    /// Bulk-read users, roadmaps and progress from any store.
    pub async fn from_store<S>(store: &S) -> anyhow::Result<Self>
    where
        S: UserStore + RoadmapStore + ProgressStore,
    {
        let users = UserStore::list_all(store).await.context("loading users")?;
        let roadmaps = RoadmapStore::list_all(store)
            .await
            .context("loading roadmaps")?;
        let progress = ProgressStore::list_all(store)
            .await
            .context("loading progress")?;

        Ok(Self {
            brain_types: users
                .iter()
                .filter_map(|u| u.brain_type.map(|bt| (u.id, bt)))
                .collect(),
            roadmaps,
            progress: progress.iter().map(ProgressObservation::from).collect(),
        })
    }

    /// Connect to Postgres and read the full dataset.
    pub async fn from_database(database_url: &str) -> anyhow::Result<Self> {
        let pool = neuronav_db::create_pool(database_url)
            .await
            .context("connecting to database")?;
        Self::from_store(&PgStore::new(pool)).await
    }
}
