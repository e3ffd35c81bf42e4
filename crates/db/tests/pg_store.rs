//! Postgres-backed store tests. Each test gets a fresh database with the
//! bootstrap migration applied.

use assert_matches::assert_matches;
use neuronav_core::assessment::{NewQuizQuestion, QuestionOption};
use neuronav_core::brain_type::BrainType;
use neuronav_core::error::CoreError;
use neuronav_core::roadmap::{NewRoadmap, Step};
use neuronav_core::store::{
    NewUser, ProgressStore, QuizStore, ResourceCatalog, RoadmapStore, UserStore,
};
use neuronav_db::seed::{seed_questions_if_empty, seed_resources_if_empty};
use neuronav_db::store::PgStore;
use sqlx::PgPool;

fn new_user(name: &str, email: Option<&str>) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.map(str::to_string),
    }
}

fn step(step_number: i32) -> Step {
    Step {
        step_number,
        title: format!("Step {step_number}"),
        description: String::new(),
        resource_id: None,
        resource_type: "video".to_string(),
        resource_url: None,
        estimated_time_minutes: 30,
        tags: vec![],
        brain_type_optimized: true,
        phase: None,
    }
}

fn new_roadmap(user_id: i64, topic: &str) -> NewRoadmap {
    NewRoadmap {
        user_id,
        topic: topic.to_string(),
        brain_type: BrainType::Visual,
        intensity: "intermediate".to_string(),
        steps: vec![step(1), step(2)],
        estimated_completion_weeks: 8,
        daily_time_minutes: 60,
        ai_generated: false,
        overview: None,
        strategies: vec![],
        references: vec![],
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seeding_is_idempotent_and_searchable(pool: PgPool) {
    assert_eq!(seed_resources_if_empty(&pool).await.unwrap(), 15);
    assert_eq!(seed_resources_if_empty(&pool).await.unwrap(), 0);

    let store = PgStore::new(pool);
    let python = store.find_resources("python").await.unwrap();
    assert_eq!(python.len(), 7);
    assert!(store.find_resources("100%").await.unwrap().is_empty());
    assert_eq!(store.find_general_resources(10).await.unwrap().len(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_a_conflict(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create(&new_user("Ada", Some("ada@example.com"))).await.unwrap();
    let err = store
        .create(&new_user("Ada again", Some("ada@example.com")))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Conflict(_));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_or_get_returns_existing_roadmap(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = store.create(&new_user("Grace", None)).await.unwrap();
    let user = store
        .set_brain_type(user.id, BrainType::Visual)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.brain_type, Some(BrainType::Visual));

    let (first, created) = store.insert_or_get(new_roadmap(user.id, "Rust")).await.unwrap();
    assert!(created);
    assert_eq!(first.steps.len(), 2);

    let (second, created) = store.insert_or_get(new_roadmap(user.id, "Rust")).await.unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);

    assert!(store.delete(first.id).await.unwrap());
    assert!(!store.delete(first.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_upsert_tracks_completion_time(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = store.create(&new_user("Linus", None)).await.unwrap();
    let (roadmap, _) = store.insert_or_get(new_roadmap(user.id, "C")).await.unwrap();

    let done = store.upsert(user.id, roadmap.id, 1, true).await.unwrap();
    assert!(done.completed_at.is_some());

    let undone = store.upsert(user.id, roadmap.id, 1, false).await.unwrap();
    assert_eq!(undone.id, done.id);
    assert!(undone.completed_at.is_none());

    store.upsert(user.id, roadmap.id, 2, true).await.unwrap();
    let records = store.find_all(user.id, roadmap.id).await.unwrap();
    let steps: Vec<i32> = records.iter().map(|r| r.step_number).collect();
    assert_eq!(steps, vec![1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn question_bank_is_seeded_once_and_editable(pool: PgPool) {
    assert_eq!(seed_questions_if_empty(&pool).await.unwrap(), 10);
    assert_eq!(seed_questions_if_empty(&pool).await.unwrap(), 0);

    let store = PgStore::new(pool);
    let bank = store.list_questions().await.unwrap();
    assert_eq!(bank.len(), 10);
    assert_eq!(bank[0].options[2].brain_type, BrainType::ReadWrite);

    let replacement = NewQuizQuestion {
        text: "How do you prefer to review?".to_string(),
        options: vec![QuestionOption {
            text: "Teach it to someone".to_string(),
            brain_type: BrainType::Auditory,
        }],
    };
    let updated = store
        .update_question(bank[0].id, &replacement)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.options, replacement.options);
    assert!(updated.updated_at >= bank[0].updated_at);

    let created = store.create_question(&replacement).await.unwrap();
    assert!(created.id > bank[9].id);
    assert!(store.delete_question(created.id).await.unwrap());
    assert!(!store.delete_question(created.id).await.unwrap());
    assert!(store.update_question(created.id, &replacement).await.unwrap().is_none());
    assert_eq!(store.list_questions().await.unwrap().len(), 10);
}
