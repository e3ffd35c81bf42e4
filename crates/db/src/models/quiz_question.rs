//! Quiz question model. Options are stored as a JSONB array of
//! `{text, brain_type}` objects.

use neuronav_core::assessment::{QuestionOption, StoredQuizQuestion};
use neuronav_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `quiz_questions` table.
#[derive(Debug, Clone, FromRow)]
pub struct QuizQuestionRow {
    pub id: DbId,
    pub text: String,
    pub options: Json<Vec<QuestionOption>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<QuizQuestionRow> for StoredQuizQuestion {
    fn from(row: QuizQuestionRow) -> Self {
        StoredQuizQuestion {
            id: row.id,
            text: row.text,
            options: row.options.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use neuronav_core::brain_type::BrainType;

    use super::*;

    #[test]
    fn row_keeps_option_order() {
        let now = Utc::now();
        let row = QuizQuestionRow {
            id: 4,
            text: "How do you take notes?".into(),
            options: Json(vec![
                QuestionOption {
                    text: "Sketches".into(),
                    brain_type: BrainType::Visual,
                },
                QuestionOption {
                    text: "Outlines".into(),
                    brain_type: BrainType::ReadWrite,
                },
            ]),
            created_at: now,
            updated_at: now,
        };
        let question = StoredQuizQuestion::from(row);
        assert_eq!(question.id, 4);
        assert_eq!(question.options[1].brain_type, BrainType::ReadWrite);
    }
}
