//! VARK learning-style assessment: the question bank and answer scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::brain_type::BrainType;
use crate::error::CoreError;
use crate::roadmap::round_to_tenth;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Question bank
// ---------------------------------------------------------------------------

/// Question text followed by one option per brain type, in
/// [`BrainType::ALL`] order. Seeds an empty question store.
const DEFAULT_QUESTIONS: [(&str, [&str; 4]); 10] = [
    (
        "When learning something new, I prefer to:",
        [
            "Watch demonstrations or videos",
            "Listen to explanations or lectures",
            "Read detailed instructions or articles",
            "Try it out hands-on immediately",
        ],
    ),
    (
        "When studying for an exam, I find it most helpful to:",
        [
            "Create colorful diagrams and mind maps",
            "Record myself reading notes and listen back",
            "Write detailed summaries and flashcards",
            "Practice with real examples and exercises",
        ],
    ),
    (
        "I remember information best when it's presented as:",
        [
            "Charts, graphs, or infographics",
            "Spoken explanations or discussions",
            "Written text or bullet points",
            "Interactive activities or simulations",
        ],
    ),
    (
        "When giving directions, I typically:",
        [
            "Draw a map or show pictures",
            "Explain verbally with landmarks",
            "Write down step-by-step instructions",
            "Walk through the route together",
        ],
    ),
    (
        "My ideal learning environment includes:",
        [
            "Visual aids and bright, organized spaces",
            "Background music or discussion groups",
            "Quiet spaces with books and notes",
            "Flexible seating and hands-on materials",
        ],
    ),
    (
        "When solving a complex problem, I prefer to:",
        [
            "Visualize the solution with diagrams",
            "Talk through it with others",
            "Research and read about similar problems",
            "Experiment with different approaches",
        ],
    ),
    (
        "I learn programming concepts best through:",
        [
            "Code visualization tools and flowcharts",
            "Pair programming and code reviews",
            "Reading documentation and tutorials",
            "Building projects and debugging code",
        ],
    ),
    (
        "When attending a workshop, I prefer:",
        [
            "Slide presentations with visual examples",
            "Interactive discussions and Q&A sessions",
            "Detailed handouts and reference materials",
            "Hands-on labs and practical exercises",
        ],
    ),
    (
        "My note-taking style typically involves:",
        [
            "Colorful highlights, diagrams, and sketches",
            "Recording lectures or discussing with peers",
            "Detailed written notes and outlines",
            "Quick notes while doing practical work",
        ],
    ),
    (
        "When learning a new technology, I start by:",
        [
            "Watching tutorial videos or demos",
            "Listening to podcasts or tech talks",
            "Reading official documentation",
            "Installing it and experimenting immediately",
        ],
    ),
];

pub const QUIZ_INSTRUCTIONS: &str =
    "Choose the option that best describes your learning preferences.";

/// Longest accepted question or option text, in characters.
pub const MAX_QUESTION_TEXT_CHARS: usize = 500;

/// One answer choice of a stored question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub brain_type: BrainType,
}

/// Input for creating a question or replacing an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuizQuestion {
    pub text: String,
    pub options: Vec<QuestionOption>,
}

impl NewQuizQuestion {
    /// Trim all text and reject blank or oversized text and empty option
    /// lists.
    pub fn validated(self) -> Result<Self, CoreError> {
        let text = checked_text(&self.text, "Question text")?;
        if self.options.is_empty() {
            return Err(CoreError::Validation(
                "A question needs at least one option".into(),
            ));
        }
        let options = self
            .options
            .into_iter()
            .enumerate()
            .map(|(i, option)| {
                Ok(QuestionOption {
                    text: checked_text(&option.text, &format!("Option {}", i + 1))?,
                    brain_type: option.brain_type,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        Ok(Self { text, options })
    }
}

fn checked_text(raw: &str, what: &str) -> Result<String, CoreError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(CoreError::Validation(format!("{what} must not be blank")));
    }
    if text.chars().count() > MAX_QUESTION_TEXT_CHARS {
        return Err(CoreError::Validation(format!(
            "{what} is longer than {MAX_QUESTION_TEXT_CHARS} characters"
        )));
    }
    Ok(text.to_string())
}

/// A question as held by a [`QuizStore`](crate::store::QuizStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuizQuestion {
    pub id: DbId,
    pub text: String,
    pub options: Vec<QuestionOption>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The built-in ten-question VARK bank.
pub fn default_questions() -> Vec<NewQuizQuestion> {
    DEFAULT_QUESTIONS
        .iter()
        .map(|(text, options)| NewQuizQuestion {
            text: text.to_string(),
            options: options
                .iter()
                .zip(BrainType::ALL)
                .map(|(option, brain_type)| QuestionOption {
                    text: option.to_string(),
                    brain_type,
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizOption {
    /// 1-based.
    pub option_id: usize,
    pub text: String,
    pub brain_type: BrainType,
}

/// A stored question numbered for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    /// `q1`, `q2`, ... by position in the bank.
    pub question_id: String,
    pub question_number: usize,
    /// Store id, used by the edit and delete endpoints.
    pub id: DbId,
    pub text: String,
    pub options: Vec<QuizOption>,
}

/// Number the bank in store order. Deleting a question renumbers the ones
/// after it.
pub fn present_questions(bank: &[StoredQuizQuestion]) -> Vec<QuizQuestion> {
    bank.iter()
        .enumerate()
        .map(|(i, question)| QuizQuestion {
            question_id: format!("q{}", i + 1),
            question_number: i + 1,
            id: question.id,
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(j, option)| QuizOption {
                    option_id: j + 1,
                    text: option.text.clone(),
                    brain_type: option.brain_type,
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

fn first_option() -> i64 {
    1
}

/// One submitted answer. `selected_option` is 1-based and defaults to 1.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizAnswer {
    pub question_id: String,
    #[serde(default = "first_option")]
    pub selected_option: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub brain_type: BrainType,
    /// Share of valid answers pointing at `brain_type`, as a percentage.
    pub confidence_score: f64,
    pub brain_type_distribution: BTreeMap<BrainType, usize>,
    pub total_questions_answered: usize,
}

/// Tally answers per brain type and pick the dominant one.
///
/// `qN` refers to the Nth question of `bank` and the selected option's
/// brain type gets the vote. Unknown question ids and out-of-range options
/// are ignored. Ties go to the earlier brain type in [`BrainType::ALL`]
/// order.
pub fn score_answers(bank: &[StoredQuizQuestion], answers: &[QuizAnswer]) -> AssessmentResult {
    let mut counts: BTreeMap<BrainType, usize> = BrainType::ALL.iter().map(|bt| (*bt, 0)).collect();

    for answer in answers {
        let Some(index) = answer
            .question_id
            .strip_prefix('q')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
        else {
            continue;
        };
        let Some(question) = bank.get(index) else {
            continue;
        };
        let option = answer.selected_option - 1;
        if let Some(chosen) = usize::try_from(option).ok().and_then(|o| question.options.get(o)) {
            *counts.entry(chosen.brain_type).or_default() += 1;
        }
    }

    let total: usize = counts.values().sum();
    let mut dominant = BrainType::Visual;
    let mut best = 0;
    for bt in BrainType::ALL {
        let count = counts[&bt];
        if count > best {
            dominant = bt;
            best = count;
        }
    }
    let confidence_score = if total > 0 {
        round_to_tenth(best as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    AssessmentResult {
        brain_type: dominant,
        confidence_score,
        brain_type_distribution: counts,
        total_questions_answered: total,
    }
}
