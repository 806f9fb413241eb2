// src/models/question.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::pagination::PageMeta;

/// Difficulty level of a question. Parsing ignores letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty '{}'", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Upstream records carry free-form difficulty labels; anything
/// unrecognised decodes as "not set".
fn lenient_difficulty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Difficulty>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| match r.parse() {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::debug!("Ignoring question difficulty: {}", e);
            None
        }
    }))
}

/// One answer option of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Answer {
    pub id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Deserialize)]
struct UpstreamAnswer {
    id: Option<i64>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    is_correct: bool,
}

/// Options without an id cannot be selected, so they are dropped.
fn answers_with_ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Answer>, D::Error> {
    let raw = Option::<Vec<UpstreamAnswer>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|a| {
            a.id.map(|id| Answer {
                id,
                text: a.text,
                is_correct: a.is_correct,
            })
        })
        .collect())
}

/// A question of the bank, as returned by the upstream backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: i64,

    /// Question text. Upstream records occasionally carry none.
    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// Reading passage shared by a group of questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_difficulty",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,

    #[serde(default)]
    pub subject_id: Option<i64>,

    /// Ordered answer options.
    #[serde(default, deserialize_with = "answers_with_ids")]
    pub answers: Vec<Answer>,
}

impl Question {
    /// The answer flagged correct. The first one wins if several are flagged.
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }

    pub fn answer(&self, answer_id: i64) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }
}

/// Query parameters for listing questions.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestionListParams {
    /// Restrict the listing to one subject's pool.
    pub subject_id: Option<i64>,
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive keyword matched against the question text.
    pub q: Option<String>,
    /// 1-based page number (default: 1).
    pub page: Option<usize>,
    /// Items per page (default: 20, max: 100).
    pub page_size: Option<usize>,
}

/// One page of the question bank.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionPage {
    pub items: Vec<Question>,
    pub meta: PageMeta,
}

/// DTO for an answer option in a create/update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnswerInput {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// DTO for creating or replacing a question.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuestionInput {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
    #[validate(custom(function = validate_media_url))]
    pub image_url: Option<String>,
    #[validate(custom(function = validate_media_url))]
    pub audio_url: Option<String>,
    #[validate(length(max = 20000))]
    pub passage: Option<String>,
    pub difficulty: Difficulty,
    pub subject_id: i64,
    #[validate(length(min = 2, max = 10), nested, custom(function = validate_single_correct))]
    pub answers: Vec<AnswerInput>,
}

/// Media links must be absolute URLs of reasonable length.
fn validate_media_url(url: &str) -> Result<(), validator::ValidationError> {
    if url.len() > 500 {
        return Err(validator::ValidationError::new("url_too_long"));
    }
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

/// Single-select questions carry exactly one correct answer.
fn validate_single_correct(answers: &[AnswerInput]) -> Result<(), validator::ValidationError> {
    match answers.iter().filter(|a| a.is_correct).count() {
        1 => Ok(()),
        0 => Err(validator::ValidationError::new("no_correct_answer")),
        _ => Err(validator::ValidationError::new("multiple_correct_answers")),
    }
}
