use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::AppState;
use crate::db::QuizScope;
use crate::domain::{CategoryId, Question, QuestionId};
use crate::error::AppError;
use crate::quiz::pick_next_question;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub quiz_category: Value,
    pub previous_questions: Option<Vec<QuestionId>>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    /// `None` once every eligible question has been asked.
    pub question: Option<Question>,
}

/// Interpret `quiz_category`.
///
/// 0, `"all"`, `null` or a missing value select every category. A category
/// picker object such as `{"type": "Science", "id": 1}` is read through its
/// `id`.
pub fn parse_quiz_scope(value: &Value) -> Result<QuizScope, AppError> {
    match value {
        Value::Null => Ok(QuizScope::All),
        Value::Number(n) => match n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        {
            Some(0) => Ok(QuizScope::All),
            Some(id) => Ok(QuizScope::Category(CategoryId::new(id))),
            None => Err(AppError::Unprocessable(format!(
                "quiz_category must be an integer, got {}",
                n
            ))),
        },
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("all") {
                return Ok(QuizScope::All);
            }
            let id = s.parse::<i64>().map_err(|_| {
                AppError::Unprocessable(format!("quiz_category {:?} is not a category id", s))
            })?;
            parse_quiz_scope(&Value::from(id))
        }
        Value::Object(map) => match map.get("id") {
            Some(id) if !id.is_object() => parse_quiz_scope(id),
            _ => Err(AppError::Unprocessable(
                "quiz_category object needs an id".to_string(),
            )),
        },
        Value::Bool(_) | Value::Array(_) => Err(AppError::Unprocessable(
            "quiz_category must be an id or \"all\"".to_string(),
        )),
    }
}

pub async fn play_quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::Unprocessable(e.body_text()))?;

    let scope = parse_quiz_scope(&body.quiz_category)?;
    let previous = body.previous_questions.unwrap_or_default();

    let candidates = state.repo.query_quiz_candidates(scope).await?;
    let question = pick_next_question(candidates, &previous, &mut rand::thread_rng());

    if question.is_none() {
        tracing::debug!(?scope, asked = previous.len(), "No quiz questions left");
    }

    Ok(Json(QuizResponse { question }))
}
