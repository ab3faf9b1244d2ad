use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::api::deserializers::deserialize_lenient_i64;
use crate::api::AppState;
use crate::db::DeleteOutcome;
use crate::domain::{category_map, CategoryId, NewQuestion, Question, QuestionId};
use crate::error::AppError;

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// Placeholder `currentCategory` for the paginated and per-category listings.
/// It does not reflect any request parameter.
pub const LISTING_CURRENT_CATEGORY: &str = "History";
/// Placeholder `currentCategory` for search results.
pub const SEARCH_CURRENT_CATEGORY: &str = "Entertainment";

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPageResponse {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: BTreeMap<CategoryId, String>,
    pub current_category: &'static str,
}

/// Body of `POST /questions`: either a search or a new question.
#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub difficulty: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub question_id: QuestionId,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuestionsPostResponse {
    Search(SearchResponse),
    Created(CreateResponse),
}

/// Parse the `page` query value; absent or non-numeric means page 1.
fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(1)
}

/// Row offset of a 1-based page, or `None` when the page can hold no rows.
fn page_offset(page: i64) -> Option<i64> {
    if page < 1 {
        return None;
    }
    (page - 1).checked_mul(QUESTIONS_PER_PAGE)
}

pub async fn get_questions(
    params: Option<Query<PageQuery>>,
    State(state): State<AppState>,
) -> Result<Json<QuestionPageResponse>, AppError> {
    // A malformed query string falls back to page 1 like a bad `page` value.
    let page = parse_page(params.as_ref().and_then(|Query(p)| p.page.as_deref()));

    let questions = match page_offset(page) {
        Some(offset) => {
            state
                .repo
                .query_questions_page(offset, QUESTIONS_PER_PAGE)
                .await?
        }
        None => Vec::new(),
    };
    let total_questions = state.repo.count_questions().await?;
    let categories = state.repo.list_categories().await?;

    Ok(Json(QuestionPageResponse {
        questions,
        total_questions,
        categories: category_map(categories),
        current_category: LISTING_CURRENT_CATEGORY,
    }))
}

pub async fn post_questions(
    State(state): State<AppState>,
    payload: Result<Json<QuestionsRequest>, JsonRejection>,
) -> Result<Json<QuestionsPostResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::Unprocessable(e.body_text()))?;

    if let Some(term) = body.search_term.as_deref().filter(|t| !t.is_empty()) {
        let questions = state.repo.search_questions(term).await?;
        return Ok(Json(QuestionsPostResponse::Search(SearchResponse {
            total_questions: questions.len() as i64,
            questions,
            current_category: SEARCH_CURRENT_CATEGORY,
        })));
    }

    let new = NewQuestion {
        question: body.question,
        answer: body.answer,
        category: body.category.map(CategoryId::new),
        difficulty: body.difficulty,
    };

    let id = state
        .repo
        .insert_question(&new)
        .await
        .map_err(|e| AppError::Internal(format!("insert question failed: {}", e)))?;
    info!(question_id = %id, "Question created");

    Ok(Json(QuestionsPostResponse::Created(CreateResponse {
        success: true,
    })))
}

pub async fn delete_question(
    State(state): State<AppState>,
    question_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Path(question_id) =
        question_id.map_err(|e| AppError::NotFound(format!("question id: {}", e)))?;
    let id = QuestionId::new(question_id);

    match state.repo.delete_question(id).await {
        Ok(DeleteOutcome::Deleted) => {
            info!(question_id = %id, "Question deleted");
            Ok(Json(DeleteResponse {
                success: true,
                question_id: id,
            }))
        }
        Ok(DeleteOutcome::NotFound) => Err(AppError::NotFound(format!("question {}", id))),
        // Store failures during delete share the not-found response.
        Err(e) => {
            warn!(question_id = %id, error = %e, "Question delete failed");
            Err(AppError::NotFound(format!("question {}", id)))
        }
    }
}
