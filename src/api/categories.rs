use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::questions::LISTING_CURRENT_CATEGORY;
use crate::api::AppState;
use crate::domain::{category_map, CategoryId, Question};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: BTreeMap<CategoryId, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuestionsResponse {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: &'static str,
}

pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = state.repo.list_categories().await?;

    Ok(Json(CategoriesResponse {
        categories: category_map(categories),
    }))
}

pub async fn get_questions_by_category(
    State(state): State<AppState>,
    category_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CategoryQuestionsResponse>, AppError> {
    let Path(category_id) =
        category_id.map_err(|e| AppError::NotFound(format!("category id: {}", e)))?;

    let questions = state
        .repo
        .query_questions_by_category(CategoryId::new(category_id))
        .await?;

    Ok(Json(CategoryQuestionsResponse {
        total_questions: questions.len() as i64,
        questions,
        current_category: LISTING_CURRENT_CATEGORY,
    }))
}
