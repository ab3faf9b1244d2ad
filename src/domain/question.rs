//! Quiz question and its API projection.

use crate::domain::{CategoryId, QuestionId};
use serde::Serialize;

/// A stored quiz question.
///
/// Text and rating columns are nullable: creation stores whatever the client
/// sent, including nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<CategoryId>,
    pub difficulty: Option<i64>,
}

/// Field values for a question that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<CategoryId>,
    pub difficulty: Option<i64>,
}
