pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod quiz;

pub use config::Config;
pub use db::{init_db, seed_if_empty, DeleteOutcome, QuizScope, Repository};
pub use domain::{Category, CategoryId, NewQuestion, Question, QuestionId};
pub use error::AppError;
