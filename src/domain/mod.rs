//! Domain types for the trivia API.
//!
//! This module provides:
//! - Typed row identifiers: QuestionId, CategoryId
//! - Category and the id-to-label mapping exposed by listings
//! - Question and NewQuestion

pub mod category;
pub mod primitives;
pub mod question;

pub use category::{category_map, Category};
pub use primitives::{CategoryId, QuestionId};
pub use question::{NewQuestion, Question};
