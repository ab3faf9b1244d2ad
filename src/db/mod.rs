//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization, migrations and optional seeding
//! - SQLite pragma configuration
//! - Repository layer for category and question queries

pub mod migrations;
pub mod repo;

pub use migrations::{init_db, seed_if_empty, SeedError};
pub use repo::{DeleteOutcome, QuizScope, Repository};
