use super::Repository;
use crate::domain::{Category, CategoryId};
use sqlx::Row;

impl Repository {
    /// List every category, ascending by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, type
            FROM categories
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let categories = rows
            .iter()
            .map(|row| Category {
                id: CategoryId::new(row.get("id")),
                kind: row
                    .get::<Option<String>, _>("type")
                    .unwrap_or_default(),
            })
            .collect();

        Ok(categories)
    }

    /// Insert a category and return its assigned id.
    ///
    /// Categories have no HTTP write surface; this serves seeding tools and
    /// tests.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_category(&self, kind: &str) -> Result<CategoryId, sqlx::Error> {
        let result = sqlx::query("INSERT INTO categories (type) VALUES (?)")
            .bind(kind)
            .execute(&self.pool)
            .await?;

        Ok(CategoryId::new(result.last_insert_rowid()))
    }
}
