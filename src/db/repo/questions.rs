use super::{DeleteOutcome, QuizScope, Repository};
use crate::domain::{CategoryId, NewQuestion, Question, QuestionId};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn question_from_row(row: &SqliteRow) -> Question {
    Question {
        id: QuestionId::new(row.get("id")),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get::<Option<i64>, _>("category").map(CategoryId::new),
        difficulty: row.get("difficulty"),
    }
}

impl Repository {
    /// Count all questions.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn count_questions(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Fetch one page of questions in ascending id order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn query_questions_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    /// Fetch every question in `category`, ascending by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn query_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = ?
            ORDER BY id ASC
            "#,
        )
        .bind(category.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    /// Case-insensitive substring search over question text.
    ///
    /// The term is matched literally; `%` and `_` carry no wildcard meaning.
    /// Case folding is Unicode-aware, so it runs here rather than in SQLite,
    /// whose `lower()` only folds ASCII.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn search_questions(&self, term: &str) -> Result<Vec<Question>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question IS NOT NULL
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let needle = term.to_lowercase();
        let matches = rows
            .iter()
            .map(question_from_row)
            .filter(|q| {
                q.question
                    .as_deref()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
            .collect();

        Ok(matches)
    }

    /// Fetch the questions a quiz may draw from, before excluding ones
    /// already asked.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn query_quiz_candidates(
        &self,
        scope: QuizScope,
    ) -> Result<Vec<Question>, sqlx::Error> {
        match scope {
            QuizScope::Category(category) => self.query_questions_by_category(category).await,
            QuizScope::All => {
                let rows = sqlx::query(
                    r#"
                    SELECT id, question, answer, category, difficulty
                    FROM questions
                    ORDER BY id ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?;

                Ok(rows.iter().map(question_from_row).collect())
            }
        }
    }

    /// Look up a single question.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    #[cfg(test)]
    pub async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(question_from_row))
    }

    /// Insert a question and return its assigned id.
    ///
    /// # Errors
    /// Returns an error if the insert fails, e.g. when `category` does not
    /// reference an existing row.
    pub async fn insert_question(&self, new: &NewQuestion) -> Result<QuestionId, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(new.question.as_deref())
        .bind(new.answer.as_deref())
        .bind(new.category.map(|c| c.as_i64()))
        .bind(new.difficulty)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(QuestionId::new(result.last_insert_rowid()))
    }

    /// Delete a question by id.
    ///
    /// A concurrent delete of the same id sees `NotFound`.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub async fn delete_question(&self, id: QuestionId) -> Result<DeleteOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(DeleteOutcome::NotFound);
        }

        tx.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
