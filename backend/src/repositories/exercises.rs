//! Exercises repository operations

use super::uow::Repository;
use chrono::NaiveDate;

/// Exercises record, carrying the owning user resolved through its mood
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExercisesRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub minutes: i32,
    pub description: Option<String>,
    pub mood_id: i64,
    pub user_id: i64,
}

/// Input for creating an exercises entry
#[derive(Debug, Clone)]
pub struct NewExercises {
    pub date: NaiveDate,
    pub minutes: i32,
    pub description: Option<String>,
    pub mood_id: i64,
}

/// Partial update; only provided fields overwrite
#[derive(Debug, Clone, Default)]
pub struct ExercisesPatch {
    pub minutes: Option<i32>,
    pub description: Option<String>,
}

impl<'t> Repository<'t> {
    pub async fn add_exercises(
        &mut self,
        input: NewExercises,
    ) -> Result<ExercisesRecord, sqlx::Error> {
        sqlx::query_as::<_, ExercisesRecord>(
            r#"
            INSERT INTO user_exercises (date, minutes, description, mood_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, date, minutes, description, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = $4) AS user_id
            "#,
        )
        .bind(input.date)
        .bind(input.minutes)
        .bind(&input.description)
        .bind(input.mood_id)
        .fetch_one(self.conn())
        .await
    }

    pub async fn get_exercises_by_id(
        &mut self,
        id: i64,
    ) -> Result<Option<ExercisesRecord>, sqlx::Error> {
        sqlx::query_as::<_, ExercisesRecord>(
            r#"
            SELECT e.id, e.date, e.minutes, e.description, e.mood_id, m.user_id
            FROM user_exercises e
            JOIN user_mood m ON m.id = e.mood_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await
    }

    /// All exercises entries for a date, across users; callers filter by owner
    pub async fn get_exercises_by_date(
        &mut self,
        date: NaiveDate,
    ) -> Result<Vec<ExercisesRecord>, sqlx::Error> {
        sqlx::query_as::<_, ExercisesRecord>(
            r#"
            SELECT e.id, e.date, e.minutes, e.description, e.mood_id, m.user_id
            FROM user_exercises e
            JOIN user_mood m ON m.id = e.mood_id
            WHERE e.date = $1
            ORDER BY e.id ASC
            "#,
        )
        .bind(date)
        .fetch_all(self.conn())
        .await
    }

    pub async fn update_exercises(
        &mut self,
        id: i64,
        patch: ExercisesPatch,
    ) -> Result<ExercisesRecord, sqlx::Error> {
        sqlx::query_as::<_, ExercisesRecord>(
            r#"
            UPDATE user_exercises SET
                minutes = COALESCE($2, minutes),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, date, minutes, description, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = user_exercises.mood_id) AS user_id
            "#,
        )
        .bind(id)
        .bind(patch.minutes)
        .bind(&patch.description)
        .fetch_one(self.conn())
        .await
    }

    /// Apply one patch to every exercises entry of a mood
    pub async fn update_exercises_for_mood(
        &mut self,
        mood_id: i64,
        patch: &ExercisesPatch,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_exercises SET
                minutes = COALESCE($2, minutes),
                description = COALESCE($3, description)
            WHERE mood_id = $1
            "#,
        )
        .bind(mood_id)
        .bind(patch.minutes)
        .bind(&patch.description)
        .execute(self.conn())
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_exercises(&mut self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_exercises WHERE id = $1")
            .bind(id)
            .execute(self.conn())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
