//! Food habits repository operations

use super::uow::Repository;
use chrono::NaiveDate;

/// Food habits record, carrying the owning user resolved through its mood
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub value: i32,
    pub description: String,
    pub mood_id: i64,
    pub user_id: i64,
}

/// Input for creating a food habits entry
#[derive(Debug, Clone)]
pub struct NewFood {
    pub date: NaiveDate,
    pub value: i32,
    pub description: String,
    pub mood_id: i64,
}

/// Partial update; only provided fields overwrite
#[derive(Debug, Clone, Default)]
pub struct FoodPatch {
    pub value: Option<i32>,
    pub description: Option<String>,
}

impl<'t> Repository<'t> {
    pub async fn add_food_habits(&mut self, input: NewFood) -> Result<FoodRecord, sqlx::Error> {
        sqlx::query_as::<_, FoodRecord>(
            r#"
            INSERT INTO user_food_habits (date, value, description, mood_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, date, value, description, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = $4) AS user_id
            "#,
        )
        .bind(input.date)
        .bind(input.value)
        .bind(&input.description)
        .bind(input.mood_id)
        .fetch_one(self.conn())
        .await
    }

    pub async fn get_food_habits_by_id(
        &mut self,
        id: i64,
    ) -> Result<Option<FoodRecord>, sqlx::Error> {
        sqlx::query_as::<_, FoodRecord>(
            r#"
            SELECT f.id, f.date, f.value, f.description, f.mood_id, m.user_id
            FROM user_food_habits f
            JOIN user_mood m ON m.id = f.mood_id
            WHERE f.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await
    }

    /// All food habits entries for a date, across users; callers filter by owner
    pub async fn get_food_habits_by_date(
        &mut self,
        date: NaiveDate,
    ) -> Result<Vec<FoodRecord>, sqlx::Error> {
        sqlx::query_as::<_, FoodRecord>(
            r#"
            SELECT f.id, f.date, f.value, f.description, f.mood_id, m.user_id
            FROM user_food_habits f
            JOIN user_mood m ON m.id = f.mood_id
            WHERE f.date = $1
            ORDER BY f.id ASC
            "#,
        )
        .bind(date)
        .fetch_all(self.conn())
        .await
    }

    pub async fn update_food_habits(
        &mut self,
        id: i64,
        patch: FoodPatch,
    ) -> Result<FoodRecord, sqlx::Error> {
        sqlx::query_as::<_, FoodRecord>(
            r#"
            UPDATE user_food_habits SET
                value = COALESCE($2, value),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, date, value, description, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = user_food_habits.mood_id) AS user_id
            "#,
        )
        .bind(id)
        .bind(patch.value)
        .bind(&patch.description)
        .fetch_one(self.conn())
        .await
    }

    /// Apply one patch to every food habits entry of a mood
    pub async fn update_food_habits_for_mood(
        &mut self,
        mood_id: i64,
        patch: &FoodPatch,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_food_habits SET
                value = COALESCE($2, value),
                description = COALESCE($3, description)
            WHERE mood_id = $1
            "#,
        )
        .bind(mood_id)
        .bind(patch.value)
        .bind(&patch.description)
        .execute(self.conn())
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_food_habits(&mut self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_food_habits WHERE id = $1")
            .bind(id)
            .execute(self.conn())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
