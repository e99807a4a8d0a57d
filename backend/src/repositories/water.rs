//! Water intake repository operations

use super::uow::Repository;
use chrono::NaiveDate;

/// Water intake record, carrying the owning user resolved through its mood
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WaterRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub milliliters: i32,
    pub description: Option<String>,
    pub pee: bool,
    pub mood_id: i64,
    pub user_id: i64,
}

/// Input for creating a water intake entry
#[derive(Debug, Clone)]
pub struct NewWater {
    pub date: NaiveDate,
    pub milliliters: i32,
    pub description: Option<String>,
    pub pee: bool,
    pub mood_id: i64,
}

/// Partial update; only provided fields overwrite
#[derive(Debug, Clone, Default)]
pub struct WaterPatch {
    pub milliliters: Option<i32>,
    pub description: Option<String>,
    pub pee: Option<bool>,
}

impl<'t> Repository<'t> {
    pub async fn add_water_intake(&mut self, input: NewWater) -> Result<WaterRecord, sqlx::Error> {
        sqlx::query_as::<_, WaterRecord>(
            r#"
            INSERT INTO user_water_intake (date, milliliters, description, pee, mood_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, date, milliliters, description, pee, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = $5) AS user_id
            "#,
        )
        .bind(input.date)
        .bind(input.milliliters)
        .bind(&input.description)
        .bind(input.pee)
        .bind(input.mood_id)
        .fetch_one(self.conn())
        .await
    }

    pub async fn get_water_intake_by_id(
        &mut self,
        id: i64,
    ) -> Result<Option<WaterRecord>, sqlx::Error> {
        sqlx::query_as::<_, WaterRecord>(
            r#"
            SELECT w.id, w.date, w.milliliters, w.description, w.pee, w.mood_id, m.user_id
            FROM user_water_intake w
            JOIN user_mood m ON m.id = w.mood_id
            WHERE w.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await
    }

    /// All water intake entries for a date, across users; callers filter by owner
    pub async fn get_water_intake_by_date(
        &mut self,
        date: NaiveDate,
    ) -> Result<Vec<WaterRecord>, sqlx::Error> {
        sqlx::query_as::<_, WaterRecord>(
            r#"
            SELECT w.id, w.date, w.milliliters, w.description, w.pee, w.mood_id, m.user_id
            FROM user_water_intake w
            JOIN user_mood m ON m.id = w.mood_id
            WHERE w.date = $1
            ORDER BY w.id ASC
            "#,
        )
        .bind(date)
        .fetch_all(self.conn())
        .await
    }

    pub async fn update_water_intake(
        &mut self,
        id: i64,
        patch: WaterPatch,
    ) -> Result<WaterRecord, sqlx::Error> {
        sqlx::query_as::<_, WaterRecord>(
            r#"
            UPDATE user_water_intake SET
                milliliters = COALESCE($2, milliliters),
                description = COALESCE($3, description),
                pee = COALESCE($4, pee)
            WHERE id = $1
            RETURNING id, date, milliliters, description, pee, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = user_water_intake.mood_id) AS user_id
            "#,
        )
        .bind(id)
        .bind(patch.milliliters)
        .bind(&patch.description)
        .bind(patch.pee)
        .fetch_one(self.conn())
        .await
    }

    /// Apply one patch to every water intake entry of a mood
    pub async fn update_water_intake_for_mood(
        &mut self,
        mood_id: i64,
        patch: &WaterPatch,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_water_intake SET
                milliliters = COALESCE($2, milliliters),
                description = COALESCE($3, description),
                pee = COALESCE($4, pee)
            WHERE mood_id = $1
            "#,
        )
        .bind(mood_id)
        .bind(patch.milliliters)
        .bind(&patch.description)
        .bind(patch.pee)
        .execute(self.conn())
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_water_intake(&mut self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_water_intake WHERE id = $1")
            .bind(id)
            .execute(self.conn())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
