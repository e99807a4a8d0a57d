//! Humor repository operations

use super::uow::Repository;
use chrono::NaiveDate;

/// Humor record, carrying the owning user resolved through its mood
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HumorRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub value: i32,
    pub description: Option<String>,
    pub health_based: bool,
    pub mood_id: i64,
    pub user_id: i64,
}

/// Input for creating a humor entry
#[derive(Debug, Clone)]
pub struct NewHumor {
    pub date: NaiveDate,
    pub value: i32,
    pub description: Option<String>,
    pub health_based: bool,
    pub mood_id: i64,
}

/// Partial update; only provided fields overwrite
#[derive(Debug, Clone, Default)]
pub struct HumorPatch {
    pub value: Option<i32>,
    pub description: Option<String>,
    pub health_based: Option<bool>,
}

impl<'t> Repository<'t> {
    pub async fn add_humor(&mut self, input: NewHumor) -> Result<HumorRecord, sqlx::Error> {
        sqlx::query_as::<_, HumorRecord>(
            r#"
            INSERT INTO user_humor (date, value, description, health_based, mood_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, date, value, description, health_based, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = $5) AS user_id
            "#,
        )
        .bind(input.date)
        .bind(input.value)
        .bind(&input.description)
        .bind(input.health_based)
        .bind(input.mood_id)
        .fetch_one(self.conn())
        .await
    }

    pub async fn get_humor_by_id(&mut self, id: i64) -> Result<Option<HumorRecord>, sqlx::Error> {
        sqlx::query_as::<_, HumorRecord>(
            r#"
            SELECT h.id, h.date, h.value, h.description, h.health_based, h.mood_id, m.user_id
            FROM user_humor h
            JOIN user_mood m ON m.id = h.mood_id
            WHERE h.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await
    }

    /// All humor entries for a date, across users; callers filter by owner
    pub async fn get_humor_by_date(
        &mut self,
        date: NaiveDate,
    ) -> Result<Vec<HumorRecord>, sqlx::Error> {
        sqlx::query_as::<_, HumorRecord>(
            r#"
            SELECT h.id, h.date, h.value, h.description, h.health_based, h.mood_id, m.user_id
            FROM user_humor h
            JOIN user_mood m ON m.id = h.mood_id
            WHERE h.date = $1
            ORDER BY h.id ASC
            "#,
        )
        .bind(date)
        .fetch_all(self.conn())
        .await
    }

    pub async fn update_humor(
        &mut self,
        id: i64,
        patch: HumorPatch,
    ) -> Result<HumorRecord, sqlx::Error> {
        sqlx::query_as::<_, HumorRecord>(
            r#"
            UPDATE user_humor SET
                value = COALESCE($2, value),
                description = COALESCE($3, description),
                health_based = COALESCE($4, health_based)
            WHERE id = $1
            RETURNING id, date, value, description, health_based, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = user_humor.mood_id) AS user_id
            "#,
        )
        .bind(id)
        .bind(patch.value)
        .bind(&patch.description)
        .bind(patch.health_based)
        .fetch_one(self.conn())
        .await
    }

    /// Apply one patch to every humor entry of a mood
    pub async fn update_humor_for_mood(
        &mut self,
        mood_id: i64,
        patch: &HumorPatch,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_humor SET
                value = COALESCE($2, value),
                description = COALESCE($3, description),
                health_based = COALESCE($4, health_based)
            WHERE mood_id = $1
            "#,
        )
        .bind(mood_id)
        .bind(patch.value)
        .bind(&patch.description)
        .bind(patch.health_based)
        .execute(self.conn())
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_humor(&mut self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_humor WHERE id = $1")
            .bind(id)
            .execute(self.conn())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
