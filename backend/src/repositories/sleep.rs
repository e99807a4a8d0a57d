//! Sleep repository operations

use super::uow::Repository;
use chrono::NaiveDate;

/// Sleep record, carrying the owning user resolved through its mood
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SleepRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub value: i32,
    pub minutes: i32,
    pub description: Option<String>,
    pub mood_id: i64,
    pub user_id: i64,
}

/// Input for creating a sleep entry
#[derive(Debug, Clone)]
pub struct NewSleep {
    pub date: NaiveDate,
    pub value: i32,
    pub minutes: i32,
    pub description: Option<String>,
    pub mood_id: i64,
}

/// Partial update; only provided fields overwrite
#[derive(Debug, Clone, Default)]
pub struct SleepPatch {
    pub value: Option<i32>,
    pub minutes: Option<i32>,
    pub description: Option<String>,
}

impl<'t> Repository<'t> {
    pub async fn add_sleep(&mut self, input: NewSleep) -> Result<SleepRecord, sqlx::Error> {
        sqlx::query_as::<_, SleepRecord>(
            r#"
            INSERT INTO user_sleep (date, value, minutes, description, mood_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, date, value, minutes, description, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = $5) AS user_id
            "#,
        )
        .bind(input.date)
        .bind(input.value)
        .bind(input.minutes)
        .bind(&input.description)
        .bind(input.mood_id)
        .fetch_one(self.conn())
        .await
    }

    pub async fn get_sleep_by_id(&mut self, id: i64) -> Result<Option<SleepRecord>, sqlx::Error> {
        sqlx::query_as::<_, SleepRecord>(
            r#"
            SELECT s.id, s.date, s.value, s.minutes, s.description, s.mood_id, m.user_id
            FROM user_sleep s
            JOIN user_mood m ON m.id = s.mood_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await
    }

    /// All sleep entries for a date, across users; callers filter by owner
    pub async fn get_sleep_by_date(
        &mut self,
        date: NaiveDate,
    ) -> Result<Vec<SleepRecord>, sqlx::Error> {
        sqlx::query_as::<_, SleepRecord>(
            r#"
            SELECT s.id, s.date, s.value, s.minutes, s.description, s.mood_id, m.user_id
            FROM user_sleep s
            JOIN user_mood m ON m.id = s.mood_id
            WHERE s.date = $1
            ORDER BY s.id ASC
            "#,
        )
        .bind(date)
        .fetch_all(self.conn())
        .await
    }

    pub async fn update_sleep(
        &mut self,
        id: i64,
        patch: SleepPatch,
    ) -> Result<SleepRecord, sqlx::Error> {
        sqlx::query_as::<_, SleepRecord>(
            r#"
            UPDATE user_sleep SET
                value = COALESCE($2, value),
                minutes = COALESCE($3, minutes),
                description = COALESCE($4, description)
            WHERE id = $1
            RETURNING id, date, value, minutes, description, mood_id,
                      (SELECT user_id FROM user_mood WHERE id = user_sleep.mood_id) AS user_id
            "#,
        )
        .bind(id)
        .bind(patch.value)
        .bind(patch.minutes)
        .bind(&patch.description)
        .fetch_one(self.conn())
        .await
    }

    pub async fn delete_sleep(&mut self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sleep WHERE id = $1")
            .bind(id)
            .execute(self.conn())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
