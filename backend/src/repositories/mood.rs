//! Mood repository operations
//!
//! A mood is the per-user, per-date aggregate owning the tracked entries.
//! Fetches eagerly load every child collection (one query per category for
//! the whole mood set) so serialization never goes back to the database.

use super::uow::Repository;
use super::{ExercisesRecord, FoodRecord, HumorRecord, SleepRecord, WaterRecord};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Mood row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MoodRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub user_id: i64,
}

/// A mood with all of its child entries attached
#[derive(Debug, Clone)]
pub struct MoodWithEntries {
    pub mood: MoodRecord,
    pub humors: Vec<HumorRecord>,
    pub water_intakes: Vec<WaterRecord>,
    pub exercises: Vec<ExercisesRecord>,
    pub food_habits: Vec<FoodRecord>,
    pub sleeps: Vec<SleepRecord>,
}

impl<'t> Repository<'t> {
    pub async fn add_mood(
        &mut self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<MoodRecord, sqlx::Error> {
        sqlx::query_as::<_, MoodRecord>(
            r#"
            INSERT INTO user_mood (user_id, date)
            VALUES ($1, $2)
            RETURNING id, date, user_id
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(self.conn())
        .await
    }

    /// The caller's mood for a date, if one exists
    pub async fn get_mood_by_user_and_date(
        &mut self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<MoodRecord>, sqlx::Error> {
        sqlx::query_as::<_, MoodRecord>(
            "SELECT id, date, user_id FROM user_mood WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(self.conn())
        .await
    }

    pub async fn get_mood_by_id(
        &mut self,
        id: i64,
    ) -> Result<Option<MoodWithEntries>, sqlx::Error> {
        let mood = sqlx::query_as::<_, MoodRecord>(
            "SELECT id, date, user_id FROM user_mood WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await?;

        match mood {
            Some(mood) => Ok(self.load_entries(vec![mood]).await?.pop()),
            None => Ok(None),
        }
    }

    /// All moods for a date, across users, with entries; callers filter by owner
    pub async fn get_mood_by_date(
        &mut self,
        date: NaiveDate,
    ) -> Result<Vec<MoodWithEntries>, sqlx::Error> {
        let moods = sqlx::query_as::<_, MoodRecord>(
            "SELECT id, date, user_id FROM user_mood WHERE date = $1 ORDER BY id ASC",
        )
        .bind(date)
        .fetch_all(self.conn())
        .await?;

        self.load_entries(moods).await
    }

    pub async fn delete_mood(&mut self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_mood WHERE id = $1")
            .bind(id)
            .execute(self.conn())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Attach every child collection to the given moods, one query per category
    async fn load_entries(
        &mut self,
        moods: Vec<MoodRecord>,
    ) -> Result<Vec<MoodWithEntries>, sqlx::Error> {
        let mood_ids: Vec<i64> = moods.iter().map(|m| m.id).collect();

        let mut humors = group_by_mood(self.humors_for_moods(&mood_ids).await?, |r| r.mood_id);
        let mut waters = group_by_mood(self.water_for_moods(&mood_ids).await?, |r| r.mood_id);
        let mut exercises =
            group_by_mood(self.exercises_for_moods(&mood_ids).await?, |r| r.mood_id);
        let mut foods = group_by_mood(self.food_for_moods(&mood_ids).await?, |r| r.mood_id);
        let mut sleeps = group_by_mood(self.sleep_for_moods(&mood_ids).await?, |r| r.mood_id);

        Ok(moods
            .into_iter()
            .map(|mood| {
                let id = mood.id;
                MoodWithEntries {
                    mood,
                    humors: humors.remove(&id).unwrap_or_default(),
                    water_intakes: waters.remove(&id).unwrap_or_default(),
                    exercises: exercises.remove(&id).unwrap_or_default(),
                    food_habits: foods.remove(&id).unwrap_or_default(),
                    sleeps: sleeps.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn humors_for_moods(
        &mut self,
        mood_ids: &[i64],
    ) -> Result<Vec<HumorRecord>, sqlx::Error> {
        sqlx::query_as::<_, HumorRecord>(
            r#"
            SELECT h.id, h.date, h.value, h.description, h.health_based, h.mood_id, m.user_id
            FROM user_humor h
            JOIN user_mood m ON m.id = h.mood_id
            WHERE h.mood_id = ANY($1)
            ORDER BY h.id ASC
            "#,
        )
        .bind(mood_ids)
        .fetch_all(self.conn())
        .await
    }

    async fn water_for_moods(&mut self, mood_ids: &[i64]) -> Result<Vec<WaterRecord>, sqlx::Error> {
        sqlx::query_as::<_, WaterRecord>(
            r#"
            SELECT w.id, w.date, w.milliliters, w.description, w.pee, w.mood_id, m.user_id
            FROM user_water_intake w
            JOIN user_mood m ON m.id = w.mood_id
            WHERE w.mood_id = ANY($1)
            ORDER BY w.id ASC
            "#,
        )
        .bind(mood_ids)
        .fetch_all(self.conn())
        .await
    }

    async fn exercises_for_moods(
        &mut self,
        mood_ids: &[i64],
    ) -> Result<Vec<ExercisesRecord>, sqlx::Error> {
        sqlx::query_as::<_, ExercisesRecord>(
            r#"
            SELECT e.id, e.date, e.minutes, e.description, e.mood_id, m.user_id
            FROM user_exercises e
            JOIN user_mood m ON m.id = e.mood_id
            WHERE e.mood_id = ANY($1)
            ORDER BY e.id ASC
            "#,
        )
        .bind(mood_ids)
        .fetch_all(self.conn())
        .await
    }

    async fn food_for_moods(&mut self, mood_ids: &[i64]) -> Result<Vec<FoodRecord>, sqlx::Error> {
        sqlx::query_as::<_, FoodRecord>(
            r#"
            SELECT f.id, f.date, f.value, f.description, f.mood_id, m.user_id
            FROM user_food_habits f
            JOIN user_mood m ON m.id = f.mood_id
            WHERE f.mood_id = ANY($1)
            ORDER BY f.id ASC
            "#,
        )
        .bind(mood_ids)
        .fetch_all(self.conn())
        .await
    }

    async fn sleep_for_moods(&mut self, mood_ids: &[i64]) -> Result<Vec<SleepRecord>, sqlx::Error> {
        sqlx::query_as::<_, SleepRecord>(
            r#"
            SELECT s.id, s.date, s.value, s.minutes, s.description, s.mood_id, m.user_id
            FROM user_sleep s
            JOIN user_mood m ON m.id = s.mood_id
            WHERE s.mood_id = ANY($1)
            ORDER BY s.id ASC
            "#,
        )
        .bind(mood_ids)
        .fetch_all(self.conn())
        .await
    }
}

fn group_by_mood<T>(records: Vec<T>, mood_id: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for record in records {
        grouped.entry(mood_id(&record)).or_default().push(record);
    }
    grouped
}
