//! User and credential repository operations

use super::uow::Repository;
use chrono::{DateTime, Utc};

/// Credential row for one user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserAuthRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub token: Option<String>,
    pub active: bool,
    pub user_id: i64,
}

impl<'t> Repository<'t> {
    /// Create a user together with its credential row
    ///
    /// Both inserts ride the same transaction; a unique-violation on the
    /// username surfaces as `sqlx::Error` for the caller to classify.
    pub async fn create_user_with_auth(
        &mut self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserAuthRecord, sqlx::Error> {
        let (user_id,): (i64,) =
            sqlx::query_as("INSERT INTO users DEFAULT VALUES RETURNING id")
                .fetch_one(self.conn())
                .await?;

        sqlx::query_as::<_, UserAuthRecord>(
            r#"
            INSERT INTO user_auth (username, password_hash, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, created_at, last_login, token, active, user_id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(user_id)
        .fetch_one(self.conn())
        .await
    }

    pub async fn get_user_auth_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserAuthRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserAuthRecord>(
            r#"
            SELECT id, username, password_hash, created_at, last_login, token, active, user_id
            FROM user_auth
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.conn())
        .await
    }

    /// Persist a freshly minted token and stamp the login time
    pub async fn record_login(&mut self, id: i64, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_auth SET token = $2, last_login = NOW() WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(self.conn())
            .await?;
        Ok(())
    }

    /// Persist a rotated token without touching the login timestamp
    pub async fn store_token(&mut self, username: &str, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_auth SET token = $2 WHERE username = $1")
            .bind(username)
            .bind(token)
            .execute(self.conn())
            .await?;
        Ok(())
    }
}
