use sqlx::{FromRow, SqlitePool};

/// User record in the database. Never serialized to clients.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    // Stored, not enforced anywhere.
    pub is_active: bool,
}

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with an already hashed password.
    ///
    /// Returns the raw sqlx error so callers can recognise unique violations.
    pub async fn create(
        db: &SqlitePool,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES (?, ?)
            RETURNING id, email, hashed_password, is_active
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_pool() -> SqlitePool {
        let pool = db::connect("sqlite::memory:").await.expect("pool");
        db::init_schema(&pool).await.expect("schema");
        pool
    }

    #[tokio::test]
    async fn create_then_lookup() {
        let pool = test_pool().await;
        let created = User::create(&pool, "a@a.com", "hash").await.expect("create");
        assert!(created.is_active);

        let by_email = User::find_by_email(&pool, "a@a.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        let by_id = User::find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@a.com");

        assert!(User::find_by_email(&pool, "b@b.com").await.unwrap().is_none());
        assert!(User::find_by_id(&pool, created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let pool = test_pool().await;
        User::create(&pool, "a@a.com", "hash").await.expect("create");
        let err = User::create(&pool, "a@a.com", "hash").await.unwrap_err();
        let is_unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
        assert!(is_unique, "unexpected error: {err}");
    }
}
