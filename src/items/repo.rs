use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// All items of one owner in insertion order.
pub async fn list_by_owner(db: &SqlitePool, owner_id: i64) -> anyhow::Result<Vec<Item>> {
    let rows = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, title, description, owner_id
        FROM items
        WHERE owner_id = ?
        ORDER BY id
        "#,
    )
    .bind(owner_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(
    db: &SqlitePool,
    owner_id: i64,
    title: &str,
    description: Option<&str>,
) -> anyhow::Result<Item> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        INSERT INTO items (title, description, owner_id)
        VALUES (?, ?, ?)
        RETURNING id, title, description, owner_id
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(owner_id)
    .fetch_one(db)
    .await?;
    Ok(item)
}

/// Fetches an item only if `owner_id` owns it.
pub async fn find_owned(db: &SqlitePool, id: i64, owner_id: i64) -> anyhow::Result<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, title, description, owner_id
        FROM items
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

/// Applies a partial update to an owned item in one statement.
///
/// `title: None` keeps the title. `description: None` keeps the description,
/// `Some(None)` clears it. Returns `None` when the item is missing or owned by
/// someone else. The owner column is never touched.
pub async fn update_owned(
    db: &SqlitePool,
    id: i64,
    owner_id: i64,
    title: Option<&str>,
    description: Option<Option<&str>>,
) -> anyhow::Result<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        UPDATE items
        SET title = COALESCE(?, title),
            description = CASE WHEN ? THEN ? ELSE description END
        WHERE id = ? AND owner_id = ?
        RETURNING id, title, description, owner_id
        "#,
    )
    .bind(title)
    .bind(description.is_some())
    .bind(description.flatten())
    .bind(id)
    .bind(owner_id)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

/// Deletes an owned item. Returns false when nothing matched.
pub async fn delete_owned(db: &SqlitePool, id: i64, owner_id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM items WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
