use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::key::KeyCreateRecord,
    models::key::{ApiKey, KeyQuota},
};

pub async fn get_key_by_secret<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    secret: &str,
) -> Res<Option<ApiKey>> {
    sqlx::query_as::<_, ApiKey>("SELECT * FROM api_keys WHERE secret = $1")
        .bind(secret)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_key_by_id_and_owner<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    key_id: &Uuid,
    owner_email: &str,
) -> Res<Option<ApiKey>> {
    sqlx::query_as::<_, ApiKey>("SELECT * FROM api_keys WHERE id = $1 AND owner_email = $2")
        .bind(key_id)
        .bind(owner_email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_keys_by_owner<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    owner_email: &str,
) -> Res<Vec<ApiKey>> {
    sqlx::query_as::<_, ApiKey>(
        "SELECT * FROM api_keys WHERE owner_email = $1 ORDER BY created_at DESC",
    )
    .bind(owner_email)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_key<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: KeyCreateRecord,
) -> Res<ApiKey> {
    sqlx::query_as::<_, ApiKey>(
        r#"
        INSERT INTO api_keys (owner_email, name, secret, masked_secret, usage, rate_limit)
        VALUES ($1, $2, $3, $4, 0, $5)
        RETURNING *
        "#,
    )
    .bind(data.owner_email)
    .bind(data.name)
    .bind(data.secret)
    .bind(data.masked_secret)
    .bind(data.rate_limit)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_key_name<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    key_id: &Uuid,
    owner_email: &str,
    name: &str,
) -> Res<Option<ApiKey>> {
    sqlx::query_as::<_, ApiKey>(
        "UPDATE api_keys SET name = $1 WHERE id = $2 AND owner_email = $3 RETURNING *",
    )
    .bind(name)
    .bind(key_id)
    .bind(owner_email)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_key<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    key_id: &Uuid,
    owner_email: &str,
) -> Res<u64> {
    sqlx::query("DELETE FROM api_keys WHERE id = $1 AND owner_email = $2")
        .bind(key_id)
        .bind(owner_email)
        .execute(executor)
        .await
        .map(|done| done.rows_affected())
        .map_err(AppError::from)
}

/// Atomically consumes one unit of quota for a key.
///
/// The `usage < rate_limit` guard makes the check-then-increment a single
/// statement, serialized by the row lock, so concurrent callers can never
/// push `usage` past `rate_limit`. Returns `None` when the guard does not
/// match: the key was deleted or its quota exhausted between the caller's
/// read and this update.
pub async fn consume_quota<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    key_id: &Uuid,
) -> Res<Option<KeyQuota>> {
    sqlx::query_as::<_, KeyQuota>(
        r#"
        UPDATE api_keys SET usage = usage + 1
        WHERE id = $1 AND usage < rate_limit
        RETURNING usage, rate_limit
        "#,
    )
    .bind(key_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
