use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ApiKey {
    pub id: Uuid,
    pub owner_email: String,
    pub name: String,
    pub secret: String,
    pub masked_secret: String,
    pub usage: i32,
    pub rate_limit: i32,
    pub created_at: NaiveDateTime,
}

/// Counter state of a key after a successful conditional increment.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct KeyQuota {
    pub usage: i32,
    pub rate_limit: i32,
}
