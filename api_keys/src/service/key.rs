use common::{
    error::{AppError, Res},
    key::{generate_secret, mask_secret},
};
use db::dtos::key::KeyCreateRecord;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::key::{ApiKeyListItem, CreateKeyRequest, CreateKeyResponse};

/// Retrieves every API key owned by the given account, newest first.
pub async fn get_keys(pool: &PgPool, owner_email: &str) -> Res<Vec<ApiKeyListItem>> {
    let api_keys = db::key::get_keys_by_owner(pool, owner_email).await?;

    Ok(api_keys.into_iter().map(ApiKeyListItem::from).collect())
}

/// Creates a new API key for an account.
///
/// Generates the secret and its masked form, starts the usage counter at
/// zero and persists the row. The response is the only place the raw
/// secret is ever returned.
pub async fn create_key(
    pool: &PgPool,
    owner_email: &str,
    default_rate_limit: i32,
    req: CreateKeyRequest,
) -> Res<CreateKeyResponse> {
    let name = validated_name(&req.name)?;

    let rate_limit = req.rate_limit.unwrap_or(default_rate_limit);
    if rate_limit <= 0 {
        return Err(AppError::BadRequest(
            "Rate limit must be a positive number".to_string(),
        ));
    }

    let secret = generate_secret();
    let masked_secret = mask_secret(&secret);

    let db_key = db::key::insert_key(
        pool,
        KeyCreateRecord {
            owner_email: owner_email.to_string(),
            name,
            secret,
            masked_secret,
            rate_limit,
        },
    )
    .await?;

    Ok(CreateKeyResponse::from(db_key))
}

/// Retrieves a single key, scoped by owner. A key id belonging to another
/// account is indistinguishable from a missing one.
pub async fn get_key(pool: &PgPool, owner_email: &str, key_id: Uuid) -> Res<ApiKeyListItem> {
    db::key::get_key_by_id_and_owner(pool, &key_id, owner_email)
        .await?
        .map(ApiKeyListItem::from)
        .ok_or_else(|| AppError::NotFound("API key not found".to_string()))
}

/// Renames a key, scoped by owner.
pub async fn rename_key(
    pool: &PgPool,
    owner_email: &str,
    key_id: Uuid,
    new_name: &str,
) -> Res<ApiKeyListItem> {
    let name = validated_name(new_name)?;

    db::key::update_key_name(pool, &key_id, owner_email, &name)
        .await?
        .map(ApiKeyListItem::from)
        .ok_or_else(|| AppError::NotFound("API key not found".to_string()))
}

/// Hard-deletes a key, scoped by owner. Deleting the same id twice yields
/// a NotFound the second time.
pub async fn delete_key(pool: &PgPool, owner_email: &str, key_id: Uuid) -> Res<()> {
    let deleted = db::key::delete_key(pool, &key_id, owner_email).await?;

    if deleted == 0 {
        return Err(AppError::NotFound("API key not found".to_string()));
    }
    Ok(())
}

fn validated_name(name: &str) -> Res<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validated_name("  prod  ").unwrap(), "prod");
    }

    #[test]
    fn empty_and_whitespace_names_are_rejected() {
        assert!(matches!(validated_name(""), Err(AppError::BadRequest(_))));
        assert!(matches!(
            validated_name("   \t"),
            Err(AppError::BadRequest(_))
        ));
    }
}
