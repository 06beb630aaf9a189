use std::sync::Arc;

use actix_web::{
    Responder, delete, get, patch, post,
    web::{self},
};
use common::{env_config::Config, error::Res, http::Success, jwt::SessionClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::key::{CreateKeyRequest, RenameKeyRequest},
    service,
};

/// Retrieves all API keys owned by the authenticated account, newest
/// first. Secrets are returned in masked form only.
#[get("")]
pub async fn get_keys(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let keys = service::key::get_keys(&pool, &claims.email).await?;
    Success::ok(keys)
}

/// Creates a new API key for the authenticated account. The response body
/// is the one and only place the raw secret appears.
#[post("")]
pub async fn post_create_key(
    config: web::Data<Arc<Config>>,
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateKeyRequest>,
) -> Res<impl Responder> {
    let key = service::key::create_key(
        &pool,
        &claims.email,
        config.default_rate_limit,
        req.into_inner(),
    )
    .await?;
    Success::created(key)
}

/// Retrieves a single API key owned by the authenticated account.
#[get("/{id}")]
pub async fn get_key(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let key = service::key::get_key(&pool, &claims.email, path.into_inner()).await?;
    Success::ok(key)
}

/// Renames an API key owned by the authenticated account.
#[patch("/{id}")]
pub async fn patch_rename_key(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<RenameKeyRequest>,
) -> Res<impl Responder> {
    let key = service::key::rename_key(&pool, &claims.email, path.into_inner(), &req.name).await?;
    Success::ok(key)
}

/// Deletes an API key owned by the authenticated account.
#[delete("/{id}")]
pub async fn delete_key(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    service::key::delete_key(&pool, &claims.email, path.into_inner()).await?;
    Success::message("API key deleted successfully")
}
