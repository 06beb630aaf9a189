use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::Res;

/// Helpers for building successful JSON responses from route handlers.
pub struct Success;

impl Success {
    pub fn ok<T: Serialize>(data: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Ok().json(data))
    }

    pub fn created<T: Serialize>(data: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Created().json(data))
    }

    pub fn message(msg: &str) -> Res<HttpResponse> {
        Ok(HttpResponse::Ok().json(serde_json::json!({ "message": msg })))
    }
}
