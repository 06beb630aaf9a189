use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, post, web};
use common::{env_config::Config, error::Res};
use limiter::gate::{self, GateError};
use sqlx::PgPool;

use crate::{
    dtos::summarize::{SummarizeRequest, SummarizeResponse},
    service::{chain, github},
};

const LIMIT_HEADER: &str = "X-RateLimit-Limit";
const REMAINING_HEADER: &str = "X-RateLimit-Remaining";

/// Metered endpoint: validates the presented key, consumes one unit of
/// quota, then fetches and summarizes the repository. The gate runs before
/// any expensive downstream work.
#[post("")]
pub async fn post_summarize(
    request: HttpRequest,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
    body: web::Json<SummarizeRequest>,
) -> Res<HttpResponse> {
    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    let admission = match gate::check_and_consume(&**pool, presented).await {
        Ok(admission) => admission,
        Err(rejection) => return Ok(rejection_response(rejection)),
    };

    // quota is consumed at this point; downstream failures do not refund it
    let github_url = body.into_inner().github_url;
    let data = github::fetch_repo_data(&config, &github_url).await?;
    let summary = chain::summarize_readme(&config, &data.readme_content).await?;

    Ok(HttpResponse::Ok()
        .insert_header((LIMIT_HEADER, admission.rate_limit.to_string()))
        .insert_header((REMAINING_HEADER, admission.remaining().to_string()))
        .json(SummarizeResponse {
            valid: true,
            summary,
            github_url,
            stars: data.stars,
            latest_version: data.latest_version,
            website_url: data.website_url,
            license: data.license,
        }))
}

fn rejection_response(rejection: GateError) -> HttpResponse {
    match rejection {
        GateError::MissingKey | GateError::InvalidKey => HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": rejection.to_string() })),

        GateError::RateLimitExceeded { usage, rate_limit } => {
            let remaining = (rate_limit - usage).max(0);
            HttpResponse::TooManyRequests()
                .insert_header((LIMIT_HEADER, rate_limit.to_string()))
                .insert_header((REMAINING_HEADER, remaining.to_string()))
                .json(serde_json::json!({
                    "error": rejection.to_string(),
                    "usage": usage,
                    "limit": rate_limit,
                }))
        }

        // detail stays in the gate's own logs; the caller sees a generic message
        GateError::StorageUnavailable => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": rejection.to_string() })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn missing_and_invalid_keys_reject_with_401() {
        assert_eq!(
            rejection_response(GateError::MissingKey).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            rejection_response(GateError::InvalidKey).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn exhausted_quota_rejects_with_429_and_rate_limit_headers() {
        let response = rejection_response(GateError::RateLimitExceeded {
            usage: 2,
            rate_limit: 2,
        });

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(LIMIT_HEADER).unwrap(), "2");
        assert_eq!(response.headers().get(REMAINING_HEADER).unwrap(), "0");
    }

    #[test]
    fn storage_failures_reject_with_500() {
        assert_eq!(
            rejection_response(GateError::StorageUnavailable).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
