use chrono::NaiveDateTime;
use db::models::key::ApiKey;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyRequest {
    pub name: String,
    pub rate_limit: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct RenameKeyRequest {
    pub name: String,
}

/// Key row as shown in listings and detail views. The raw secret is shown
/// once at creation and never again; only the masked form is listed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyListItem {
    pub id: Uuid,
    pub name: String,
    pub masked_secret: String,
    pub usage: i32,
    pub rate_limit: i32,
    pub created_at: NaiveDateTime,
}

impl From<ApiKey> for ApiKeyListItem {
    fn from(key: ApiKey) -> Self {
        ApiKeyListItem {
            id: key.id,
            name: key.name,
            masked_secret: key.masked_secret,
            usage: key.usage,
            rate_limit: key.rate_limit,
            created_at: key.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyResponse {
    pub id: Uuid,
    pub name: String,
    pub secret: String,
    pub masked_secret: String,
    pub usage: i32,
    pub rate_limit: i32,
    pub created_at: NaiveDateTime,
}

impl From<ApiKey> for CreateKeyResponse {
    fn from(key: ApiKey) -> Self {
        CreateKeyResponse {
            id: key.id,
            name: key.name,
            secret: key.secret,
            masked_secret: key.masked_secret,
            usage: key.usage,
            rate_limit: key.rate_limit,
            created_at: key.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_camel_case_rate_limit() {
        let req: CreateKeyRequest =
            serde_json::from_str(r#"{"name": "prod", "rateLimit": 50}"#).unwrap();
        assert_eq!(req.name, "prod");
        assert_eq!(req.rate_limit, Some(50));
    }

    #[test]
    fn create_request_rate_limit_is_optional() {
        let req: CreateKeyRequest = serde_json::from_str(r#"{"name": "prod"}"#).unwrap();
        assert_eq!(req.rate_limit, None);
    }

    #[test]
    fn list_item_serializes_with_camel_case_names_and_no_secret() {
        let item = ApiKeyListItem {
            id: Uuid::new_v4(),
            name: "prod".to_string(),
            masked_secret: "dandi-*************************".to_string(),
            usage: 3,
            rate_limit: 100,
            created_at: NaiveDateTime::default(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("maskedSecret").is_some());
        assert!(json.get("rateLimit").is_some());
        assert!(json.get("secret").is_none());
    }
}
