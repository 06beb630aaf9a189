use serde::{Deserialize, Serialize};

use crate::service::{chain::Summary, github::License};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub github_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub valid: bool,
    pub summary: Summary,
    pub github_url: String,
    pub stars: i64,
    pub latest_version: Option<String>,
    pub website_url: Option<String>,
    pub license: License,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_field_name() {
        let req: SummarizeRequest =
            serde_json::from_str(r#"{"githubUrl": "https://github.com/rust-lang/rust"}"#).unwrap();
        assert_eq!(req.github_url, "https://github.com/rust-lang/rust");
    }

    #[test]
    fn response_serializes_with_camel_case_names() {
        let response = SummarizeResponse {
            valid: true,
            summary: Summary {
                summary: "s".to_string(),
                cool_facts: vec![],
            },
            github_url: "https://github.com/rust-lang/rust".to_string(),
            stars: 1,
            latest_version: Some("v1.0.0".to_string()),
            website_url: None,
            license: License {
                name: Some("MIT".to_string()),
                url: None,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("githubUrl").is_some());
        assert!(json.get("latestVersion").is_some());
        assert!(json.get("websiteUrl").is_some());
    }
}
