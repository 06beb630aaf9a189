use common::{
    env_config::Config,
    error::{AppError, Res},
};
use serde::{Deserialize, Serialize};

/// Cap on the README portion of the prompt, to stay inside the model's
/// context window for very large READMEs.
const MAX_README_CHARS: usize = 12_000;

const PROMPT: &str = "Summarize this github repository from this README file content. \
Provide a clear summary and extract interesting facts. \
Respond with a JSON object of the shape \
{\"summary\": string, \"cool_facts\": [string]} and nothing else.";

/// Structured output of the summarization chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
    pub cool_facts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Asks the configured LLM for a structured summary of a README.
pub async fn summarize_readme(config: &Config, readme_content: &str) -> Res<Summary> {
    let readme: String = readme_content.chars().take(MAX_README_CHARS).collect();

    let body = serde_json::json!({
        "model": config.openai_model,
        "temperature": 0,
        "response_format": { "type": "json_object" },
        "messages": [
            { "role": "system", "content": PROMPT },
            { "role": "user", "content": format!("README Content:\n{}", readme) }
        ]
    });

    let client = reqwest::Client::new();
    let response = client
        .post(&config.openai_api_url)
        .bearer_auth(&config.openai_api_key)
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        log::error!("LLM request failed with {}: {}", status, detail);
        return Err(AppError::Internal(
            "Failed to summarize repository".to_string(),
        ));
    }

    let completion: ChatCompletion = response.json().await?;
    let content = completion
        .choices
        .first()
        .map(|choice| choice.message.content.as_str())
        .ok_or_else(|| AppError::Internal("LLM returned no choices".to_string()))?;

    parse_model_output(content)
}

/// Parses the model's reply into a `Summary`, tolerating markdown code
/// fences some models wrap JSON output in.
fn parse_model_output(content: &str) -> Res<Summary> {
    let trimmed = content.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(stripped)
        .map_err(|e| AppError::Internal(format!("Malformed summary from LLM: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_output() {
        let summary = parse_model_output(
            r#"{"summary": "A web framework.", "cool_facts": ["fast", "typed"]}"#,
        )
        .unwrap();

        assert_eq!(summary.summary, "A web framework.");
        assert_eq!(summary.cool_facts, vec!["fast", "typed"]);
    }

    #[test]
    fn parses_fenced_json_output() {
        let fenced = "```json\n{\"summary\": \"s\", \"cool_facts\": []}\n```";
        let summary = parse_model_output(fenced).unwrap();
        assert_eq!(summary.summary, "s");
        assert!(summary.cool_facts.is_empty());
    }

    #[test]
    fn rejects_non_json_output() {
        assert!(parse_model_output("the repository is nice").is_err());
    }
}
