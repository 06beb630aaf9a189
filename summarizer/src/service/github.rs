use common::{
    env_config::Config,
    error::{AppError, Res},
};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = "dandi-api";

/// Repository data gathered ahead of summarization: the README body plus
/// the metadata echoed back to the caller.
#[derive(Debug)]
pub struct GitHubData {
    pub readme_content: String,
    pub stars: i64,
    pub latest_version: Option<String>,
    pub website_url: Option<String>,
    pub license: License,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepoMetadata {
    stargazers_count: i64,
    homepage: Option<String>,
    license: Option<License>,
}

#[derive(Debug, Deserialize)]
struct ReleaseMetadata {
    tag_name: String,
}

/// Splits a GitHub repository URL into its owner and repo segments.
/// Rejects anything that is not a github.com repository URL.
pub fn parse_repo_path(github_url: &str) -> Res<(String, String)> {
    let url = url::Url::parse(github_url)
        .map_err(|_| AppError::BadRequest("Invalid GitHub URL".to_string()))?;

    match url.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => return Err(AppError::BadRequest("Invalid GitHub URL".to_string())),
    }

    let mut segments = url
        .path_segments()
        .ok_or_else(|| AppError::BadRequest("Invalid GitHub URL".to_string()))?
        .filter(|s| !s.is_empty());

    let owner = segments
        .next()
        .ok_or_else(|| AppError::BadRequest("Invalid GitHub URL".to_string()))?
        .to_string();
    let repo = segments
        .next()
        .ok_or_else(|| AppError::BadRequest("Invalid GitHub URL".to_string()))?
        .trim_end_matches(".git")
        .to_string();

    if owner.is_empty() || repo.is_empty() {
        return Err(AppError::BadRequest("Invalid GitHub URL".to_string()));
    }

    Ok((owner, repo))
}

/// Fetches repository metadata, the latest release tag and the README
/// content for a GitHub repository URL.
pub async fn fetch_repo_data(config: &Config, github_url: &str) -> Res<GitHubData> {
    let (owner, repo) = parse_repo_path(github_url)?;
    let client = reqwest::Client::new();

    let repo_response = github_get(
        &client,
        config,
        &format!("{}/repos/{}/{}", config.github_api_url, owner, repo),
    )
    .await?;
    if !repo_response.status().is_success() {
        return Err(AppError::BadRequest(
            "Failed to fetch repository metadata".to_string(),
        ));
    }
    let metadata: RepoMetadata = repo_response.json().await?;

    // the latest release is optional; many repositories tag nothing
    let release_response = github_get(
        &client,
        config,
        &format!(
            "{}/repos/{}/{}/releases/latest",
            config.github_api_url, owner, repo
        ),
    )
    .await?;
    let latest_version = if release_response.status().is_success() {
        release_response
            .json::<ReleaseMetadata>()
            .await
            .ok()
            .map(|release| release.tag_name)
    } else {
        None
    };

    let readme_content = fetch_readme(&client, &owner, &repo).await?;

    Ok(GitHubData {
        readme_content,
        stars: metadata.stargazers_count,
        latest_version,
        website_url: metadata.homepage.filter(|h| !h.is_empty()),
        license: metadata.license.unwrap_or(License {
            name: None,
            url: None,
        }),
    })
}

async fn github_get(
    client: &reqwest::Client,
    config: &Config,
    url: &str,
) -> Res<reqwest::Response> {
    let mut request = client
        .get(url)
        .header(ACCEPT, GITHUB_ACCEPT)
        .header(USER_AGENT, CLIENT_USER_AGENT);

    if let Some(token) = &config.github_token {
        request = request.header(AUTHORIZATION, format!("token {}", token));
    }

    request.send().await.map_err(AppError::from)
}

async fn fetch_readme(client: &reqwest::Client, owner: &str, repo: &str) -> Res<String> {
    // raw content is served from the default branch; try main then master
    for branch in ["main", "master"] {
        let url = format!(
            "https://raw.githubusercontent.com/{}/{}/{}/README.md",
            owner, repo, branch
        );
        let response = client
            .get(&url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;
        if response.status().is_success() {
            return response.text().await.map_err(AppError::from);
        }
    }

    Err(AppError::BadRequest(
        "README not found in main or master branch".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_repository_url() {
        let (owner, repo) = parse_repo_path("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn strips_trailing_slash_and_git_suffix() {
        let (_, repo) = parse_repo_path("https://github.com/rust-lang/cargo.git").unwrap();
        assert_eq!(repo, "cargo");

        let (owner, repo) = parse_repo_path("https://github.com/rust-lang/cargo/").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "cargo");
    }

    #[test]
    fn accepts_www_host() {
        assert!(parse_repo_path("https://www.github.com/rust-lang/rust").is_ok());
    }

    #[test]
    fn rejects_non_github_hosts() {
        assert!(parse_repo_path("https://gitlab.com/rust-lang/rust").is_err());
        assert!(parse_repo_path("https://example.com/a/b").is_err());
    }

    #[test]
    fn rejects_urls_without_owner_and_repo() {
        assert!(parse_repo_path("https://github.com/").is_err());
        assert!(parse_repo_path("https://github.com/only-owner").is_err());
        assert!(parse_repo_path("not a url").is_err());
    }
}
