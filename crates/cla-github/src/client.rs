// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! GitHub REST client authenticated with a single access token.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::api::GithubApi;
use crate::config::GithubConfig;
use crate::error::GithubError;
use crate::types::{Commit, FileContents, RepoId};

const API_VERSION: &str = "2022-11-28";
/// Largest page size GitHub accepts for list endpoints.
const PER_PAGE: &str = "100";

/// Returns the User-Agent sent with every request.
///
/// Format: `cla-check/{version}`
pub fn user_agent() -> String {
	format!("cla-check/{}", env!("CARGO_PKG_VERSION"))
}

/// Client for the GitHub REST API.
#[derive(Clone)]
pub struct GithubClient {
	http_client: Client,
	config: GithubConfig,
}

impl GithubClient {
	/// Create a new GitHub client.
	pub fn new(config: GithubConfig) -> Result<Self, GithubError> {
		if config.token().is_empty() {
			return Err(GithubError::Config("GitHub token is empty".to_string()));
		}

		let http_client = Client::builder()
			.user_agent(user_agent())
			.timeout(config.request_timeout())
			.build()
			.map_err(|e| GithubError::Config(format!("Failed to create HTTP client: {e}")))?;

		info!(base_url = %config.base_url(), "Created GitHub client");

		Ok(Self {
			http_client,
			config,
		})
	}

	pub fn config(&self) -> &GithubConfig {
		&self.config
	}

	fn endpoint(&self, path: &str) -> Result<Url, GithubError> {
		self
			.config
			.base_url()
			.join(path)
			.map_err(|e| GithubError::Config(format!("Invalid URL: {e}")))
	}

	/// Send an authenticated GET and decode the JSON body.
	async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, GithubError> {
		debug!(url = %url, "Sending GitHub request");

		let response = self
			.http_client
			.get(url)
			.header(
				"Authorization",
				format!("Bearer {}", self.config.token().expose()),
			)
			.header("Accept", "application/vnd.github+json")
			.header("X-GitHub-Api-Version", API_VERSION)
			.send()
			.await
			.map_err(|e| {
				if e.is_timeout() {
					error!(what, "GitHub request timed out");
					return GithubError::Timeout;
				}
				error!(what, error = %e, "Network error talking to GitHub");
				GithubError::Network(e)
			})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(map_github_error(status, &body, what));
		}

		response.json().await.map_err(|e| {
			error!(what, error = %e, "Failed to parse GitHub response");
			GithubError::InvalidResponse(format!("{what}: JSON parse error: {e}"))
		})
	}

	/// List the commits of a pull request.
	///
	/// Reads a single page of up to 100 commits.
	#[instrument(skip(self, repo), fields(repo = %repo))]
	pub async fn list_pull_request_commits(
		&self,
		repo: &RepoId,
		number: u64,
	) -> Result<Vec<Commit>, GithubError> {
		let mut url = self.endpoint(&format!(
			"repos/{}/{}/pulls/{number}/commits",
			repo.owner, repo.name
		))?;
		url.query_pairs_mut().append_pair("per_page", PER_PAGE);

		let what = format!("{repo} pull request #{number} commits");
		let commits: Vec<Commit> = self.get_json(url, &what).await?;

		debug!(count = commits.len(), "Pull request commits fetched");
		Ok(commits)
	}

	/// Compare two commits and return the commits in `base...head`.
	#[instrument(skip(self, repo), fields(repo = %repo))]
	pub async fn compare_commits(
		&self,
		repo: &RepoId,
		base: &str,
		head: &str,
	) -> Result<Vec<Commit>, GithubError> {
		let basehead = format!(
			"{}...{}",
			urlencoding::encode(base),
			urlencoding::encode(head)
		);
		let mut url = self.endpoint(&format!(
			"repos/{}/{}/compare/{basehead}",
			repo.owner, repo.name
		))?;
		url.query_pairs_mut().append_pair("per_page", PER_PAGE);

		let what = format!("{repo} comparison {base}...{head}");
		let comparison: GitHubCompareResponse = self.get_json(url, &what).await?;

		if comparison.total_commits > comparison.commits.len() as u64 {
			warn!(
				total_commits = comparison.total_commits,
				returned = comparison.commits.len(),
				"Comparison returned fewer commits than the range contains"
			);
		}

		debug!(
			count = comparison.commits.len(),
			"Comparison commits fetched"
		);
		Ok(comparison.commits)
	}

	/// Get file contents from a repository at a ref.
	#[instrument(skip(self, repo), fields(repo = %repo))]
	pub async fn get_file_contents(
		&self,
		repo: &RepoId,
		path: &str,
		git_ref: &str,
	) -> Result<FileContents, GithubError> {
		let path_encoded = path
			.trim_start_matches('/')
			.split('/')
			.map(|segment| urlencoding::encode(segment).into_owned())
			.collect::<Vec<_>>()
			.join("/");
		let mut url = self.endpoint(&format!(
			"repos/{}/{}/contents/{path_encoded}",
			repo.owner, repo.name
		))?;
		url.query_pairs_mut().append_pair("ref", git_ref);

		let what = format!("{repo} contents {path} at {git_ref}");
		let content_response: GitHubContentResponse = self.get_json(url, &what).await?;

		debug!(path = %content_response.path, size = content_response.size, "File contents fetched");

		Ok(FileContents {
			name: content_response.name,
			path: content_response.path,
			sha: content_response.sha,
			size: content_response.size,
			encoding: content_response
				.encoding
				.unwrap_or_else(|| "base64".to_string()),
			content: content_response.content.unwrap_or_default(),
		})
	}
}

#[async_trait]
impl GithubApi for GithubClient {
	async fn list_pull_request_commits(
		&self,
		repo: &RepoId,
		number: u64,
	) -> Result<Vec<Commit>, GithubError> {
		GithubClient::list_pull_request_commits(self, repo, number).await
	}

	async fn compare_commits(
		&self,
		repo: &RepoId,
		base: &str,
		head: &str,
	) -> Result<Vec<Commit>, GithubError> {
		GithubClient::compare_commits(self, repo, base, head).await
	}

	async fn get_file_contents(
		&self,
		repo: &RepoId,
		path: &str,
		git_ref: &str,
	) -> Result<FileContents, GithubError> {
		GithubClient::get_file_contents(self, repo, path, git_ref).await
	}
}

/// Map GitHub API error responses to GithubError.
pub(crate) fn map_github_error(status: StatusCode, body: &str, what: &str) -> GithubError {
	let status_code = status.as_u16();

	match status_code {
		401 => {
			warn!(status = status_code, what, "Unauthorized request to GitHub");
			GithubError::Unauthorized
		}
		403 | 429 => {
			let lower = body.to_lowercase();
			if status_code == 429 || lower.contains("rate limit") {
				warn!(status = status_code, what, "GitHub rate limit exceeded");
				GithubError::RateLimited
			} else {
				warn!(status = status_code, what, "Forbidden request to GitHub");
				GithubError::Forbidden
			}
		}
		404 => {
			warn!(status = status_code, what, "GitHub resource not found");
			GithubError::NotFound(what.to_string())
		}
		_ => {
			error!(status = status_code, body = %body, what, "GitHub API error");
			GithubError::ApiError {
				status: status_code,
				message: api_message(body),
			}
		}
	}
}

/// Pull the `message` field out of a GitHub error body, falling back to the
/// raw body.
fn api_message(body: &str) -> String {
	serde_json::from_str::<GitHubErrorBody>(body)
		.map(|b| b.message)
		.unwrap_or_else(|_| body.to_string())
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
	message: String,
}

#[derive(Debug, Deserialize)]
struct GitHubCompareResponse {
	#[serde(default)]
	total_commits: u64,
	commits: Vec<Commit>,
}

#[derive(Debug, Deserialize)]
struct GitHubContentResponse {
	name: String,
	path: String,
	sha: String,
	size: u64,
	encoding: Option<String>,
	content: Option<String>,
}
