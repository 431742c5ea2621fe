// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the GitHub client.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::Url;

use crate::error::GithubError;
use crate::token::AccessToken;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the GitHub client.
///
/// The token is held as an [`AccessToken`] so the config can be logged with
/// `?config` without leaking the credential.
#[derive(Clone)]
pub struct GithubConfig {
	/// Credential sent as a bearer token on every request
	token: AccessToken,

	/// Base URL for the REST API (validated, always ends in `/`)
	base_url: Url,

	/// Per-request timeout
	request_timeout: Duration,
}

impl std::fmt::Debug for GithubConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GithubConfig")
			.field("token", &self.token)
			.field("base_url", &self.base_url.as_str())
			.field("request_timeout", &self.request_timeout)
			.finish()
	}
}

impl GithubConfig {
	/// Validate and normalize a base URL.
	///
	/// Requirements:
	/// - Must be a valid URL with a host
	/// - Must use HTTPS, unless the host is a loopback address
	/// - The path always ends in `/` so relative joins keep prefixes such as
	///   `/api/v3` on GitHub Enterprise Server
	fn validate_and_normalize_base_url(raw: &str) -> Result<Url, GithubError> {
		let mut url = Url::parse(raw)
			.map_err(|e| GithubError::Config(format!("Invalid GitHub API URL '{raw}': {e}")))?;

		let host = url
			.host_str()
			.ok_or_else(|| GithubError::Config("GitHub API URL must include a host".to_string()))?;

		let loopback = host == "localhost"
			|| host
				.trim_matches(|c| c == '[' || c == ']')
				.parse::<IpAddr>()
				.map(|ip| ip.is_loopback())
				.unwrap_or(false);

		if url.scheme() != "https" && !(url.scheme() == "http" && loopback) {
			return Err(GithubError::Config(format!(
				"GitHub API URL must use https, got '{}'",
				url.scheme()
			)));
		}

		if !url.path().ends_with('/') {
			let path = format!("{}/", url.path());
			url.set_path(&path);
		}

		Ok(url)
	}

	/// Create a configuration for the public GitHub API.
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			token: AccessToken::new(token),
			base_url: Self::validate_and_normalize_base_url(DEFAULT_BASE_URL)
				.expect("default URL is valid"),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	/// Point the client at another API root (GitHub Enterprise Server, or a
	/// local mock in tests).
	pub fn with_base_url(mut self, url: &str) -> Result<Self, GithubError> {
		self.base_url = Self::validate_and_normalize_base_url(url)?;
		Ok(self)
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub(crate) fn token(&self) -> &AccessToken {
		&self.token
	}

	/// Get the validated base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub fn request_timeout(&self) -> Duration {
		self.request_timeout
	}
}
