// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the GitHub client.

use thiserror::Error;

/// Errors that can occur when talking to the GitHub REST API.
#[derive(Debug, Error)]
pub enum GithubError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// The access token was rejected.
	#[error("Unauthorized: bad or expired GitHub token")]
	Unauthorized,

	/// The token lacks the permissions the request needs.
	#[error("Forbidden or insufficient permissions")]
	Forbidden,

	/// GitHub reported the primary or secondary rate limit.
	#[error("Rate limit exceeded")]
	RateLimited,

	/// The repository, pull request, ref, or file does not exist.
	#[error("Not found: {0}")]
	NotFound(String),

	/// GitHub API returned any other non-success status.
	#[error("GitHub API error: {status} - {message}")]
	ApiError { status: u16, message: String },

	/// Invalid or unparseable response body.
	#[error("Invalid response from GitHub: {0}")]
	InvalidResponse(String),

	/// Client configuration error.
	#[error("Configuration error: {0}")]
	Config(String),

	/// File content could not be decoded to text.
	#[error("Failed to decode file content: {0}")]
	Decode(String),
}

impl GithubError {
	/// Create an API error from status code and message.
	pub fn api_error(status: u16, message: impl Into<String>) -> Self {
		Self::ApiError {
			status,
			message: message.into(),
		}
	}

	/// Returns true if the error means the requested resource is missing.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}
}
