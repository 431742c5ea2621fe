// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request and response types for the GitHub REST operations the check uses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GithubError;

/// Owner and name of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
	/// Account login of the owner (user or organization).
	pub owner: String,
	/// Repository name.
	pub name: String,
}

impl RepoId {
	pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			owner: owner.into(),
			name: name.into(),
		}
	}

	/// Parse an `owner/name` slug such as the runner's `GITHUB_REPOSITORY`.
	pub fn parse(slug: &str) -> Option<Self> {
		let (owner, name) = slug.split_once('/')?;
		if owner.is_empty() || name.is_empty() || name.contains('/') {
			return None;
		}
		Some(Self::new(owner, name))
	}
}

impl fmt::Display for RepoId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.owner, self.name)
	}
}

/// The platform account GitHub associated with a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
	/// Account login (case-sensitive).
	pub login: String,
	/// Account type: "User", "Bot", or "Organization".
	#[serde(rename = "type")]
	pub account_type: String,
}

impl CommitAuthor {
	pub fn user(login: impl Into<String>) -> Self {
		Self {
			login: login.into(),
			account_type: "User".to_string(),
		}
	}

	pub fn bot(login: impl Into<String>) -> Self {
		Self {
			login: login.into(),
			account_type: "Bot".to_string(),
		}
	}

	/// Bot accounts are identified by type, compared case-insensitively.
	pub fn is_bot(&self) -> bool {
		self.account_type.eq_ignore_ascii_case("bot")
	}
}

/// A commit as returned by the pull request commits and compare endpoints.
///
/// `author` is `None` when the commit email does not map to any account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
	pub sha: String,
	#[serde(default)]
	pub author: Option<CommitAuthor>,
}

impl Commit {
	pub fn new(sha: impl Into<String>, author: Option<CommitAuthor>) -> Self {
		Self {
			sha: sha.into(),
			author,
		}
	}
}

/// File contents response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContents {
	/// File name.
	pub name: String,
	/// Full path within repository.
	pub path: String,
	/// Git blob SHA.
	pub sha: String,
	/// File size in bytes.
	pub size: u64,
	/// Content encoding (usually "base64").
	pub encoding: String,
	/// Encoded file content.
	pub content: String,
}

impl FileContents {
	/// Decode the base64 content to bytes.
	///
	/// GitHub wraps the payload at 60 columns, so whitespace is dropped first.
	pub fn decode_content(&self) -> Result<Vec<u8>, GithubError> {
		use base64::{engine::general_purpose::STANDARD, Engine};

		if self.encoding != "base64" {
			return Err(GithubError::Decode(format!(
				"unsupported encoding '{}' for {}",
				self.encoding, self.path
			)));
		}

		let content_no_newlines: String = self
			.content
			.chars()
			.filter(|c| !c.is_whitespace())
			.collect();
		STANDARD
			.decode(content_no_newlines)
			.map_err(|e| GithubError::Decode(format!("{}: {e}", self.path)))
	}

	/// Decode the base64 content to a UTF-8 string.
	pub fn decode_content_string(&self) -> Result<String, GithubError> {
		let bytes = self.decode_content()?;
		String::from_utf8(bytes)
			.map_err(|e| GithubError::Decode(format!("{} is not valid UTF-8: {e}", self.path)))
	}
}
