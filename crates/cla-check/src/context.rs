// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The triggering event as the runner describes it.
//!
//! The runner exposes the event name in `GITHUB_EVENT_NAME`, the webhook
//! payload as a JSON file at `GITHUB_EVENT_PATH`, and the repository slug in
//! `GITHUB_REPOSITORY`. Only the fields the check reads are modelled; the
//! rest of the payload is ignored.

use std::path::Path;

use cla_github::RepoId;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CheckError;

/// An account reference inside a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRef {
	pub login: String,
}

/// A repository reference inside a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryRef {
	pub name: String,
	pub owner: AccountRef,
}

impl RepositoryRef {
	pub fn repo_id(&self) -> RepoId {
		RepoId::new(&self.owner.login, &self.name)
	}
}

/// The head side of a pull request.
///
/// `repo` is null when the fork the pull request came from was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestHead {
	#[serde(rename = "ref")]
	pub git_ref: String,
	#[serde(default)]
	pub repo: Option<RepositoryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestEvent {
	pub number: u64,
	pub head: PullRequestHead,
}

/// The `merge_group` object of a merge queue event.
///
/// GitHub sends the base/head pair; some integrations also list the
/// constituent pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MergeGroupEvent {
	#[serde(default)]
	pub base_sha: Option<String>,
	#[serde(default)]
	pub head_sha: Option<String>,
	#[serde(default)]
	pub head_ref: Option<String>,
	#[serde(default)]
	pub pull_requests: Option<Vec<PullRequestEvent>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventPayload {
	#[serde(default)]
	pub pull_request: Option<PullRequestEvent>,
	#[serde(default)]
	pub merge_group: Option<MergeGroupEvent>,
	#[serde(default)]
	pub repository: Option<RepositoryRef>,
}

/// Everything the check knows about why it was invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
	pub event_name: String,
	pub payload: EventPayload,
	/// The repository the workflow runs in (the pull request base).
	pub repo: RepoId,
}

impl EventContext {
	/// Build a context from already-parsed parts.
	///
	/// The repository comes from `repository` (an `owner/name` slug) when
	/// given, otherwise from the payload's `repository` object.
	pub fn new(
		event_name: impl Into<String>,
		payload: EventPayload,
		repository: Option<&str>,
	) -> Result<Self, CheckError> {
		let repo = match repository.map(str::trim).filter(|s| !s.is_empty()) {
			Some(slug) => RepoId::parse(slug).ok_or_else(|| {
				CheckError::InvalidEvent(format!(
					"GITHUB_REPOSITORY must look like 'owner/repo', got '{slug}'"
				))
			})?,
			None => payload
				.repository
				.as_ref()
				.map(RepositoryRef::repo_id)
				.ok_or_else(|| {
					CheckError::InvalidEvent(
						"GITHUB_REPOSITORY is not set and the payload names no repository".to_string(),
					)
				})?,
		};

		Ok(Self {
			event_name: event_name.into(),
			payload,
			repo,
		})
	}

	/// Load the context the way the runner provides it.
	///
	/// A missing `event_path`, or one pointing at a file that does not exist,
	/// yields an empty payload. A file that exists but cannot be read or
	/// parsed is an error.
	pub fn load(
		event_name: &str,
		event_path: Option<&Path>,
		repository: Option<&str>,
	) -> Result<Self, CheckError> {
		let payload = match event_path {
			Some(path) if path.exists() => {
				let raw = std::fs::read_to_string(path).map_err(|e| {
					CheckError::InvalidEvent(format!("failed to read {}: {e}", path.display()))
				})?;
				parse_payload(&raw)?
			}
			Some(path) => {
				warn!(path = %path.display(), "Event payload file does not exist");
				EventPayload::default()
			}
			None => {
				debug!("No event payload path provided");
				EventPayload::default()
			}
		};

		Self::new(event_name, payload, repository)
	}
}

/// Parse a webhook payload document.
pub fn parse_payload(raw: &str) -> Result<EventPayload, CheckError> {
	serde_json::from_str(raw)
		.map_err(|e| CheckError::InvalidEvent(format!("malformed event payload: {e}")))
}
