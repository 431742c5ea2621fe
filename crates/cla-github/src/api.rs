// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::GithubError;
use crate::types::{Commit, FileContents, RepoId};

/// The read-only GitHub operations the CLA check depends on.
///
/// [`crate::GithubClient`] is the production implementation; tests supply
/// in-memory fakes.
#[async_trait]
pub trait GithubApi: Send + Sync {
	/// List the commits of a pull request, oldest first.
	async fn list_pull_request_commits(
		&self,
		repo: &RepoId,
		number: u64,
	) -> Result<Vec<Commit>, GithubError>;

	/// List the commits reachable from `head` but not from `base`.
	async fn compare_commits(
		&self,
		repo: &RepoId,
		base: &str,
		head: &str,
	) -> Result<Vec<Commit>, GithubError>;

	/// Fetch a file at the given ref.
	async fn get_file_contents(
		&self,
		repo: &RepoId,
		path: &str,
		git_ref: &str,
	) -> Result<FileContents, GithubError>;
}
