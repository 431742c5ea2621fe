// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Commit fetching for a resolved plan.

use cla_github::{Commit, GithubApi};
use futures::future::try_join_all;
use tracing::{debug, instrument};

use crate::error::CheckError;
use crate::plan::QueryPlan;

/// Fetch every commit in scope for the plan.
///
/// Pull request listings are issued concurrently and concatenated in plan
/// order. The first failure fails the whole fetch.
#[instrument(skip_all, fields(plan = %plan.describe()))]
pub async fn fetch_commits(api: &dyn GithubApi, plan: &QueryPlan) -> Result<Vec<Commit>, CheckError> {
	let commits = match plan {
		QueryPlan::PullRequests { repo, pulls } => {
			let listings = try_join_all(
				pulls
					.iter()
					.map(|pr| api.list_pull_request_commits(repo, pr.number)),
			)
			.await
			.map_err(CheckError::FetchFailure)?;
			listings.into_iter().flatten().collect::<Vec<_>>()
		}
		QueryPlan::Comparison(target) => api
			.compare_commits(&target.repo, &target.base_sha, &target.head_sha)
			.await
			.map_err(CheckError::FetchFailure)?,
	};

	debug!(count = commits.len(), "Fetched commits");
	Ok(commits)
}
