// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Resolution of the triggering event into a query plan.
//!
//! Resolution happens once, up front. Everything downstream matches on
//! [`QueryPlan`] instead of probing optional payload fields.

use std::fmt;

use cla_github::RepoId;
use tracing::debug;

use crate::context::{EventContext, PullRequestEvent};
use crate::error::CheckError;

const MERGE_GROUP_EVENT: &str = "merge_group";

/// One pull request whose commits are under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestTarget {
	pub number: u64,
	/// Repository the head branch lives in (the fork, for fork PRs).
	pub head_repo: RepoId,
	pub head_ref: String,
}

/// A merge queue batch checked as a single `base...head` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTarget {
	pub repo: RepoId,
	pub base_sha: String,
	pub head_sha: String,
	pub head_ref: String,
}

/// How to find the commits and contributors file for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
	/// One or more pull requests in `repo`, each listed on its own.
	PullRequests {
		repo: RepoId,
		pulls: Vec<PullRequestTarget>,
	},
	/// A merge group without a constituent list.
	Comparison(ComparisonTarget),
}

/// Where one copy of the contributors file is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorsSource {
	pub repo: RepoId,
	pub path: String,
	pub git_ref: String,
}

impl fmt::Display for ContributorsSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}@{}", self.repo, self.path, self.git_ref)
	}
}

impl QueryPlan {
	/// Pick the plan for an event.
	///
	/// - A `pull_request` payload wins, whatever the event name.
	/// - A `merge_group` event with a non-empty pull request list checks each
	///   of those pull requests.
	/// - Otherwise a `merge_group` event with both shas compares them.
	/// - Anything else is [`CheckError::NoContext`].
	pub fn resolve(ctx: &EventContext) -> Result<Self, CheckError> {
		if let Some(pr) = &ctx.payload.pull_request {
			let target = pull_request_target(pr)?;
			debug!(number = target.number, "Resolved single pull request plan");
			return Ok(Self::PullRequests {
				repo: ctx.repo.clone(),
				pulls: vec![target],
			});
		}

		let group = match (&ctx.payload.merge_group, ctx.event_name.as_str()) {
			(Some(group), MERGE_GROUP_EVENT) => group,
			_ => return Err(CheckError::NoContext),
		};

		if let Some(pulls) = group.pull_requests.as_ref().filter(|p| !p.is_empty()) {
			let pulls = pulls
				.iter()
				.map(pull_request_target)
				.collect::<Result<Vec<_>, _>>()?;
			debug!(count = pulls.len(), "Resolved merge group pull request plan");
			return Ok(Self::PullRequests {
				repo: ctx.repo.clone(),
				pulls,
			});
		}

		match (&group.base_sha, &group.head_sha) {
			(Some(base_sha), Some(head_sha)) => {
				let head_ref = group.head_ref.clone().unwrap_or_else(|| head_sha.clone());
				debug!(%base_sha, %head_sha, "Resolved merge group comparison plan");
				Ok(Self::Comparison(ComparisonTarget {
					repo: ctx.repo.clone(),
					base_sha: base_sha.clone(),
					head_sha: head_sha.clone(),
					head_ref,
				}))
			}
			_ => Err(CheckError::NoContext),
		}
	}

	/// Where to read the contributors file for every target in the plan.
	///
	/// Pull requests read it from their own head, so a contributor can sign
	/// in the same pull request that adds their first commit.
	pub fn contributors_sources(&self, path: &str) -> Vec<ContributorsSource> {
		match self {
			Self::PullRequests { pulls, .. } => pulls
				.iter()
				.map(|pr| ContributorsSource {
					repo: pr.head_repo.clone(),
					path: path.to_string(),
					git_ref: pr.head_ref.clone(),
				})
				.collect(),
			Self::Comparison(target) => vec![ContributorsSource {
				repo: target.repo.clone(),
				path: path.to_string(),
				git_ref: target.head_ref.clone(),
			}],
		}
	}

	/// Short label for logs.
	pub fn describe(&self) -> String {
		match self {
			Self::PullRequests { repo, pulls } => {
				let numbers: Vec<String> = pulls.iter().map(|p| format!("#{}", p.number)).collect();
				format!("{repo} pull request(s) {}", numbers.join(", "))
			}
			Self::Comparison(target) => format!(
				"{} merge group {}...{}",
				target.repo, target.base_sha, target.head_sha
			),
		}
	}
}

fn pull_request_target(pr: &PullRequestEvent) -> Result<PullRequestTarget, CheckError> {
	let head_repo = pr.head.repo.as_ref().ok_or_else(|| {
		CheckError::InvalidEvent(format!(
			"pull request #{} has no head repository (was the fork deleted?)",
			pr.number
		))
	})?;

	Ok(PullRequestTarget {
		number: pr.number,
		head_repo: head_repo.repo_id(),
		head_ref: pr.head.git_ref.clone(),
	})
}
