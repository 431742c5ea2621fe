// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! One check run, from plan to published result.

use std::io::Write;
use std::process::ExitCode;

use cla_github::GithubApi;
use tracing::{info, instrument};

use crate::contributors::load_contributors;
use crate::error::{CheckError, WorkflowError};
use crate::fetch::fetch_commits;
use crate::gatekeeper::{evaluate, Evaluation};
use crate::plan::QueryPlan;
use crate::workflow::WorkflowCommands;

/// Name of the step output listing unsigned authors.
pub const MISSING_OUTPUT: &str = "missing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
	Passed,
	Failed,
}

impl CheckStatus {
	pub fn exit_code(self) -> ExitCode {
		match self {
			Self::Passed => ExitCode::SUCCESS,
			Self::Failed => ExitCode::FAILURE,
		}
	}
}

/// Fetch commits and contributors for the plan, then evaluate.
///
/// The two fetch phases run concurrently; both must finish before the
/// evaluation.
#[instrument(skip_all, fields(plan = %plan.describe(), contributors_file = %contributors_file))]
pub async fn run_check(
	api: &dyn GithubApi,
	plan: &QueryPlan,
	contributors_file: &str,
) -> Result<Evaluation, CheckError> {
	let sources = plan.contributors_sources(contributors_file);

	let (commits, contributors) = tokio::try_join!(
		fetch_commits(api, plan),
		load_contributors(api, &sources)
	)?;

	info!(
		commits = commits.len(),
		contributors = contributors.len(),
		"Checking commit authors against contributors list"
	);

	evaluate(&commits, &contributors)
}

/// Report an evaluation to the runner.
///
/// A fully signed evaluation emits nothing. Otherwise the missing logins are
/// logged, published as the `missing` output, and the step is failed.
pub fn publish_evaluation<W: Write>(
	evaluation: &Evaluation,
	commands: &mut WorkflowCommands<W>,
) -> Result<CheckStatus, WorkflowError> {
	if evaluation.is_signed() {
		info!(
			authors = evaluation.authors.len(),
			"All contributors have signed the CLA"
		);
		return Ok(CheckStatus::Passed);
	}

	info!(
		"Not all contributors have signed the CLA. Missing: {}",
		evaluation.missing.join(", ")
	);
	commands.set_output(MISSING_OUTPUT, &evaluation.missing_output())?;
	commands.set_failed(&evaluation.failure_message())?;
	Ok(CheckStatus::Failed)
}

/// Report a terminal error to the runner as a failed step.
pub fn publish_error<W: Write>(
	message: &str,
	commands: &mut WorkflowCommands<W>,
) -> Result<CheckStatus, WorkflowError> {
	commands.set_failed(message)?;
	Ok(CheckStatus::Failed)
}
