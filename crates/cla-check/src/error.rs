// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the CLA check.
//!
//! Every variant is terminal: the binary turns it into a failed run whose
//! message is the error's `Display` text. Variants embed the underlying
//! error in their message rather than chaining it as a `source`, so the
//! rendered text never repeats itself.

use cla_github::GithubError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
	/// The event is neither a pull request nor a recognised merge group.
	#[error("No pull request context available")]
	NoContext,

	/// The event payload or repository identity could not be read.
	#[error("Invalid event context: {0}")]
	InvalidEvent(String),

	/// Listing or comparing commits failed.
	#[error("Failed to fetch commits: {0}")]
	FetchFailure(GithubError),

	/// The allow-list could not be fetched, decoded, or parsed.
	#[error("Failed to load contributors file {location}: {reason}")]
	ContributorsLoadFailure {
		location: String,
		reason: ContributorsError,
	},

	/// At least one commit has no associated GitHub account.
	#[error("PR contains commits without associated GitHub users")]
	UnattributedCommit { shas: Vec<String> },
}

/// Why a contributors file failed to load.
#[derive(Debug, Error)]
pub enum ContributorsError {
	#[error(transparent)]
	Github(#[from] GithubError),

	#[error("expected a YAML list of logins: {0}")]
	Yaml(#[from] serde_yaml::Error),
}

/// Errors turning CLI/environment inputs into a [`crate::CheckConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Same wording the runner toolkit uses for a missing required input.
	#[error("Input required and not supplied: {0}")]
	MissingInput(&'static str),

	#[error(transparent)]
	Github(#[from] GithubError),
}

/// Errors writing workflow commands or outputs.
#[derive(Debug, Error)]
pub enum WorkflowError {
	#[error("I/O error writing workflow command: {0}")]
	Io(#[from] std::io::Error),

	#[error("Unable to find output file at path: {0}")]
	MissingOutputFile(String),

	#[error("Unexpected input: {what} should not contain the delimiter \"{delimiter}\"")]
	DelimiterCollision {
		what: &'static str,
		delimiter: String,
	},
}
