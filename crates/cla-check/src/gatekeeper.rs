// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The signature decision: which human authors are missing from the list.

use std::collections::{BTreeSet, HashSet};

use cla_github::Commit;
use tracing::warn;

use crate::error::CheckError;

/// Result of comparing commit authors against the contributors list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
	/// Distinct human author logins, sorted.
	pub authors: Vec<String>,
	/// Authors absent from the contributors list, sorted.
	pub missing: Vec<String>,
}

impl Evaluation {
	pub fn is_signed(&self) -> bool {
		self.missing.is_empty()
	}

	/// Value for the `missing` output: `@alice, @bob`.
	pub fn missing_output(&self) -> String {
		self
			.missing
			.iter()
			.map(|login| format!("@{login}"))
			.collect::<Vec<_>>()
			.join(", ")
	}

	pub fn failure_message(&self) -> String {
		format!(
			"Missing CLA signatures for {} contributor(s)",
			self.missing.len()
		)
	}
}

/// Decide which commit authors have not signed.
///
/// Fails with [`CheckError::UnattributedCommit`] if any commit lacks an
/// account, before looking at anything else. Bot accounts are skipped.
/// Login comparison is exact and case-sensitive.
pub fn evaluate(commits: &[Commit], contributors: &[String]) -> Result<Evaluation, CheckError> {
	let unattributed: Vec<String> = commits
		.iter()
		.filter(|c| c.author.as_ref().map_or(true, |a| a.login.is_empty()))
		.map(|c| c.sha.clone())
		.collect();
	if !unattributed.is_empty() {
		warn!(shas = ?unattributed, "Commits have no associated GitHub account");
		return Err(CheckError::UnattributedCommit {
			shas: unattributed,
		});
	}

	let authors: BTreeSet<&str> = commits
		.iter()
		.filter_map(|c| c.author.as_ref())
		.filter(|a| !a.is_bot())
		.map(|a| a.login.as_str())
		.collect();

	let signed: HashSet<&str> = contributors.iter().map(String::as_str).collect();

	let missing = authors
		.iter()
		.filter(|login| !signed.contains(*login))
		.map(|login| login.to_string())
		.collect();

	Ok(Evaluation {
		authors: authors.into_iter().map(str::to_string).collect(),
		missing,
	})
}
