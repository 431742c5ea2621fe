// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Loading the CLA contributors file.
//!
//! The file is a YAML list of account logins:
//!
//! ```yaml
//! - alice
//! - bob
//! ```
//!
//! An empty document (or one holding only comments or `null`) is an empty
//! list.

use cla_github::GithubApi;
use futures::future::try_join_all;
use tracing::{debug, instrument};

use crate::error::{CheckError, ContributorsError};
use crate::plan::ContributorsSource;

/// Parse contributors file text into a list of logins.
pub fn parse_contributors(text: &str) -> Result<Vec<String>, serde_yaml::Error> {
	if is_blank_document(text) {
		return Ok(Vec::new());
	}
	let logins: Option<Vec<String>> = serde_yaml::from_str(text)?;
	Ok(logins.unwrap_or_default())
}

fn is_blank_document(text: &str) -> bool {
	text
		.lines()
		.map(str::trim)
		.all(|line| line.is_empty() || line.starts_with('#') || line == "---" || line == "...")
}

async fn load_one(
	api: &dyn GithubApi,
	source: &ContributorsSource,
) -> Result<Vec<String>, CheckError> {
	let fail = |reason: ContributorsError| CheckError::ContributorsLoadFailure {
		location: source.to_string(),
		reason,
	};

	let file = api
		.get_file_contents(&source.repo, &source.path, &source.git_ref)
		.await
		.map_err(|e| fail(e.into()))?;
	let text = file.decode_content_string().map_err(|e| fail(e.into()))?;
	let logins = parse_contributors(&text).map_err(|e| fail(e.into()))?;

	debug!(source = %source, count = logins.len(), "Loaded contributors");
	Ok(logins)
}

/// Load and concatenate the contributors lists from every source.
///
/// Duplicates across sources are kept; membership checks do not care.
#[instrument(skip_all, fields(sources = sources.len()))]
pub async fn load_contributors(
	api: &dyn GithubApi,
	sources: &[ContributorsSource],
) -> Result<Vec<String>, CheckError> {
	let lists = try_join_all(sources.iter().map(|source| load_one(api, source))).await?;
	Ok(lists.into_iter().flatten().collect())
}
