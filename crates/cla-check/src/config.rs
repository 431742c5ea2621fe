// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Command line and environment configuration.
//!
//! Inside a workflow every setting arrives through the environment the runner
//! prepares: action inputs as `INPUT_<NAME>` and run context as `GITHUB_*`.
//! Each one is also a flag so the check can be run by hand.

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::Parser;
use cla_github::{GithubConfig, DEFAULT_BASE_URL};

use crate::error::ConfigError;

#[derive(Debug, Parser)]
#[command(
	name = "cla-check",
	version,
	about = "Fail a pull request whose human commit authors have not signed the CLA"
)]
pub struct Args {
	/// Token used to authenticate every GitHub API call.
	#[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
	pub github_token: Option<String>,

	/// Path of the contributors file, relative to the repository root.
	#[arg(long, env = "INPUT_CONTRIBUTORS-FILE")]
	pub contributors_file: Option<String>,

	/// Name of the triggering event (`pull_request`, `merge_group`, ...).
	#[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
	pub event_name: String,

	/// JSON file holding the triggering event payload.
	#[arg(long, env = "GITHUB_EVENT_PATH")]
	pub event_path: Option<PathBuf>,

	/// Repository the workflow runs in, as `owner/repo`.
	#[arg(long, env = "GITHUB_REPOSITORY")]
	pub repository: Option<String>,

	/// GitHub REST API root.
	#[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_BASE_URL)]
	pub api_url: String,

	/// File that step outputs are appended to.
	#[arg(long, env = "GITHUB_OUTPUT")]
	pub output_file: Option<PathBuf>,

	/// Verbose logging; the runner sets this when debug logging is enabled.
	#[arg(long, env = "RUNNER_DEBUG", value_parser = FalseyValueParser::new())]
	pub debug: bool,
}

/// Validated settings for one check run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
	pub github: GithubConfig,
	pub contributors_file: String,
	pub event_name: String,
	pub event_path: Option<PathBuf>,
	pub repository: Option<String>,
}

/// Trimmed, non-empty input value.
fn required_input(value: Option<&str>, name: &'static str) -> Result<String, ConfigError> {
	value
		.map(str::trim)
		.filter(|v| !v.is_empty())
		.map(str::to_string)
		.ok_or(ConfigError::MissingInput(name))
}

impl Args {
	pub fn to_config(&self) -> Result<CheckConfig, ConfigError> {
		let token = required_input(self.github_token.as_deref(), "github-token")?;
		let contributors_file = required_input(self.contributors_file.as_deref(), "contributors-file")?;
		let github = GithubConfig::new(token).with_base_url(self.api_url.trim())?;

		Ok(CheckConfig {
			github,
			contributors_file,
			event_name: self.event_name.trim().to_string(),
			event_path: self.event_path.clone(),
			repository: self.repository.clone(),
		})
	}
}
