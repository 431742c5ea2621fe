// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! CI gate that fails a pull request (or merge queue batch) when any human
//! commit author is missing from the repository's CLA contributors file.
//!
//! A run goes through these stages:
//!
//! 1. [`EventContext::load`] reads the runner's event payload.
//! 2. [`QueryPlan::resolve`] decides which commits to check.
//! 3. [`run_check`] fetches commits and the contributors file concurrently
//!    and hands them to [`evaluate`].
//! 4. [`publish_evaluation`] reports the result through workflow commands.

pub mod check;
pub mod config;
pub mod context;
pub mod contributors;
pub mod error;
pub mod fetch;
pub mod gatekeeper;
pub mod plan;
pub mod workflow;

pub use check::{publish_error, publish_evaluation, run_check, CheckStatus, MISSING_OUTPUT};
pub use config::{Args, CheckConfig};
pub use context::{parse_payload, EventContext, EventPayload};
pub use contributors::{load_contributors, parse_contributors};
pub use error::{CheckError, ConfigError, ContributorsError, WorkflowError};
pub use fetch::fetch_commits;
pub use gatekeeper::{evaluate, Evaluation};
pub use plan::{ComparisonTarget, ContributorsSource, PullRequestTarget, QueryPlan};
pub use workflow::WorkflowCommands;
