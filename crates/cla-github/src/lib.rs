// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Read-only GitHub REST client for the CLA check.
//!
//! Covers the three calls the check needs: listing a pull request's commits,
//! comparing two commits, and fetching a file at a ref. The [`GithubApi`]
//! trait is the seam callers program against.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod token;
pub mod types;

pub use api::GithubApi;
pub use client::{user_agent, GithubClient};
pub use config::{GithubConfig, DEFAULT_BASE_URL};
pub use error::GithubError;
pub use token::AccessToken;
pub use types::{Commit, CommitAuthor, FileContents, RepoId};
