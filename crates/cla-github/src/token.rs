// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Access token wrapper that keeps the credential out of logs.
//!
//! [`AccessToken`] prints `[REDACTED]` through both `Debug` and `Display`, so
//! `info!(token = %token)` and `debug!(?config)` are safe. The backing memory
//! is zeroed on drop. Call [`AccessToken::expose`] to read the value.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

/// A GitHub access token (installation token, `GITHUB_TOKEN`, or PAT).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	/// Explicitly access the raw token.
	///
	/// Only the HTTP layer should call this, when building the
	/// `Authorization` header.
	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for AccessToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("AccessToken").field(&REDACTED).finish()
	}
}

impl fmt::Display for AccessToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}
