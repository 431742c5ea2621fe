// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Workflow commands: how a step talks back to the runner.
//!
//! Outputs go to the file named by `GITHUB_OUTPUT` using the multiline
//! `name<<delimiter` form. Without that file they fall back to the legacy
//! `::set-output` stdout command. Errors are `::error::` stdout commands.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::WorkflowError;

/// Escape a command message.
pub fn escape_data(value: &str) -> String {
	value
		.replace('%', "%25")
		.replace('\r', "%0D")
		.replace('\n', "%0A")
}

/// Escape a command property value.
pub fn escape_property(value: &str) -> String {
	escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Build a `name<<delimiter` block for an environment file.
fn key_value_block(name: &str, value: &str) -> Result<String, WorkflowError> {
	let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());

	if name.contains(&delimiter) {
		return Err(WorkflowError::DelimiterCollision {
			what: "name",
			delimiter,
		});
	}
	if value.contains(&delimiter) {
		return Err(WorkflowError::DelimiterCollision {
			what: "value",
			delimiter,
		});
	}

	Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}"))
}

/// Writer for runner workflow commands.
pub struct WorkflowCommands<W: Write> {
	out: W,
	output_file: Option<PathBuf>,
}

impl WorkflowCommands<io::Stdout> {
	/// Commands on stdout, outputs to `output_file` when the runner gave one.
	pub fn stdout(output_file: Option<PathBuf>) -> Self {
		Self::new(io::stdout(), output_file)
	}
}

impl<W: Write> WorkflowCommands<W> {
	pub fn new(out: W, output_file: Option<PathBuf>) -> Self {
		Self { out, output_file }
	}

	fn issue_command(
		&mut self,
		command: &str,
		properties: &[(&str, &str)],
		message: &str,
	) -> Result<(), WorkflowError> {
		let mut line = format!("::{command}");
		if !properties.is_empty() {
			let props: Vec<String> = properties
				.iter()
				.map(|(k, v)| format!("{k}={}", escape_property(v)))
				.collect();
			line.push(' ');
			line.push_str(&props.join(","));
		}
		line.push_str("::");
		line.push_str(&escape_data(message));

		writeln!(self.out, "{line}")?;
		self.out.flush()?;
		Ok(())
	}

	fn append_file_command(path: &Path, message: &str) -> Result<(), WorkflowError> {
		if !path.exists() {
			return Err(WorkflowError::MissingOutputFile(path.display().to_string()));
		}
		let mut file = OpenOptions::new().append(true).open(path)?;
		writeln!(file, "{message}")?;
		Ok(())
	}

	/// Publish a step output.
	pub fn set_output(&mut self, name: &str, value: &str) -> Result<(), WorkflowError> {
		match &self.output_file {
			Some(path) => Self::append_file_command(path, &key_value_block(name, value)?),
			None => {
				writeln!(self.out)?;
				self.issue_command("set-output", &[("name", name)], value)
			}
		}
	}

	/// Emit an error annotation.
	pub fn error(&mut self, message: &str) -> Result<(), WorkflowError> {
		self.issue_command("error", &[], message)
	}

	/// Report the step as failed. The caller is responsible for exiting
	/// non-zero.
	pub fn set_failed(&mut self, message: &str) -> Result<(), WorkflowError> {
		self.error(message)
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn buffered(output_file: Option<PathBuf>) -> WorkflowCommands<Vec<u8>> {
		WorkflowCommands::new(Vec::new(), output_file)
	}

	fn text(commands: WorkflowCommands<Vec<u8>>) -> String {
		String::from_utf8(commands.into_inner()).unwrap()
	}

	#[test]
	fn test_escape_data() {
		assert_eq!(escape_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
	}

	#[test]
	fn test_escape_property() {
		assert_eq!(escape_property("a:b,c%"), "a%3Ab%2Cc%25");
	}

	#[test]
	fn test_error_command() {
		let mut commands = buffered(None);
		commands
			.set_failed("Missing CLA signatures for 2 contributor(s)")
			.unwrap();
		assert_eq!(
			text(commands),
			"::error::Missing CLA signatures for 2 contributor(s)\n"
		);
	}

	#[test]
	fn test_error_command_escapes_newlines() {
		let mut commands = buffered(None);
		commands.error("line one\nline two").unwrap();
		assert_eq!(text(commands), "::error::line one%0Aline two\n");
	}

	#[test]
	fn test_set_output_legacy_command() {
		let mut commands = buffered(None);
		commands.set_output("missing", "@bob, @carol").unwrap();
		assert_eq!(
			text(commands),
			"\n::set-output name=missing::@bob, @carol\n"
		);
	}

	#[test]
	fn test_set_output_appends_to_file() {
		let file = tempfile::NamedTempFile::new().unwrap();
		std::fs::write(file.path(), "existing=1\n").unwrap();

		let mut commands = buffered(Some(file.path().to_path_buf()));
		commands.set_output("missing", "@bob").unwrap();

		let contents = std::fs::read_to_string(file.path()).unwrap();
		let lines: Vec<&str> = contents.lines().collect();
		assert_eq!(lines.len(), 4);
		assert_eq!(lines[0], "existing=1");
		let delimiter = lines[1].strip_prefix("missing<<").unwrap();
		assert!(delimiter.starts_with("ghadelimiter_"));
		assert_eq!(lines[2], "@bob");
		assert_eq!(lines[3], delimiter);

		// nothing on stdout
		assert_eq!(text(commands), "");
	}

	#[test]
	fn test_set_output_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let mut commands = buffered(Some(dir.path().join("absent")));
		let err = commands.set_output("missing", "@bob").unwrap_err();
		assert!(matches!(err, WorkflowError::MissingOutputFile(_)));
	}

	#[test]
	fn test_key_value_block_shape() {
		let block = key_value_block("missing", "@a").unwrap();
		let (head, rest) = block.split_once('\n').unwrap();
		let delimiter = head.strip_prefix("missing<<").unwrap();
		assert_eq!(rest, format!("@a\n{delimiter}"));
	}
}
