// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Runner-shaped check: event file on disk, real HTTP client against a mock
//! GitHub, outputs appended to a `GITHUB_OUTPUT` file.

use std::io::Write;

use cla_check::{
	publish_evaluation, run_check, Args, CheckStatus, EventContext, QueryPlan, WorkflowCommands,
};
use cla_github::GithubClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn args_for(server: &MockServer, event: &std::path::Path, output: &std::path::Path) -> Args {
	Args {
		github_token: Some("ghs_e2e".to_string()),
		contributors_file: Some("CONTRIBUTORS.yml".to_string()),
		event_name: "pull_request".to_string(),
		event_path: Some(event.to_path_buf()),
		repository: Some("octo/cla".to_string()),
		api_url: server.uri(),
		output_file: Some(output.to_path_buf()),
		debug: false,
	}
}

#[tokio::test]
async fn pull_request_with_unsigned_author_writes_missing_output() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/repos/octo/cla/pulls/5/commits"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			{"sha": "a1", "author": {"login": "alice", "type": "User"}},
			{"sha": "b2", "author": {"login": "bob", "type": "User"}},
			{"sha": "c3", "author": {"login": "github-actions[bot]", "type": "Bot"}}
		])))
		.expect(1)
		.mount(&server)
		.await;

	// "- alice\n"
	Mock::given(method("GET"))
		.and(path("/repos/octo/cla/contents/CONTRIBUTORS.yml"))
		.and(query_param("ref", "add-feature"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"type": "file",
			"name": "CONTRIBUTORS.yml",
			"path": "CONTRIBUTORS.yml",
			"sha": "f00",
			"size": 8,
			"encoding": "base64",
			"content": "LSBhbGljZQo=\n"
		})))
		.expect(1)
		.mount(&server)
		.await;

	let mut event = tempfile::NamedTempFile::new().unwrap();
	write!(
		event,
		"{}",
		json!({
			"action": "opened",
			"number": 5,
			"pull_request": {
				"number": 5,
				"head": {
					"ref": "add-feature",
					"sha": "b2",
					"repo": {"name": "cla", "owner": {"login": "octo"}}
				}
			},
			"repository": {"name": "cla", "owner": {"login": "octo"}}
		})
	)
	.unwrap();
	let output = tempfile::NamedTempFile::new().unwrap();

	let args = args_for(&server, event.path(), output.path());
	let config = args.to_config().unwrap();
	let ctx = EventContext::load(
		&config.event_name,
		config.event_path.as_deref(),
		config.repository.as_deref(),
	)
	.unwrap();
	let plan = QueryPlan::resolve(&ctx).unwrap();
	let client = GithubClient::new(config.github.clone()).unwrap();

	let evaluation = run_check(&client, &plan, &config.contributors_file)
		.await
		.unwrap();

	let mut commands = WorkflowCommands::new(Vec::new(), args.output_file.clone());
	let status = publish_evaluation(&evaluation, &mut commands).unwrap();
	assert_eq!(status, CheckStatus::Failed);

	let stdout = String::from_utf8(commands.into_inner()).unwrap();
	assert_eq!(stdout, "::error::Missing CLA signatures for 1 contributor(s)\n");

	let written = std::fs::read_to_string(output.path()).unwrap();
	let lines: Vec<&str> = written.lines().collect();
	assert_eq!(lines.len(), 3);
	let delimiter = lines[0].strip_prefix("missing<<").unwrap();
	assert_eq!(lines[1], "@bob");
	assert_eq!(lines[2], delimiter);
}

#[tokio::test]
async fn missing_event_file_has_no_pull_request_context() {
	let server = MockServer::start().await;
	let dir = tempfile::tempdir().unwrap();
	let output = tempfile::NamedTempFile::new().unwrap();

	let args = args_for(&server, &dir.path().join("event.json"), output.path());
	let config = args.to_config().unwrap();
	let ctx = EventContext::load(
		&config.event_name,
		config.event_path.as_deref(),
		config.repository.as_deref(),
	)
	.unwrap();

	let err = QueryPlan::resolve(&ctx).unwrap_err();
	assert_eq!(err.to_string(), "No pull request context available");
	assert!(server.received_requests().await.unwrap().is_empty());
}
