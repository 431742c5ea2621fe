// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Drives `GithubClient` against a mock GitHub API.

use cla_github::{CommitAuthor, GithubApi, GithubClient, GithubConfig, GithubError, RepoId};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GithubClient {
	let config = GithubConfig::new("ghs_test_token")
		.with_base_url(&server.uri())
		.unwrap();
	GithubClient::new(config).unwrap()
}

fn repo() -> RepoId {
	RepoId::new("octo", "cla")
}

#[tokio::test]
async fn lists_pull_request_commits_with_auth_headers() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/repos/octo/cla/pulls/42/commits"))
		.and(query_param("per_page", "100"))
		.and(header("authorization", "Bearer ghs_test_token"))
		.and(header("accept", "application/vnd.github+json"))
		.and(header("x-github-api-version", "2022-11-28"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			{"sha": "a1", "author": {"login": "alice", "id": 1, "type": "User"}},
			{"sha": "b2", "author": {"login": "ci-bot", "id": 2, "type": "Bot"}},
			{"sha": "c3", "author": null}
		])))
		.expect(1)
		.mount(&server)
		.await;

	let commits = client_for(&server)
		.list_pull_request_commits(&repo(), 42)
		.await
		.unwrap();

	assert_eq!(commits.len(), 3);
	assert_eq!(commits[0].author, Some(CommitAuthor::user("alice")));
	assert_eq!(commits[1].author, Some(CommitAuthor::bot("ci-bot")));
	assert!(commits[2].author.is_none());
}

#[tokio::test]
async fn compares_base_and_head() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/repos/octo/cla/compare/base000...head111"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"status": "ahead",
			"ahead_by": 2,
			"total_commits": 2,
			"commits": [
				{"sha": "d1", "author": {"login": "dave", "type": "User"}},
				{"sha": "head111", "author": {"login": "dave", "type": "User"}}
			]
		})))
		.mount(&server)
		.await;

	let commits = client_for(&server)
		.compare_commits(&repo(), "base000", "head111")
		.await
		.unwrap();

	let shas: Vec<_> = commits.iter().map(|c| c.sha.as_str()).collect();
	assert_eq!(shas, vec!["d1", "head111"]);
}

#[tokio::test]
async fn fetches_and_decodes_file_at_ref() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/repos/fork-owner/cla/contents/.github/CONTRIBUTORS.yml"))
		.and(query_param("ref", "feature/signing"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"type": "file",
			"name": "CONTRIBUTORS.yml",
			"path": ".github/CONTRIBUTORS.yml",
			"sha": "3d21ec53a331a6f037a91c368710b99387d012c1",
			"size": 14,
			"encoding": "base64",
			"content": "LSBhbGljZQotIGJv\nYgo=\n"
		})))
		.mount(&server)
		.await;

	let file = client_for(&server)
		.get_file_contents(
			&RepoId::new("fork-owner", "cla"),
			".github/CONTRIBUTORS.yml",
			"feature/signing",
		)
		.await
		.unwrap();

	assert_eq!(file.name, "CONTRIBUTORS.yml");
	assert_eq!(file.decode_content_string().unwrap(), "- alice\n- bob\n");
}

#[tokio::test]
async fn missing_file_is_not_found() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/repos/octo/cla/contents/CONTRIBUTORS.yml"))
		.respond_with(ResponseTemplate::new(404).set_body_json(json!({
			"message": "Not Found",
			"documentation_url": "https://docs.github.com/rest/repos/contents#get-repository-content"
		})))
		.mount(&server)
		.await;

	let err = client_for(&server)
		.get_file_contents(&repo(), "CONTRIBUTORS.yml", "main")
		.await
		.unwrap_err();

	assert!(err.is_not_found());
	assert!(err.to_string().contains("CONTRIBUTORS.yml at main"));
}

#[tokio::test]
async fn bad_credentials_is_unauthorized() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(
			ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
		)
		.mount(&server)
		.await;

	let err = client_for(&server)
		.list_pull_request_commits(&repo(), 1)
		.await
		.unwrap_err();

	assert!(matches!(err, GithubError::Unauthorized));
}

#[tokio::test]
async fn directory_listing_is_invalid_response() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/repos/octo/cla/contents/docs"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			{"type": "file", "name": "a.md", "path": "docs/a.md", "sha": "x", "size": 1}
		])))
		.mount(&server)
		.await;

	let err = client_for(&server)
		.get_file_contents(&repo(), "docs", "main")
		.await
		.unwrap_err();

	assert!(matches!(err, GithubError::InvalidResponse(_)));
}

#[tokio::test]
async fn works_through_the_trait_object() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/repos/octo/cla/pulls/7/commits"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.mount(&server)
		.await;

	let api: Box<dyn GithubApi> = Box::new(client_for(&server));
	let commits = api.list_pull_request_commits(&repo(), 7).await.unwrap();
	assert!(commits.is_empty());
}
