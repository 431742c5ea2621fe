// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cla_check::{
	publish_error, publish_evaluation, run_check, Args, CheckStatus, EventContext, Evaluation,
	QueryPlan, WorkflowCommands,
};
use cla_github::GithubClient;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(debug: bool) {
	let default_filter = if debug {
		"info,cla_check=debug,cla_github=debug"
	} else {
		"info"
	};

	// stdout carries workflow commands, so logs go to stderr.
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

async fn run(args: &Args) -> Result<Evaluation> {
	let config = args.to_config()?;

	let ctx = EventContext::load(
		&config.event_name,
		config.event_path.as_deref(),
		config.repository.as_deref(),
	)?;
	let plan = QueryPlan::resolve(&ctx)?;
	info!(
		event = %ctx.event_name,
		plan = %plan.describe(),
		contributors_file = %config.contributors_file,
		"Checking CLA signatures"
	);

	let client = GithubClient::new(config.github.clone()).context("Failed to build GitHub client")?;
	let evaluation = run_check(&client, &plan, &config.contributors_file).await?;
	Ok(evaluation)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let args = Args::parse();
	init_tracing(args.debug);

	let mut commands = WorkflowCommands::stdout(args.output_file.clone());

	let published = match run(&args).await {
		Ok(evaluation) => publish_evaluation(&evaluation, &mut commands),
		Err(err) => {
			error!(error = %format!("{err:#}"), "CLA check failed");
			publish_error(&format!("{err:#}"), &mut commands)
		}
	};

	match published {
		Ok(status) => status.exit_code(),
		Err(err) => {
			error!(error = %err, "Failed to report result to the runner");
			CheckStatus::Failed.exit_code()
		}
	}
}
