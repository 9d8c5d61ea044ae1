pub mod session;

use std::{
	io::{self, BufRead, Write},
	path::PathBuf,
};

use clap::Parser;
use color_eyre::{Result, eyre};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use sage_domain::sanitize;

use crate::session::SessionState;

#[derive(Debug, Parser)]
#[command(
	version = sage_cli::VERSION,
	rename_all = "kebab",
	styles = sage_cli::styles(),
)]
pub struct Args {
	/// Base URL of the sage API server.
	#[arg(long, default_value = "http://127.0.0.1:8787")]
	pub api_base: String,
	/// Override the session state file location.
	#[arg(long, value_name = "FILE")]
	pub state: Option<PathBuf>,
	/// Discard the stored session and start a fresh one.
	#[arg(long)]
	pub reset: bool,
	/// One message to send; without it an interactive prompt starts.
	pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TurnReply {
	reply: String,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
	message: String,
}

pub async fn run(args: Args) -> Result<()> {
	let state_path = args.state.clone().unwrap_or_else(session::default_path);
	let session = if args.reset {
		let session = session::reset(&state_path)?;

		println!("New session started: {}", session.session_id);

		session
	} else {
		session::load_or_create(&state_path)?
	};
	let client = Client::new();

	match args.message {
		Some(message) => {
			let reply = send(&client, &args.api_base, &session, &message).await;

			println!("{reply}");
		},
		None => repl(&client, &args.api_base, &session).await?,
	}

	Ok(())
}

async fn repl(client: &Client, api_base: &str, session: &SessionState) -> Result<()> {
	println!(
		"Tell me what you're studying, your deadline, and how many hours you can spend per week. I'll build a plan."
	);

	let stdin = io::stdin();

	loop {
		print!("> ");
		io::stdout().flush()?;

		let mut line = String::new();

		if stdin.lock().read_line(&mut line)? == 0 {
			break;
		}

		let message = line.trim();

		if message.is_empty() {
			continue;
		}
		if matches!(message, "exit" | "quit") {
			break;
		}

		let reply = send(client, api_base, session, message).await;

		println!("{reply}\n");
	}

	Ok(())
}

/// Send one turn and render the outcome. Transport and server failures
/// come back as an apologetic line embedding the underlying error, never
/// as an empty reply.
async fn send(client: &Client, api_base: &str, session: &SessionState, message: &str) -> String {
	match try_send(client, api_base, session, message).await {
		Ok(reply) => sanitize::sanitize_reply(&reply),
		Err(err) => format!("Sorry — {err}"),
	}
}

async fn try_send(
	client: &Client,
	api_base: &str,
	session: &SessionState,
	message: &str,
) -> Result<String> {
	let res = client
		.post(format!("{api_base}/v1/chat"))
		.json(&json!({ "session_key": session.session_id, "message": message }))
		.send()
		.await
		.map_err(|err| eyre::eyre!("network error: {err}"))?;
	let status = res.status();
	let raw = res.text().await.map_err(|err| eyre::eyre!("network error: {err}"))?;

	if !status.is_success() {
		let message = serde_json::from_str::<ErrorReply>(&raw)
			.map(|body| body.message)
			.unwrap_or(raw);

		return Err(eyre::eyre!("I hit an error.\n{message}"));
	}

	// A body that is not the expected JSON is shown as-is rather than
	// dropped.
	Ok(serde_json::from_str::<TurnReply>(&raw).map(|body| body.reply).unwrap_or(raw))
}
