// SPDX-FileCopyrightText: 2026 Grouplog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! grouplog - WhatsApp group message logger.
//!
//! Runs the message hook out of process, queries the log, and prints
//! log statistics.

mod host;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use grouplog_config::{ConfigError, GrouplogConfig};
use grouplog_core::{DeliveryContext, GrouplogError, InboundEvent};
use grouplog_hook::HOOK_NAME;
use grouplog_plugin::STATS_COMMAND;
use grouplog_query::QueryParams;
use serde::Deserialize;

use crate::host::StandaloneHost;

/// grouplog - WhatsApp group message logger.
#[derive(Parser, Debug)]
#[command(name = "grouplog", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this TOML file instead of the default locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read one `{"event": .., "context": ..}` payload from stdin and log it.
    Hook,
    /// Query the log: --group_id <jid> --since <date> --hours <n> --limit <n>.
    Query {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print log file statistics.
    Stats,
}

/// Payload accepted by `grouplog hook`.
#[derive(Debug, Deserialize)]
struct HookPayload {
    event: InboundEvent,
    #[serde(default)]
    context: DeliveryContext,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            // Query callers parse stderr as JSON.
            if matches!(cli.command, Commands::Query { .. }) {
                print_json_error(&config_error_message(&errors));
            } else {
                grouplog_config::render_errors(&errors);
            }
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);

    match cli.command {
        Commands::Hook => run_hook(&config),
        Commands::Query { args } => run_query(&config, &args),
        Commands::Stats => run_stats(&config),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GrouplogConfig, Vec<ConfigError>> {
    match path {
        Some(path) => grouplog_config::load_and_validate_path(path),
        None => grouplog_config::load_and_validate(),
    }
}

/// All config errors on one line, separated by `; `.
fn config_error_message(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn print_json_error(message: &str) {
    eprintln!("{}", serde_json::json!({ "error": message }));
}

/// Diagnostics go to stderr; stdout carries command output only.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("grouplog={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn standalone_host(config: &GrouplogConfig) -> Result<StandaloneHost, GrouplogError> {
    let mut host = StandaloneHost::default();
    let manifest = grouplog_plugin::register(&mut host, config)?;
    tracing::debug!(
        plugin = %manifest.name,
        version = %manifest.version,
        hooks = manifest.hooks.len(),
        commands = manifest.commands.len(),
        "plugin registered"
    );
    Ok(host)
}

/// Never fails: a hook must not disturb the host's message pipeline.
fn run_hook(config: &GrouplogConfig) -> ExitCode {
    if let Err(err) = dispatch_stdin(config) {
        eprintln!("[{HOOK_NAME}] Error logging message: {err}");
    }
    ExitCode::SUCCESS
}

fn dispatch_stdin(config: &GrouplogConfig) -> Result<(), GrouplogError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| GrouplogError::io("<stdin>", e))?;
    let payload: HookPayload = serde_json::from_str(&input)?;

    let host = standalone_host(config)?;
    host.dispatch(&payload.event, &payload.context);
    Ok(())
}

fn run_query(config: &GrouplogConfig, args: &[String]) -> ExitCode {
    let params = QueryParams::from_args(args);
    let path = config.log.path_buf();

    let rendered =
        grouplog_query::run_query(&path, &params, config.query.default_limit, Utc::now())
            .and_then(|response| {
                serde_json::to_string_pretty(&response).map_err(GrouplogError::from)
            });

    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_json_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run_stats(config: &GrouplogConfig) -> ExitCode {
    let reply = standalone_host(config)
        .map(|host| host.run_command(STATS_COMMAND))
        .map_err(|err| err.to_string());

    match reply {
        Ok(Some(text)) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("grouplog: command '{STATS_COMMAND}' is not registered");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("grouplog: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_query_flags_as_trailing_args() {
        let cli = Cli::try_parse_from([
            "grouplog", "query", "--group_id", "123@g.us", "--limit", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Query { args } => {
                assert_eq!(args, vec!["--group_id", "123@g.us", "--limit", "5"]);
            }
            other => panic!("expected query, got {other:?}"),
        }
    }

    #[test]
    fn cli_accepts_global_config_before_subcommand() {
        let cli = Cli::try_parse_from(["grouplog", "--config", "/tmp/g.toml", "stats"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn config_errors_join_into_one_message() {
        let errors = vec![
            ConfigError::Validation {
                message: "log.path must not be empty".into(),
            },
            ConfigError::Other("bad".into()),
        ];
        assert_eq!(
            config_error_message(&errors),
            "validation error: log.path must not be empty; configuration error: bad"
        );
    }

    #[test]
    fn hook_payload_context_defaults() {
        let payload: HookPayload =
            serde_json::from_str(r#"{"event":{"from":"1@g.us","content":"hi"}}"#).unwrap();
        assert_eq!(payload.event.content, "hi");
        assert!(payload.context.channel_id.is_empty());
    }
}
