use crate::{
    handlers::LoadedRoute,
    hot_reload::watch_handlers,
    router::{RouteMatch, RouteTable},
    runtime_config::RuntimeConfig,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// Command-line interface for routeswitch
#[derive(Parser)]
#[command(name = "routeswitch")]
#[command(about = "URI-template router over a handler directory", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List registered routes in priority order
    Routes {
        /// Handler directory (defaults to ROUTESWITCH_HANDLERS_DIR or ./handlers)
        #[arg(long)]
        handlers: Option<PathBuf>,

        /// Print routes as JSON lines instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Match paths against the routes and print the results as JSON lines
    Match {
        /// Handler directory (defaults to ROUTESWITCH_HANDLERS_DIR or ./handlers)
        #[arg(long)]
        handlers: Option<PathBuf>,

        /// Reload routes when the handler directory changes (stdin mode only)
        #[arg(long, default_value_t = false, conflicts_with = "paths")]
        watch: bool,

        /// Paths to match; read from stdin when omitted
        paths: Vec<String>,
    },
}

/// JSON shape of one `match` result line
#[derive(Debug, Serialize)]
pub(crate) struct MatchOutput<'a> {
    pub path: &'a str,
    pub handler: &'a str,
    pub pattern: &'a str,
    pub params: BTreeMap<&'a str, &'a str>,
    pub methods: &'a serde_json::Value,
}

impl<'a> MatchOutput<'a> {
    pub(crate) fn new(path: &'a str, m: &'a RouteMatch<LoadedRoute>) -> Self {
        Self {
            path,
            handler: &m.route.value.handler,
            pattern: &m.route.value.path,
            params: m
                .params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            methods: &m.route.value.methods,
        }
    }
}

/// Run a parsed command line.
pub fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = RuntimeConfig::from_env();

    match cli.command {
        Commands::Routes { handlers, json } => {
            let dir = handlers.unwrap_or(config.handlers_dir);
            let table =
                RouteTable::from_handlers_with_limit(&dir, None, config.regex_size_limit)?;
            let mut out = io::stdout().lock();
            write_routes(&table, json, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match {
            handlers,
            watch,
            paths,
        } => {
            let dir = handlers.unwrap_or(config.handlers_dir);
            let table = Arc::new(RouteTable::from_handlers_with_limit(
                &dir,
                None,
                config.regex_size_limit,
            )?);

            // Only a stdin session lives long enough to see a reload. The
            // watcher is held until the command returns.
            let _watcher = if paths.is_empty() && (watch || config.hot_reload) {
                Some(
                    watch_handlers(&dir, Arc::clone(&table), |routes| {
                        info!(routes_count = routes.len(), "Handler directory reloaded");
                    })
                    .with_context(|| format!("failed to watch {}", dir.display()))?,
                )
            } else {
                None
            };

            let mut out = io::stdout().lock();
            let all_matched = if paths.is_empty() {
                let stdin = io::stdin();
                let mut all = true;
                for line in stdin.lock().lines() {
                    let line = line.context("failed to read path from stdin")?;
                    let path = line.trim();
                    if path.is_empty() {
                        continue;
                    }
                    all &= write_match(&table, path, &mut out)?;
                    out.flush()?;
                }
                all
            } else {
                let mut all = true;
                for path in &paths {
                    all &= write_match(&table, path, &mut out)?;
                }
                all
            };

            Ok(if all_matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Write one JSON line for `path`; returns whether it matched.
pub(crate) fn write_match<W: Write>(
    table: &RouteTable<LoadedRoute>,
    path: &str,
    out: &mut W,
) -> anyhow::Result<bool> {
    match table.match_path(path) {
        Some(m) => {
            serde_json::to_writer(&mut *out, &MatchOutput::new(path, &m))?;
            writeln!(out)?;
            Ok(true)
        }
        None => {
            writeln!(out, "null")?;
            Ok(false)
        }
    }
}

pub(crate) fn write_routes<W: Write>(
    table: &RouteTable<LoadedRoute>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    for route in table.routes() {
        if json {
            serde_json::to_writer(&mut *out, &route.value)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{} -> {}", route.value.path, route.value.handler)?;
        }
    }
    Ok(())
}
