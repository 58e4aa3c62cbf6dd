use crate::router::{Router, RoutingResult};
use crate::routes::{load_routes, CompiledRoutes};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::Method;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command-line interface for inspecting routing configurations
#[derive(Parser, Debug)]
#[command(name = "actionrouter")]
#[command(about = "Compile, inspect and test controller#action routing tables", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a routes file and print the resulting table
    Routes {
        /// Path to the routing configuration (e.g. config/routes.cfg)
        #[arg(short, long, env = "ACTR_ROUTES_FILE")]
        config: PathBuf,

        /// Print the table and diagnostics as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Match one request against a routes file
    Match {
        /// Path to the routing configuration (e.g. config/routes.cfg)
        #[arg(short, long, env = "ACTR_ROUTES_FILE")]
        config: PathBuf,

        /// HTTP method of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Decoded request path, e.g. /users/42
        path: String,

        /// Print the routing result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check a routes file for malformed directives
    ///
    /// Exits with a non-zero status when the file cannot be read or any line
    /// is rejected.
    Check {
        /// Path to the routing configuration (e.g. config/routes.cfg)
        #[arg(short, long, env = "ACTR_ROUTES_FILE")]
        config: PathBuf,
    },
}

#[derive(Serialize)]
struct RoutesReport<'a> {
    routes: &'a crate::routes::RouteTable,
    diagnostics: Vec<String>,
}

/// Run a parsed command line against stdout.
pub fn run_cli(cli: Cli) -> Result<ExitCode> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let success = execute(&cli.command, &mut out)?;
    out.flush().context("Failed to flush stdout")?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run `command`, writing its report to `out`.
///
/// Returns `Ok(false)` when the command ran but found problems (`check` with
/// diagnostics). Unreadable files and bad arguments are errors.
pub fn execute<W: Write>(command: &Commands, out: &mut W) -> Result<bool> {
    match command {
        Commands::Routes { config, json } => {
            let compiled = load(config)?;
            if *json {
                let report = RoutesReport {
                    routes: &compiled.table,
                    diagnostics: compiled.diagnostics.iter().map(ToString::to_string).collect(),
                };
                serde_json::to_writer_pretty(&mut *out, &report)
                    .context("Failed to serialize routing table")?;
                writeln!(out)?;
            } else {
                Router::new(compiled.table.clone()).write_routes(out)?;
                write_diagnostics(&compiled, out)?;
            }
            Ok(true)
        }
        Commands::Match {
            config,
            method,
            path,
            json,
        } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())
                .with_context(|| format!("Invalid HTTP method: {method}"))?;
            let compiled = load(config)?;
            let router = Router::new(compiled.table);
            let result = router.route(&method, path);
            if *json {
                serde_json::to_writer_pretty(&mut *out, &result)
                    .context("Failed to serialize routing result")?;
                writeln!(out)?;
            } else {
                write_result(&method, path, &result, out)?;
            }
            Ok(true)
        }
        Commands::Check { config } => {
            let compiled = load(config)?;
            write_diagnostics(&compiled, out)?;
            if compiled.is_clean() {
                writeln!(
                    out,
                    "OK: {} route(s), no diagnostics",
                    compiled.table.len()
                )?;
            }
            Ok(compiled.is_clean())
        }
    }
}

fn load(path: &Path) -> Result<CompiledRoutes> {
    load_routes(path).with_context(|| format!("Failed to load routes from {}", path.display()))
}

fn write_diagnostics<W: Write>(compiled: &CompiledRoutes, out: &mut W) -> Result<()> {
    if compiled.is_clean() {
        return Ok(());
    }
    writeln!(out, "[diagnostics] count={}", compiled.diagnostics.len())?;
    for diagnostic in &compiled.diagnostics {
        writeln!(out, "[error] {diagnostic}")?;
    }
    Ok(())
}

fn write_result<W: Write>(
    method: &Method,
    path: &str,
    result: &RoutingResult,
    out: &mut W,
) -> Result<()> {
    match result {
        RoutingResult::Found(target) => writeln!(
            out,
            "{method} {path} -> {}#{} params={:?}",
            target.controller,
            target.action,
            target.params.as_slice()
        )?,
        RoutingResult::Rejected { allowed } => writeln!(
            out,
            "{method} {path} -> rejected ({}, allowed: {allowed})",
            result.status_code()
        )?,
        RoutingResult::NotFound => {
            writeln!(out, "{method} {path} -> not found ({})", result.status_code())?;
        }
    }
    Ok(())
}
