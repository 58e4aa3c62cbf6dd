//! # CLI Module
//!
//! Command-line access to the route compiler and matcher, for checking a
//! routing configuration before deploying it.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Compile a routes file and print the table, in file order:
//!
//! ```bash
//! actionrouter routes --config config/routes.cfg
//! actionrouter routes --config config/routes.cfg --json
//! ```
//!
//! ### `match`
//!
//! Match one request and print the outcome:
//!
//! ```bash
//! actionrouter match --config config/routes.cfg --method POST /users/42
//! ```
//!
//! ### `check`
//!
//! Exit non-zero if any directive is malformed:
//!
//! ```bash
//! actionrouter check --config config/routes.cfg
//! ```
//!
//! `--config` falls back to `ACTR_ROUTES_FILE`.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use actionrouter::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(cli)?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
