//! # Routes Module
//!
//! Compiles the routing configuration (`config/routes.cfg`) into an ordered,
//! immutable [`RouteTable`].
//!
//! ## Format
//!
//! One directive per line, blank lines and `#` comments ignored:
//!
//! ```text
//! # method   path[:params]        controller#action
//! match      /                    home#index
//! get        /about               home#about
//! post       "/users:params"      'user#update'
//! ```
//!
//! - `match` accepts any request method, `get` and `post` only their own
//! - `:params` turns the path into a literal prefix; the rest of the request
//!   path is split on `/` into positional params
//! - a path without `:params` is registered twice, with and without the
//!   trailing slash
//! - `Home#about` targets controller `homecontroller`, action `about`
//!
//! Malformed lines produce a [`ConfigParseError`] and are skipped.

mod build;
mod error;
mod load;
mod types;

pub use build::{compile_routes, CompiledRoutes, CONTROLLER_SUFFIX, PARAMS_SUFFIX};
pub use error::{ConfigParseError, ConfigParseErrorKind, RoutesLoadError};
pub use load::load_routes;
pub use types::{RouteEntry, RouteMethod, RouteTable};
