//! Router core module - hot path for request routing.
//!
//! Matching is a pure read over the frozen [`RouteTable`]: no locks, no
//! suspension points, and the only allocations are the extracted params.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use crate::routes::{CompiledRoutes, RouteMethod, RouteTable};
use http::{Method, StatusCode};
use serde::Serialize;
use smallvec::SmallVec;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of positional params before heap allocation.
/// Most param routes carry ≤4 segments (e.g. `/users/42/posts/7`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Positional params extracted from a `:params` route, in path order.
pub type ParamVec = SmallVec<[String; MAX_INLINE_PARAMS]>;

/// Controller, action and params resolved for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTarget {
    /// Registry name of the controller (e.g. `homecontroller`)
    pub controller: Arc<str>,
    pub action: Arc<str>,
    pub params: ParamVec,
}

impl RouteTarget {
    /// Params as owned strings, ready for [`crate::dispatcher::Dispatcher::dispatch`].
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.params
    }
}

/// Outcome of matching a request against the routing table.
///
/// `Rejected` means a rule matched the path but not the method. It is kept
/// apart from `NotFound` so the caller can answer 405 instead of 404.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoutingResult {
    Found(RouteTarget),
    Rejected {
        /// Method constraint of the rule that rejected the request
        allowed: RouteMethod,
    },
    NotFound,
}

impl RoutingResult {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, RoutingResult::Found(_))
    }

    #[must_use]
    pub fn target(&self) -> Option<&RouteTarget> {
        match self {
            RoutingResult::Found(target) => Some(target),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_target(self) -> Option<RouteTarget> {
        match self {
            RoutingResult::Found(target) => Some(target),
            _ => None,
        }
    }

    /// HTTP status class the request handler should answer with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            RoutingResult::Found(_) => StatusCode::OK,
            RoutingResult::Rejected { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RoutingResult::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// First-match router over a frozen [`RouteTable`].
///
/// Entries are tried in configuration order and the first structural match
/// decides the outcome, including a method rejection. There is no sorting, no
/// longest-prefix preference and no backtracking; the order of the
/// configuration file is the priority mechanism.
///
/// `Router` is `Send + Sync` and cheap to clone; share it with `Arc<Router>`.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    /// Create a router over an already compiled table.
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        let routes_summary: Vec<String> = table
            .iter()
            .take(10)
            .map(ToString::to_string)
            .collect();

        info!(
            routes_count = table.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Self { table }
    }

    /// Compile configuration text and build a router from it.
    ///
    /// Returns the compiler output alongside so the caller can decide whether
    /// diagnostics are fatal.
    #[must_use]
    pub fn from_config(text: &str) -> (Self, CompiledRoutes) {
        let compiled = crate::routes::compile_routes(text);
        (Self::new(compiled.table.clone()), compiled)
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Write the table as a `[routes] count=N` header and one `[route]` line
    /// per entry, in match order.
    pub fn write_routes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "[routes] count={}", self.table.len())?;
        for entry in &self.table {
            writeln!(out, "[route] {entry}")?;
        }
        Ok(())
    }

    /// Match a request method and decoded path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use actionrouter::router::{Router, RoutingResult};
    /// use http::Method;
    ///
    /// let (router, _) = Router::from_config("get /users:params user#show\n");
    /// match router.route(&Method::GET, "/users/42/edit") {
    ///     RoutingResult::Found(target) => assert_eq!(target.params.as_slice(), ["42", "edit"]),
    ///     other => panic!("unexpected {other:?}"),
    /// }
    /// ```
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> RoutingResult {
        for entry in &self.table {
            let remainder = if entry.has_params {
                match path.strip_prefix(entry.path_pattern.as_str()) {
                    Some(rest) => rest,
                    None => continue,
                }
            } else if entry.path_pattern == path {
                ""
            } else {
                continue;
            };

            if !entry.method.accepts(method) {
                warn!(
                    method = %method,
                    path = %path,
                    route_pattern = %entry.path_pattern,
                    allowed = %entry.method,
                    "Route rejected by method"
                );
                return RoutingResult::Rejected {
                    allowed: entry.method,
                };
            }

            let params = if entry.has_params {
                split_params(remainder, path.ends_with('/'))
            } else {
                ParamVec::new()
            };

            debug!(
                method = %method,
                path = %path,
                controller = %entry.controller,
                action = %entry.action,
                route_pattern = %entry.path_pattern,
                params = ?params,
                "Route matched"
            );

            return RoutingResult::Found(RouteTarget {
                controller: Arc::clone(&entry.controller),
                action: Arc::clone(&entry.action),
                params,
            });
        }

        warn!(method = %method, path = %path, "No route matched");
        RoutingResult::NotFound
    }
}

impl From<RouteTable> for Router {
    fn from(table: RouteTable) -> Self {
        Self::new(table)
    }
}

/// Split what follows a `:params` prefix into positional params.
///
/// One separator directly after the prefix is skipped, so `/users` and
/// `/users/` prefixes yield the same params. A trailing slash on the request
/// path leaves an empty last token, which is dropped.
pub(crate) fn split_params(remainder: &str, trailing_slash: bool) -> ParamVec {
    let remainder = remainder.strip_prefix('/').unwrap_or(remainder);
    if remainder.is_empty() {
        return ParamVec::new();
    }
    let mut params: ParamVec = remainder.split('/').map(str::to_owned).collect();
    if trailing_slash {
        params.pop();
    }
    params
}
