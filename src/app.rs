//! Application composition: a shared [`Router`] plus a shared
//! [`TypeRegistry`], wired together for the request handler.
//!
//! ```rust
//! use actionrouter::app::{App, RequestOutcome};
//! use actionrouter::dispatcher::ActionTable;
//! use actionrouter::registry::TypeRegistry;
//! use actionrouter::router::Router;
//! use http::{Method, StatusCode};
//!
//! #[derive(Default)]
//! struct Home;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_table("homecontroller", ActionTable::<Home>::new().action("index", 0, |_, _| true));
//!
//! let (router, _) = Router::from_config("get / home#index\n");
//! let app = App::new(router, registry);
//!
//! let outcome = app.handle(&Method::GET, "/");
//! assert!(matches!(outcome, RequestOutcome::Dispatched { .. }));
//! assert_eq!(app.handle(&Method::POST, "/").status_code(), StatusCode::METHOD_NOT_ALLOWED);
//! ```

use crate::dispatcher::{DispatchError, Dispatcher};
use crate::registry::TypeRegistry;
use crate::router::{RouteTarget, Router, RoutingResult};
use crate::routes::{load_routes, RouteMethod};
use crate::runtime_config::RuntimeConfig;
use anyhow::{Context, Result};
use http::{Method, StatusCode};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What happened to one request.
#[derive(Debug)]
pub enum RequestOutcome {
    /// Route found and the action reported success
    Dispatched { target: RouteTarget, arity: usize },
    /// Route found but construction, resolution or invocation failed
    DispatchFailed {
        target: RouteTarget,
        error: DispatchError,
    },
    /// A rule matched the path but not the method
    Rejected { allowed: RouteMethod },
    NotFound,
}

impl RequestOutcome {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestOutcome::Dispatched { .. } => StatusCode::OK,
            RequestOutcome::DispatchFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RequestOutcome::Rejected { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RequestOutcome::NotFound => StatusCode::NOT_FOUND,
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<&RouteTarget> {
        match self {
            RequestOutcome::Dispatched { target, .. }
            | RequestOutcome::DispatchFailed { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Router and registry, both frozen after startup and shared by reference
/// count between request handlers.
#[derive(Debug, Clone)]
pub struct App {
    router: Arc<Router>,
    registry: Arc<TypeRegistry>,
}

impl App {
    #[must_use]
    pub fn new(router: impl Into<Arc<Router>>, registry: impl Into<Arc<TypeRegistry>>) -> Self {
        Self {
            router: router.into(),
            registry: registry.into(),
        }
    }

    /// Load the routes file named by `config` and pair it with `registry`.
    ///
    /// Malformed lines are logged and skipped; an unreadable file is an error.
    pub fn from_runtime_config(
        config: &RuntimeConfig,
        registry: impl Into<Arc<TypeRegistry>>,
    ) -> Result<Self> {
        let path = config.routes_config_path();
        let compiled = load_routes(&path)
            .with_context(|| format!("Failed to load routing table from {}", path.display()))?;
        if !compiled.is_clean() {
            warn!(
                file = %path.display(),
                diagnostics = compiled.diagnostics.len(),
                "Routing table compiled with diagnostics"
            );
        }
        let app = Self::new(Router::new(compiled.table), registry);
        info!(
            web_root = %config.web_root().display(),
            routes_count = app.router.table().len(),
            types = app.registry.len(),
            "Application ready"
        );
        Ok(app)
    }

    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Route the request, then dispatch the matched action with the route
    /// params on a fresh controller instance.
    #[must_use]
    pub fn handle(&self, method: &Method, path: &str) -> RequestOutcome {
        let target = match self.router.route(method, path) {
            RoutingResult::Found(target) => target,
            RoutingResult::Rejected { allowed } => return RequestOutcome::Rejected { allowed },
            RoutingResult::NotFound => return RequestOutcome::NotFound,
        };

        let mut dispatcher = Dispatcher::new(&self.registry, &*target.controller);
        match dispatcher.try_dispatch(&target.action, target.args()) {
            Ok(invocation) => {
                debug!(
                    method = %method,
                    path = %path,
                    controller = %target.controller,
                    action = %target.action,
                    arity = invocation.arity,
                    "Request dispatched"
                );
                RequestOutcome::Dispatched {
                    target,
                    arity: invocation.arity,
                }
            }
            Err(error) => RequestOutcome::DispatchFailed { target, error },
        }
    }
}
