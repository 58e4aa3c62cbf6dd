//! # actionrouter
//!
//! **actionrouter** maps HTTP requests onto `controller#action` pairs declared
//! in a plain-text routing file, and invokes those actions by name and
//! argument count on controllers constructed from a string-keyed registry.
//!
//! ## Architecture
//!
//! - **[`routes`]** - Compiles `config/routes.cfg` into a frozen [`routes::RouteTable`]
//! - **[`router`]** - First-match matcher yielding `Found`, `Rejected` or `NotFound`
//! - **[`registry`]** - Type name to zero-argument factory map
//! - **[`dispatcher`]** - Lazy construction, arity search and invocation
//! - **[`app`]** - Router and registry wired together for a request handler
//! - **[`runtime_config`]** - Environment-driven application layout
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `actionrouter` command-line tool
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Handler as Request handler
//!     participant Router
//!     participant Registry as TypeRegistry
//!     participant Dispatcher
//!     participant Controller
//!
//!     Handler->>Router: route(&Method, path)
//!     Router-->>Handler: Found(controller, action, params)
//!     Handler->>Dispatcher: new(&registry, controller)
//!     Handler->>Dispatcher: dispatch(action, params)
//!     Dispatcher->>Registry: construct(controller)
//!     Registry-->>Dispatcher: Box<dyn Dispatchable>
//!     Dispatcher->>Controller: has_action(action, N..=0)
//!     Dispatcher->>Controller: invoke_action(action, params[..k])
//!     Controller-->>Dispatcher: success
//!     Dispatcher-->>Handler: true
//! ```
//!
//! ## Routing Configuration
//!
//! ```text
//! # method  path             controller#action
//! get       /                home#index
//! get       /about           home#about
//! match     /users:params    user#show
//! post      /users           user#create
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use actionrouter::{actions, App, TypeRegistry};
//! use actionrouter::router::Router;
//! use http::Method;
//!
//! #[derive(Default)]
//! struct UserController;
//!
//! #[actions]
//! impl UserController {
//!     pub fn show(&mut self, id: &str) -> bool {
//!         !id.is_empty()
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<UserController>("usercontroller");
//!
//! let (router, compiled) = Router::from_config("match /users:params user#show\n");
//! assert!(compiled.is_clean());
//!
//! let app = App::new(router, registry);
//! assert_eq!(app.handle(&Method::GET, "/users/42").status_code(), http::StatusCode::OK);
//! ```

// Generated `Dispatchable` impls name the crate by path, including inside it.
extern crate self as actionrouter;

pub mod app;
pub mod cli;
pub mod dispatcher;
pub mod logging;
pub mod registry;
pub mod router;
pub mod routes;
pub mod runtime_config;

pub use actionrouter_macros::actions;
pub use app::{App, RequestOutcome};
pub use dispatcher::{ActionTable, Dispatchable, DispatchError, Dispatcher};
pub use registry::TypeRegistry;
pub use router::{RouteTarget, Router, RoutingResult};
pub use routes::{compile_routes, load_routes, CompiledRoutes, RouteMethod, RouteTable};
