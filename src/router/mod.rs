//! # Router Module
//!
//! Matches incoming `(method, path)` pairs against the routing table compiled
//! by [`crate::routes`].
//!
//! ## Matching
//!
//! - Entries are tried in configuration order; the first structural match wins
//! - A plain entry matches on exact path equality
//! - A `:params` entry matches when the path starts with its literal prefix;
//!   the remainder is split on `/` into positional params
//! - If the matched entry's method constraint fails, the result is
//!   [`RoutingResult::Rejected`] and no later entry is evaluated
//!
//! ## Example
//!
//! ```rust
//! use actionrouter::router::{Router, RoutingResult};
//! use http::Method;
//!
//! let (router, compiled) = Router::from_config(
//!     "get /about home#about\n\
//!      post /users:params user#update\n",
//! );
//! assert!(compiled.is_clean());
//!
//! let about = router.route(&Method::GET, "/about/");
//! assert_eq!(&*about.target().unwrap().action, "about");
//!
//! assert!(matches!(
//!     router.route(&Method::GET, "/users/42"),
//!     RoutingResult::Rejected { .. }
//! ));
//! assert_eq!(router.route(&Method::GET, "/nope"), RoutingResult::NotFound);
//! ```

mod core;
#[cfg(test)]
mod performance_tests;

pub use core::{ParamVec, RouteTarget, Router, RoutingResult, MAX_INLINE_PARAMS};
