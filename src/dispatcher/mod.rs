//! # Dispatcher Module
//!
//! Locates and invokes a controller action by name and argument count,
//! without static knowledge of the controller type.
//!
//! ## Overview
//!
//! - A [`crate::registry::TypeRegistry`] maps type names to zero-argument
//!   factories producing [`Dispatchable`] instances
//! - A [`Dispatcher`] constructs one instance on first use and owns it
//! - Actions are looked up by `(name, arity)` in a table that is either
//!   generated by [`crate::actions`] or registered as an [`ActionTable`]
//! - Arity search tries the largest arity not exceeding the number of
//!   supplied arguments (capped at [`MAX_ACTION_ARGS`]) and walks down to 0
//!
//! ## Controller Example
//!
//! ```rust
//! use actionrouter::actions;
//! use actionrouter::dispatcher::Dispatcher;
//! use actionrouter::registry::TypeRegistry;
//!
//! #[derive(Default)]
//! struct UserController {
//!     rendered: Vec<String>,
//! }
//!
//! #[actions]
//! impl UserController {
//!     pub fn index(&mut self) {
//!         self.rendered.push("index".to_string());
//!     }
//!
//!     pub fn show(&mut self, id: &str) {
//!         self.rendered.push(format!("show {id}"));
//!     }
//!
//!     pub fn edit(&mut self, id: String, section: String) -> bool {
//!         self.rendered.push(format!("edit {id} {section}"));
//!         true
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<UserController>("usercontroller");
//!
//! let mut dispatcher = Dispatcher::new(&registry, "usercontroller");
//! assert!(dispatcher.dispatch("show", &["42".to_string(), "extra".to_string()]));
//! let controller = dispatcher.object_as::<UserController>().unwrap();
//! assert_eq!(controller.rendered, vec!["show 42"]);
//! ```
//!
//! ## Error Handling
//!
//! `dispatch` returns a boolean; `try_dispatch` returns a [`DispatchError`]
//! telling construction, resolution and invocation failures apart.

mod action;
mod core;
mod error;

pub(crate) use action::TableDispatch;
pub use action::{ActionFn, ActionOutcome, ActionTable, Dispatchable, MAX_ACTION_ARGS};
pub use core::{DispatchState, DispatchTarget, Dispatcher, Invocation};
pub use error::DispatchError;
