//! String-keyed controller construction registry.
//!
//! Built once at startup, then shared read-only (`Arc<TypeRegistry>`) by
//! every request that needs a [`Dispatcher`].

use crate::dispatcher::{ActionTable, Dispatchable, Dispatcher, TableDispatch};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Zero-argument construction capability for one registered type.
pub type Factory = Box<dyn Fn() -> Box<dyn Dispatchable> + Send + Sync>;

#[derive(Default)]
pub struct TypeRegistry {
    factories: HashMap<String, Factory>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `name`, constructed with `T::default()`.
    pub fn register<T>(&mut self, name: &str) -> &mut Self
    where
        T: Dispatchable + Default,
    {
        self.register_factory(name, || Box::new(T::default()))
    }

    /// Register a plain type whose actions are described by `table`.
    pub fn register_table<T>(&mut self, name: &str, table: ActionTable<T>) -> &mut Self
    where
        T: Default + 'static,
    {
        let table = Arc::new(table);
        self.register_factory(name, move || {
            Box::new(TableDispatch::new(T::default(), Arc::clone(&table)))
        })
    }

    /// Register an arbitrary factory under `name`. A later registration under
    /// the same name replaces the earlier one.
    pub fn register_factory<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Dispatchable> + Send + Sync + 'static,
    {
        if self
            .factories
            .insert(name.to_string(), Box::new(factory))
            .is_some()
        {
            warn!(type_name = %name, "Type re-registered, previous factory replaced");
        } else {
            debug!(type_name = %name, "Type registered");
        }
        self
    }

    /// Construct a fresh default instance of `name`.
    #[must_use]
    pub fn construct(&self, name: &str) -> Option<Box<dyn Dispatchable>> {
        self.factories.get(name).map(|factory| factory())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// New per-request dispatcher for `type_name`.
    #[must_use]
    pub fn dispatcher(&self, type_name: &str) -> Dispatcher<'_> {
        Dispatcher::new(self, type_name)
    }

    /// One-shot `dispatch(type_name, action, args)`; the instance is dropped
    /// afterwards.
    #[must_use]
    pub fn dispatch(&self, type_name: &str, action: &str, args: &[String]) -> bool {
        self.dispatcher(type_name).dispatch(action, args)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
