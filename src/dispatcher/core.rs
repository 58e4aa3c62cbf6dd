//! Dispatcher core module - per-request construction, arity resolution and
//! invocation of a controller action.

use super::action::{Dispatchable, MAX_ACTION_ARGS};
use super::error::DispatchError;
use crate::registry::TypeRegistry;
use std::any::Any;
use std::fmt;
use tracing::{debug, warn};

/// Lifecycle of a [`Dispatcher`].
///
/// `Uninitialized → Constructed | ConstructionFailed`, then on invoke
/// `Invoked | MethodNotFound`. `ConstructionFailed`, `Invoked` and
/// `MethodNotFound` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Uninitialized,
    Constructed,
    ConstructionFailed,
    Invoked,
    MethodNotFound,
}

/// Constructed instance plus the arity the resolver settled on.
pub struct DispatchTarget {
    instance: Box<dyn Dispatchable>,
    selected_arity: Option<usize>,
}

impl DispatchTarget {
    #[must_use]
    pub fn instance(&self) -> &(dyn Dispatchable + 'static) {
        self.instance.as_ref()
    }

    #[must_use]
    pub fn selected_arity(&self) -> Option<usize> {
        self.selected_arity
    }
}

impl fmt::Debug for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTarget")
            .field("selected_arity", &self.selected_arity)
            .finish_non_exhaustive()
    }
}

/// A successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub action: String,
    /// Number of arguments actually bound
    pub arity: usize,
}

/// Locates and invokes an action on an instance of a named type.
///
/// A dispatcher is private to one request: it constructs its instance at most
/// once, owns it exclusively, and runs resolution and invocation inline on the
/// calling thread. Dispatching to a different type needs a new dispatcher.
///
/// ```rust
/// use actionrouter::dispatcher::{ActionTable, Dispatcher};
/// use actionrouter::registry::TypeRegistry;
///
/// #[derive(Default)]
/// struct Widget {
///     shown: Option<String>,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register_table(
///     "Widget",
///     ActionTable::<Widget>::new().action("show", 1, |w, args| {
///         w.shown = Some(args[0].clone());
///         true
///     }),
/// );
///
/// let mut dispatcher = Dispatcher::new(&registry, "Widget");
/// assert!(dispatcher.dispatch("show", &["7".to_string(), "extra".to_string()]));
/// assert_eq!(dispatcher.selected_arity(), Some(1));
/// let widget = dispatcher.object_as::<Widget>().unwrap();
/// assert_eq!(widget.shown.as_deref(), Some("7"));
/// ```
pub struct Dispatcher<'r> {
    registry: &'r TypeRegistry,
    type_name: String,
    state: DispatchState,
    target: Option<DispatchTarget>,
    last_error: Option<DispatchError>,
}

impl<'r> Dispatcher<'r> {
    #[must_use]
    pub fn new(registry: &'r TypeRegistry, type_name: impl Into<String>) -> Self {
        Self {
            registry,
            type_name: type_name.into(),
            state: DispatchState::Uninitialized,
            target: None,
            last_error: None,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Error recorded by the most recent failed call, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&DispatchError> {
        self.last_error.as_ref()
    }

    /// Arity chosen by the last successful resolution.
    #[must_use]
    pub fn selected_arity(&self) -> Option<usize> {
        self.target.as_ref().and_then(DispatchTarget::selected_arity)
    }

    /// Constructed instance and resolved arity, without constructing.
    #[must_use]
    pub fn target(&self) -> Option<&DispatchTarget> {
        self.target.as_ref()
    }

    /// The constructed instance, constructing it on first use.
    ///
    /// `None` when the type name is not registered.
    pub fn object(&mut self) -> Option<&mut (dyn Dispatchable + 'static)> {
        self.construct();
        match self.target.as_mut() {
            Some(target) => Some(target.instance.as_mut()),
            None => None,
        }
    }

    /// The constructed instance downcast to its concrete type.
    pub fn object_as<T: Any>(&mut self) -> Option<&mut T> {
        self.object().and_then(|object| object.downcast_mut::<T>())
    }

    /// Hand the owned instance to the caller, if one was constructed.
    #[must_use]
    pub fn into_object(self) -> Option<Box<dyn Dispatchable>> {
        self.target.map(|target| target.instance)
    }

    /// Invoke `action` with `args`, returning `true` on success.
    ///
    /// See [`Dispatcher::try_dispatch`] for the resolution rules.
    pub fn dispatch(&mut self, action: &str, args: &[String]) -> bool {
        self.try_dispatch(action, args).is_ok()
    }

    /// Resolve and invoke `action`.
    ///
    /// With `n = min(args.len(), MAX_ACTION_ARGS)`, arities `n, n-1, …, 0` are
    /// tried in that order and the first one the instance exposes wins: a
    /// handler may ignore trailing arguments it has no use for. The first
    /// `arity` arguments are bound positionally.
    pub fn try_dispatch(
        &mut self,
        action: &str,
        args: &[String],
    ) -> Result<Invocation, DispatchError> {
        let result = self.resolve_and_invoke(action, args);
        match &result {
            Ok(invocation) => {
                debug!(
                    type_name = %self.type_name,
                    action = %invocation.action,
                    arity = invocation.arity,
                    "Dispatch succeeded"
                );
                self.last_error = None;
            }
            Err(err) => {
                warn!(type_name = %self.type_name, action = %action, error = %err, "Dispatch failed");
                self.last_error = Some(err.clone());
            }
        }
        result
    }

    fn resolve_and_invoke(
        &mut self,
        action: &str,
        args: &[String],
    ) -> Result<Invocation, DispatchError> {
        if matches!(
            self.state,
            DispatchState::Invoked | DispatchState::MethodNotFound
        ) {
            return Err(DispatchError::AlreadyDispatched {
                type_name: self.type_name.clone(),
            });
        }

        self.construct();
        let type_name = &self.type_name;
        let Some(target) = self.target.as_mut() else {
            debug!(type_name = %type_name, "Failed to invoke, no such class");
            return Err(DispatchError::ObjectConstructionFailed {
                type_name: type_name.clone(),
            });
        };

        let considered = args.len().min(MAX_ACTION_ARGS);
        let Some(arity) = (0..=considered)
            .rev()
            .find(|&arity| target.instance.has_action(action, arity))
        else {
            debug!(type_name = %type_name, action = %action, "No such method");
            self.state = DispatchState::MethodNotFound;
            return Err(DispatchError::MethodResolutionFailed {
                type_name: type_name.clone(),
                action: action.to_string(),
                requested_arity: args.len(),
            });
        };

        debug!(type_name = %type_name, action = %action, arity, "Found method");
        target.selected_arity = Some(arity);
        self.state = DispatchState::Invoked;

        debug!("Invoke method: {type_name}#{action}");
        if target.instance.invoke_action(action, &args[..arity]) {
            Ok(Invocation {
                action: action.to_string(),
                arity,
            })
        } else {
            Err(DispatchError::InvocationFailed {
                type_name: type_name.clone(),
                action: action.to_string(),
                arity,
            })
        }
    }

    /// Construct the instance on first use; later calls reuse the cached
    /// instance or the cached failure.
    fn construct(&mut self) {
        if self.state != DispatchState::Uninitialized {
            return;
        }
        match self.registry.construct(&self.type_name) {
            Some(instance) => {
                debug!(type_name = %self.type_name, "Constructs object");
                self.target = Some(DispatchTarget {
                    instance,
                    selected_arity: None,
                });
                self.state = DispatchState::Constructed;
            }
            None => {
                debug!(type_name = %self.type_name, "No such object class");
                self.state = DispatchState::ConstructionFailed;
            }
        }
    }
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("type_name", &self.type_name)
            .field("state", &self.state)
            .field("target", &self.target)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
