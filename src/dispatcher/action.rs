use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// Only the first `MAX_ACTION_ARGS` positional arguments are ever considered
/// for arity resolution and binding; the rest are ignored.
pub const MAX_ACTION_ARGS: usize = 10;

/// An object exposing named actions that take positional string arguments.
///
/// Implement it with the [`crate::actions`] attribute on an inherent `impl`
/// block, or wrap a plain type with an [`ActionTable`] through
/// [`crate::registry::TypeRegistry::register_table`].
pub trait Dispatchable: Any {
    /// Whether an action `name` taking exactly `arity` string arguments exists.
    fn has_action(&self, name: &str, arity: usize) -> bool;

    /// Call action `name` with `args` bound positionally. `args.len()` selects
    /// the overload. Returns `false` when no such action exists or the action
    /// reported failure.
    fn invoke_action(&mut self, name: &str, args: &[String]) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Dispatchable {
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[must_use]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Converts an action's return value into the call-success flag.
pub trait ActionOutcome {
    fn succeeded(self) -> bool;
}

impl ActionOutcome for () {
    fn succeeded(self) -> bool {
        true
    }
}

impl ActionOutcome for bool {
    fn succeeded(self) -> bool {
        self
    }
}

impl<T, E> ActionOutcome for Result<T, E> {
    fn succeeded(self) -> bool {
        self.is_ok()
    }
}

/// Callable stored in an [`ActionTable`]; receives exactly `arity` arguments.
pub type ActionFn<T> = fn(&mut T, &[String]) -> bool;

type ActionSlots<T> = [Option<ActionFn<T>>; MAX_ACTION_ARGS + 1];

/// Explicit `(action name, arity) -> callable` table for one controller type.
///
/// ```rust
/// use actionrouter::dispatcher::ActionTable;
///
/// #[derive(Default)]
/// struct Widget {
///     shown: Option<String>,
/// }
///
/// let table = ActionTable::<Widget>::new()
///     .action("index", 0, |_, _| true)
///     .action("show", 1, |w, args| {
///         w.shown = Some(args[0].clone());
///         true
///     });
/// assert!(table.has("show", 1));
/// assert!(!table.has("show", 2));
/// ```
pub struct ActionTable<T> {
    actions: HashMap<String, ActionSlots<T>>,
}

impl<T> ActionTable<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register `f` as action `name` taking `arity` arguments.
    ///
    /// Registrations above [`MAX_ACTION_ARGS`] can never be resolved and are
    /// dropped with an error log.
    #[must_use]
    pub fn action(mut self, name: impl Into<String>, arity: usize, f: ActionFn<T>) -> Self {
        let name = name.into();
        if arity > MAX_ACTION_ARGS {
            error!(
                action = %name,
                arity,
                max = MAX_ACTION_ARGS,
                "Action arity exceeds the argument cap, registration ignored"
            );
            return self;
        }
        let slots = self
            .actions
            .entry(name)
            .or_insert([None; MAX_ACTION_ARGS + 1]);
        slots[arity] = Some(f);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str, arity: usize) -> Option<ActionFn<T>> {
        self.actions
            .get(name)
            .and_then(|slots| slots.get(arity).copied().flatten())
    }

    #[must_use]
    pub fn has(&self, name: &str, arity: usize) -> bool {
        self.get(name, arity).is_some()
    }

    /// Number of registered `(name, arity)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions
            .values()
            .map(|slots| slots.iter().filter(|s| s.is_some()).count())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for ActionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ActionTable<T> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
        }
    }
}

impl<T> fmt::Debug for ActionTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut signatures: Vec<String> = self
            .actions
            .iter()
            .flat_map(|(name, slots)| {
                slots
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| slot.is_some())
                    .map(move |(arity, _)| format!("{name}/{arity}"))
            })
            .collect();
        signatures.sort();
        f.debug_struct("ActionTable")
            .field("actions", &signatures)
            .finish()
    }
}

/// A plain value paired with the [`ActionTable`] describing its actions.
pub(crate) struct TableDispatch<T> {
    inner: T,
    table: Arc<ActionTable<T>>,
}

impl<T> TableDispatch<T> {
    pub(crate) fn new(inner: T, table: Arc<ActionTable<T>>) -> Self {
        Self { inner, table }
    }
}

impl<T: 'static> Dispatchable for TableDispatch<T> {
    fn has_action(&self, name: &str, arity: usize) -> bool {
        self.table.has(name, arity)
    }

    fn invoke_action(&mut self, name: &str, args: &[String]) -> bool {
        match self.table.get(name, args.len()) {
            Some(action) => action(&mut self.inner, args),
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        &self.inner
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.inner
    }
}
