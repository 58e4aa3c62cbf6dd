use std::fmt;

/// Why a dispatch returned `false`.
///
/// [`super::Dispatcher::dispatch`] collapses these to a boolean;
/// [`super::Dispatcher::try_dispatch`] and [`super::Dispatcher::last_error`]
/// keep them apart for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No factory is registered under the type name
    ObjectConstructionFailed {
        type_name: String,
    },
    /// No arity in `0..=requested_arity` resolved to an action
    MethodResolutionFailed {
        type_name: String,
        action: String,
        /// Number of arguments the caller supplied
        requested_arity: usize,
    },
    /// The action was found but reported failure
    InvocationFailed {
        type_name: String,
        action: String,
        arity: usize,
    },
    /// The dispatcher already ran an invocation to completion
    AlreadyDispatched {
        type_name: String,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::ObjectConstructionFailed { type_name } => {
                write!(f, "no such object class: {type_name}")
            }
            DispatchError::MethodResolutionFailed {
                type_name,
                action,
                requested_arity,
            } => write!(
                f,
                "no such method: {type_name}#{action} with at most {requested_arity} argument(s)"
            ),
            DispatchError::InvocationFailed {
                type_name,
                action,
                arity,
            } => write!(f, "invocation failed: {type_name}#{action}/{arity}"),
            DispatchError::AlreadyDispatched { type_name } => {
                write!(f, "dispatcher for {type_name} has already invoked an action")
            }
        }
    }
}

impl std::error::Error for DispatchError {}
