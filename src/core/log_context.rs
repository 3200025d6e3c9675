//! Scoped correlation-id context
//!
//! This module provides:
//! - `TraceContext`: the per-thread stack of active unit-of-work scopes
//! - `ContextGuard`: RAII guard closing a scope when dropped
//!
//! A scope stands for one unit of work (for example one request handled on
//! this thread). While it is open its correlation id can be read and replaced;
//! outside any scope there is no id and writes are ignored.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

/// One open scope; `generation` is unique per thread
struct Scope {
    generation: u64,
    trace_id: Option<String>,
}

thread_local! {
    static SCOPES: RefCell<Vec<Scope>> = const { RefCell::new(Vec::new()) };
    static NEXT_GENERATION: Cell<u64> = const { Cell::new(0) };
}

/// Access to the correlation id of the innermost open scope on this thread
///
/// # Example
///
/// ```
/// use rust_multisink_logger::TraceContext;
///
/// assert_eq!(TraceContext::current(), None);
/// {
///     let _guard = TraceContext::enter("req-42");
///     assert_eq!(TraceContext::current().as_deref(), Some("req-42"));
/// }
/// assert_eq!(TraceContext::current(), None);
/// ```
pub struct TraceContext;

impl TraceContext {
    /// Open a scope carrying `trace_id`
    #[must_use = "the scope closes as soon as the guard is dropped"]
    pub fn enter(trace_id: impl Into<String>) -> ContextGuard {
        Self::push(Some(trace_id.into()))
    }

    /// Open a scope whose id will be assigned later
    #[must_use = "the scope closes as soon as the guard is dropped"]
    pub fn enter_empty() -> ContextGuard {
        Self::push(None)
    }

    /// Whether any scope is open on this thread
    pub fn is_active() -> bool {
        SCOPES.with(|scopes| !scopes.borrow().is_empty())
    }

    /// Correlation id of the innermost scope, if any
    pub fn current() -> Option<String> {
        SCOPES.with(|scopes| scopes.borrow().last().and_then(|s| s.trace_id.clone()))
    }

    /// Replace the innermost scope's id; returns `false` when no scope is open
    pub fn set_current(trace_id: Option<String>) -> bool {
        SCOPES.with(|scopes| match scopes.borrow_mut().last_mut() {
            Some(scope) => {
                scope.trace_id = trace_id;
                true
            }
            None => false,
        })
    }

    fn push(trace_id: Option<String>) -> ContextGuard {
        let generation = NEXT_GENERATION.with(|next| {
            let generation = next.get();
            next.set(generation + 1);
            generation
        });
        let depth = SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            scopes.push(Scope {
                generation,
                trace_id,
            });
            scopes.len()
        });
        ContextGuard {
            depth,
            generation,
            _not_send: PhantomData,
        }
    }
}

/// RAII guard for one [`TraceContext`] scope
///
/// Tied to the thread that opened it. Dropping it closes its scope and any
/// scope still open inside it; a guard whose scope was already closed by an
/// outer guard does nothing.
pub struct ContextGuard {
    depth: usize,
    generation: u64,
    _not_send: PhantomData<*const ()>,
}

impl ContextGuard {
    /// Nesting depth of this scope, starting at 1
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            let index = self.depth - 1;
            if scopes.get(index).map(|s| s.generation) == Some(self.generation) {
                scopes.truncate(index);
            }
        });
    }
}
