//! Process-wide registry of the active instance.
//!
//! Markup produced by a render can carry inline handlers that the host
//! evaluates later, on user interaction, with no reference to any handle. Those
//! handlers reach the state through the stable name [`GLOBAL_NAME`], which
//! resolves to whatever instance was initialized last.
//!
//! Re-initializing replaces the entry. Stale markup left over from an earlier
//! instance then writes into the newest one; that is the documented behavior.

#[cfg(feature = "no_std")]
use alloc::{format, string::String};

use spin::Mutex;

use crate::{Error, Result, State, StateHandle, Value};

/// Name under which the active state is reachable from inline handlers.
pub const GLOBAL_NAME: &str = "sparse";

/// Right-hand side of every inline input handler.
const EVENT_VALUE: &str = "event.target.value";

static ACTIVE: Mutex<Option<StateHandle>> = Mutex::new(None);

/// Make `handle` the active instance, returning the one it replaces.
pub(crate) fn register(handle: &StateHandle) -> Option<StateHandle> {
    let replaced = ACTIVE.lock().replace(handle.clone());
    if replaced.is_some() {
        tracing::debug!(name = GLOBAL_NAME, "replaced active instance");
    } else {
        tracing::debug!(name = GLOBAL_NAME, "registered active instance");
    }
    replaced
}

/// The state handle of the most recently initialized instance.
pub fn active() -> Option<StateHandle> {
    ACTIVE.lock().clone()
}

/// Drop the active entry, e.g. when the host tears the app down.
pub fn clear() -> Option<StateHandle> {
    ACTIVE.lock().take()
}

/// Inline handler expression writing an input's value into `key`.
pub fn input_handler(key: &str) -> String {
    format!("{GLOBAL_NAME}.state.{key} = {EVENT_VALUE}")
}

/// Markup attributes binding an `<input>` to `key`:
/// `value="<current>" oninput="sparse.state.<key> = event.target.value"`.
///
/// The current value comes from `state`, normally the state the view was
/// called with. A missing key renders an empty value. Nothing is escaped.
///
/// ```rust
/// use sparse_view::{registry, State};
///
/// let state = State::new().with("name", "x");
/// let attrs = registry::bind_input(&state, "name");
///
/// assert_eq!(attrs, r#"value="x" oninput="sparse.state.name = event.target.value""#);
/// ```
pub fn bind_input(state: &State, key: &str) -> String {
    binding_markup(key, &state[key])
}

fn binding_markup(key: &str, current: &Value) -> String {
    format!(r#"value="{current}" oninput="{}""#, input_handler(key))
}

/// Evaluate an inline input handler the way a host would on an input event.
///
/// `handler` must have the exact shape produced by [`input_handler`]. The
/// event's value is written as a string into the *currently active* instance,
/// which re-renders before this returns.
pub fn dispatch_input(handler: &str, event_value: &str) -> Result<()> {
    let key = parse_handler(handler)
        .ok_or_else(|| Error::UnrecognizedHandler(handler.into()))?;

    // The lock is released before writing: the view may read the registry.
    let handle = active().ok_or(Error::NoActiveInstance)?;

    tracing::trace!(key, "dispatching inline input handler");
    handle.set(key, event_value)
}

fn parse_handler(handler: &str) -> Option<&str> {
    let assignment = handler
        .trim()
        .strip_prefix(GLOBAL_NAME)?
        .strip_prefix(".state.")?;
    let (key, rhs) = assignment.split_once('=')?;
    let key = key.trim();

    let valid_key = !key.is_empty() && !key.contains(char::is_whitespace);
    (valid_key && rhs.trim() == EVENT_VALUE).then_some(key)
}
