//! The flat state mapping and the reactive handle that re-renders on every write.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;
#[cfg(feature = "no_std")]
use alloc::collections::btree_map::{self, BTreeMap};
#[cfg(feature = "no_std")]
use alloc::string::String;
#[cfg(not(feature = "no_std"))]
use std::collections::btree_map::{self, BTreeMap};

use core::ops::Index;

use portable_atomic_util::Arc;
use spin::Mutex;

use crate::{registry, Error, MountPoint, Result, Value};

static NULL: Value = Value::Null;

/// A flat mapping from property name to [`Value`].
///
/// This is what a view function reads. Indexing a missing key yields
/// [`Value::Null`], which renders as the empty string.
///
/// ```rust
/// use sparse_view::{State, Value};
///
/// let state = State::new().with("name", "world").with("count", 3i64);
///
/// assert_eq!(state["name"], "world");
/// assert_eq!(state["missing"], Value::Null);
/// assert_eq!(state.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct State {
    values: BTreeMap<String, Value>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for assembling an initial state.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the one it replaced.
    ///
    /// This does not render anything: a `State` is plain data. Reactive writes
    /// go through [`StateHandle::set`].
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }
}

impl Index<&str> for State {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&NULL)
    }
}

impl<K, V> FromIterator<(K, V)> for State
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a State {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// View function signature: `(state, prev_state) -> markup`.
pub type ViewFn = dyn Fn(&State, &State) -> String + Send;

/// Committed data. Locked only long enough to snapshot, commit or read.
struct Slots {
    state: State,
    /// Shallow copy taken right before the latest committed write.
    prev_state: Option<State>,
}

/// The render side. Held for the full duration of a render pass.
struct Renderer {
    view: Box<ViewFn>,
    mount: Box<dyn MountPoint + Send>,
}

struct Shared {
    slots: Mutex<Slots>,
    renderer: Mutex<Renderer>,
}

/// Reactive handle over the state of one initialized instance.
///
/// Every [`set`](Self::set) commits the value and synchronously re-renders the
/// whole view into the mount point before returning. There is no batching:
/// N writes produce N render passes.
///
/// The handle is cheap to clone; clones refer to the same instance. Values are
/// cloned in and out, so only top-level reassignment is observed.
///
/// See [`initialize`](crate::initialize) for a complete example.
pub struct StateHandle {
    shared: Arc<Shared>,
}

impl Clone for StateHandle {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl core::fmt::Debug for StateHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateHandle")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl StateHandle {
    pub(crate) fn new(
        initial_state: State,
        view: Box<ViewFn>,
        mount: Box<dyn MountPoint + Send>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                slots: Mutex::new(Slots {
                    state: initial_state,
                    prev_state: None,
                }),
                renderer: Mutex::new(Renderer { view, mount }),
            }),
        }
    }

    /// Write `value` under `key` and re-render.
    ///
    /// 1. The current state is copied into the previous-state snapshot.
    /// 2. The value is committed.
    /// 3. The view runs with `(state, prev_state)` and its output replaces the
    ///    mount point's contents.
    ///
    /// Keys and values are never validated. A write issued from inside this
    /// instance's own view is rejected with [`Error::ReentrantWrite`] and leaves
    /// the state untouched. A mount failure is returned after the value has been
    /// committed, leaving a stale view. A panicking view propagates the same way.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();

        let Some(mut renderer) = self.shared.renderer.try_lock() else {
            tracing::warn!(key = %key, "rejected state write during render");
            return Err(Error::ReentrantWrite { key });
        };

        let (state, prev_state) = {
            let mut slots = self.shared.slots.lock();
            slots.prev_state = Some(slots.state.clone());
            slots.state.insert(key.as_str(), value);
            (slots.state.clone(), slots.prev_state.clone())
        };

        tracing::debug!(key = %key, "state write committed");

        renderer.render(&state, prev_state.as_ref().unwrap_or(&state))
    }

    /// Current value under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.shared.slots.lock().state.get(key).cloned()
    }

    /// Shallow copy of the committed state.
    pub fn snapshot(&self) -> State {
        self.shared.slots.lock().state.clone()
    }

    /// The state as it was right before the latest write, or `None` before the
    /// first write.
    pub fn prev_state(&self) -> Option<State> {
        self.shared.slots.lock().prev_state.clone()
    }

    /// Read the committed state in place.
    ///
    /// The closure must not write through this handle.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&State) -> R,
    {
        let slots = self.shared.slots.lock();
        f(&slots.state)
    }

    /// Markup attributes binding an `<input>` to `key`.
    ///
    /// See [`registry::bind_input`] for the exact shape.
    pub fn bind_input(&self, key: &str) -> String {
        self.with_state(|state| registry::bind_input(state, key))
    }

    /// Whether both handles refer to the same initialized instance.
    pub fn ptr_eq(&self, other: &StateHandle) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// The first render pass, where the previous state is the state itself.
    pub(crate) fn render_initial(&self) -> Result<()> {
        let mut renderer = self.shared.renderer.lock();
        let state = self.snapshot();
        renderer.render(&state, &state)
    }
}

impl Renderer {
    fn render(&mut self, state: &State, prev_state: &State) -> Result<()> {
        let markup = (self.view)(state, prev_state);
        tracing::trace!(bytes = markup.len(), "render pass");
        self.mount.replace_contents(markup)?;
        Ok(())
    }
}
