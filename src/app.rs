//! Initialization entry point and the bundle it returns.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;
#[cfg(feature = "no_std")]
use alloc::string::String;

use crate::{registry, template, Fragment, MountPoint, Result, State, StateHandle};

/// What [`initialize`] hands back: the reactive state plus the string helpers.
///
/// The helpers are the free functions [`join`](crate::join),
/// [`map_list`](crate::map_list) and [`StateHandle::bind_input`], re-exposed
/// for convenience.
#[derive(Clone, Debug)]
pub struct Sparse {
    pub state: StateHandle,
}

impl Sparse {
    pub fn join<V: Fragment>(&self, parts: &[&str], values: &[V]) -> String {
        template::join(parts, values)
    }

    pub fn map_list<I, F>(&self, items: I, render: F) -> String
    where
        I: IntoIterator,
        F: FnMut(I::Item, usize) -> String,
    {
        template::map_list(items, render)
    }

    pub fn bind_input(&self, key: &str) -> String {
        self.state.bind_input(key)
    }
}

/// Mount a view and render it once.
///
/// - Wraps `initial_state` in a [`StateHandle`]; every later
///   [`set`](StateHandle::set) re-renders synchronously.
/// - Renders immediately. The first render sees no change: the previous state
///   passed to `view` is the initial state itself.
/// - Registers the handle as the process-wide active instance (see
///   [`registry`]), replacing any earlier one.
///
/// `mount` is owned from here on: its contents are rewritten wholesale on
/// every render pass. If the first render fails the error is returned and the
/// registry is left untouched.
///
/// # Example
///
/// ```rust
/// use sparse_view::{initialize, registry, State};
///
/// let app = initialize(
///     |markup: String| println!("{markup}"),
///     |state: &State, _prev: &State| {
///         format!("<h1>Hello {}</h1><input {}>", state["name"], registry::bind_input(state, "name"))
///     },
///     State::new().with("name", "world"),
/// )?;
///
/// app.state.set("name", "there")?;
///
/// assert_eq!(app.state.get("name").unwrap(), "there");
/// # Ok::<(), sparse_view::Error>(())
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(keys = initial_state.len()))]
pub fn initialize<M, V>(mount: M, view: V, initial_state: State) -> Result<Sparse>
where
    M: MountPoint + Send + 'static,
    V: Fn(&State, &State) -> String + Send + 'static,
{
    let state = StateHandle::new(initial_state, Box::new(view), Box::new(mount));
    state.render_initial()?;

    registry::register(&state);
    tracing::debug!("mounted");

    Ok(Sparse { state })
}
