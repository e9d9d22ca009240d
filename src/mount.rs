//! Mount point abstraction: the region whose contents every render replaces.

#[cfg(feature = "no_std")]
use alloc::string::String;
#[cfg(all(feature = "no_std", any(test, feature = "testing")))]
use alloc::vec::Vec;
#[cfg(all(feature = "no_std", feature = "web"))]
use alloc::format;

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;
use thiserror::Error;

/// Failure raised by a host while replacing a mount point's contents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct MountError(pub String);

impl MountError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A renderable region owned by the host environment.
///
/// Implement this trait to hand rendered markup to your host (a DOM element, a
/// terminal, a file, a test buffer). The renderer calls
/// [`replace_contents`](Self::replace_contents) once per render pass with the
/// complete markup; whatever was there before is discarded.
///
/// Closures taking the markup by value implement this trait via the blanket
/// implementation and never fail.
///
/// # Example
///
/// ```rust
/// use sparse_view::{MountError, MountPoint};
///
/// struct Stdout;
///
/// impl MountPoint for Stdout {
///     fn replace_contents(&mut self, markup: String) -> Result<(), MountError> {
///         println!("{markup}");
///         Ok(())
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait MountPoint {
    /// Replace everything currently rendered in this region with `markup`.
    fn replace_contents(&mut self, markup: String) -> Result<(), MountError>;
}

impl<F> MountPoint for F
where
    F: FnMut(String),
{
    fn replace_contents(&mut self, markup: String) -> Result<(), MountError> {
        self(markup);
        Ok(())
    }
}

/// Mount point backed by a browser element, looked up by id on every render.
///
/// Holding the id rather than the element keeps the mount point `Send`, which
/// the process-wide registry needs. A missing element fails the render.
#[cfg(feature = "web")]
pub struct DomMount {
    id: String,
}

#[cfg(feature = "web")]
impl DomMount {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(feature = "web")]
impl MountPoint for DomMount {
    fn replace_contents(&mut self, markup: String) -> Result<(), MountError> {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&self.id))
            .ok_or_else(|| MountError(format!("no element with id `{}`", self.id)))?;

        element.set_inner_html(&markup);
        Ok(())
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test mount point that captures every rendered string for assertions.
///
/// Only available with the `testing` feature.
///
/// Clones share the same capture storage, so keep one clone and hand the
/// other to [`initialize`](crate::initialize).
///
/// # Example
///
/// ```rust
/// use sparse_view::{initialize, State, TestMount};
///
/// let mount = TestMount::new();
///
/// let app = initialize(
///     mount.clone(),
///     |state: &State, _prev: &State| format!("<p>{}</p>", state["count"]),
///     State::from_iter([("count", 0i64)]),
/// )
/// .unwrap();
///
/// app.state.set("count", 1i64).unwrap();
///
/// mount.with_renders(|renders| {
///     assert_eq!(renders[0], "<p>0</p>");
///     assert_eq!(renders[1], "<p>1</p>");
/// });
/// ```
pub struct TestMount {
    renders: Arc<Mutex<Vec<String>>>,
}

#[cfg(any(test, feature = "testing"))]
impl Clone for TestMount {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl MountPoint for TestMount {
    fn replace_contents(&mut self, markup: String) -> Result<(), MountError> {
        self.renders.lock().push(markup);
        Ok(())
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for TestMount {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl TestMount {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of render passes that reached this mount point.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// The markup currently "on screen": the most recent render, if any.
    pub fn contents(&self) -> Option<String> {
        self.renders.lock().last().cloned()
    }

    /// Access the captured renders with a closure.
    ///
    /// The closure receives every rendered string in order, the initial render
    /// first.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<String>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }
}
