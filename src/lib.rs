#![cfg_attr(feature = "no_std", no_std)]

//! A minimal reactive view helper with `no_std` support.
//!
//! A view function turns a flat [`State`] into a markup string. Every write to
//! the state re-runs the view and replaces the whole contents of a
//! [`MountPoint`] with the result, synchronously, before the write returns.
//! There is no diffing and no batching: N writes mean N full renders.
//!
//! ## Example
//!
//! ```rust
//! use sparse_view::{html, initialize, map_list, registry, State, TestMount};
//!
//! let mount = TestMount::new();
//!
//! let app = initialize(
//!     mount.clone(),
//!     |state: &State, prev: &State| {
//!         let items = state["items"].as_list().unwrap_or_default();
//!         let changed = if state["name"] != prev["name"] { "changed" } else { "" };
//!
//!         html!(
//!             "<h1>Hello ", state["name"], "</h1><p>", changed, "</p><input ",
//!             registry::bind_input(state, "name"), "><ul>",
//!             map_list(items, |item, i| format!("<li>{i}: {item}</li>")), "</ul>"
//!         )
//!     },
//!     State::new()
//!         .with("name", "world")
//!         .with("items", vec!["milk", "eggs"]),
//! )?;
//!
//! assert!(mount.contents().unwrap().starts_with("<h1>Hello world</h1><p></p>"));
//!
//! app.state.set("name", "there")?;
//!
//! assert!(mount.contents().unwrap().starts_with("<h1>Hello there</h1><p>changed</p>"));
//! assert_eq!(mount.count(), 2);
//! # Ok::<(), sparse_view::Error>(())
//! ```
//!
//! ## Inline bindings
//!
//! [`registry::bind_input`] emits
//! `value="..." oninput="sparse.state.<key> = event.target.value"`. The host
//! evaluates that handler later; [`registry::dispatch_input`] does the same
//! from Rust. Either way the write lands in the most recently initialized
//! instance.

#[cfg(feature = "no_std")]
extern crate alloc;

// Module declarations
mod app;
mod error;
mod mount;
pub mod registry;
mod state;
mod template;
mod value;

// Public re-exports
pub use app::{initialize, Sparse};
pub use error::{Error, Result};
pub use mount::{MountError, MountPoint};
pub use state::{State, StateHandle, ViewFn};
pub use template::{join, map_list, Fragment};
pub use value::Value;

#[cfg(feature = "web")]
pub use mount::DomMount;

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use mount::TestMount;
