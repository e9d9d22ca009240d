//! Error type shared by the renderer, the mount points and the registry.

#[cfg(feature = "no_std")]
use alloc::string::String;

use thiserror::Error;

use crate::mount::MountError;

/// Everything that can go wrong while driving a render pass.
///
/// Writes themselves are never validated: any key accepts any [`Value`](crate::Value).
/// Failures only come from rendering or from the process-wide registry.
#[derive(Error, Debug)]
pub enum Error {
    #[error("mount point rejected the rendered markup: {0}")]
    Mount(#[from] MountError),

    #[error("state write to `{key}` issued while the view was rendering")]
    ReentrantWrite { key: String },

    #[error("no sparse instance has been initialized")]
    NoActiveInstance,

    #[error("unrecognized inline handler: {0}")]
    UnrecognizedHandler(String),
}

pub type Result<T> = core::result::Result<T, Error>;
