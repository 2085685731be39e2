//! Error types for the runtime loop and the retained document.

use thiserror::Error;

use crate::tree::EventKind;

/// Errors raised while mounting or patching the retained document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The requested mount point does not exist in the document.
    #[error("mount point not found: {id}")]
    MountPointMissing { id: String },

    /// A tree is already mounted.
    #[error("document already has a mounted tree at {id}")]
    AlreadyMounted { id: String },

    /// No tree is mounted.
    #[error("no tree is mounted")]
    NotMounted,

    /// A patch addressed a node that does not exist or has the wrong kind.
    #[error("invalid patch path {path:?}: {reason}")]
    InvalidPath { path: Vec<usize>, reason: String },
}

/// Errors returned by the runtime loop.
///
/// A fault in `update` or `view` aborts the current pass only. The previous
/// state and UI stay in place and the error is handed to the caller.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The `init` producer panicked.
    #[error("init fault: {reason}")]
    InitFault {
        /// Panic payload.
        reason: String,
    },

    /// The transition function panicked.
    #[error("update fault while applying {message_debug}: {reason}")]
    UpdateFault {
        /// Debug rendering of the message being applied.
        message_debug: String,
        /// Panic payload.
        reason: String,
    },

    /// The view function panicked.
    #[error("view fault: {reason}")]
    ViewFault {
        /// Panic payload.
        reason: String,
    },

    /// The document rejected the render.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// No live element carries the requested id.
    #[error("no element with id '{id}'")]
    TargetNotFound { id: String },

    /// The element exists but has no handler for the event.
    #[error("element '{id}' has no {event} handler")]
    NoHandler { id: String, event: EventKind },

    /// The document is borrowed elsewhere (re-entrant call from a handler).
    #[error("document is busy")]
    DocumentBusy,
}

impl RuntimeError {
    /// Whether this error was caused by application code rather than the host.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::InitFault { .. } | Self::UpdateFault { .. } | Self::ViewFault { .. }
        )
    }
}
