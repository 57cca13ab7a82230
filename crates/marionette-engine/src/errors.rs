//! Engine failure type.
//!
//! Every operation on the desktop graph is synchronous and can fail with an
//! [`EngineError`]. Callers that expose the engine over a protocol treat
//! these as unclassified failures unless they recognise and re-raise them.

use thiserror::Error;

use crate::object::{ControlClass, Orientation, SearchCriteria};

/// Failures surfaced by desktop operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No program is installed under the requested launch path.
    #[error("no installed application at '{path}'")]
    LaunchFailed {
        /// The requested launch path.
        path: String,
    },

    /// No running process carries the requested process id.
    #[error("no running process with id {pid}")]
    ProcessNotFound {
        /// The requested process id.
        pid: u32,
    },

    /// The application has been closed.
    #[error("application is no longer running")]
    ApplicationStopped,

    /// No open window carries the requested title.
    #[error("no window titled '{title}'")]
    WindowNotFound {
        /// The requested title.
        title: String,
    },

    /// The window has been closed and no longer accepts operations.
    #[error("window '{title}' is closed")]
    WindowClosed {
        /// Title of the closed window.
        title: String,
    },

    /// No open modal window matches the criteria.
    #[error("no modal window matching {criteria}")]
    ModalWindowNotFound {
        /// The search criteria.
        criteria: SearchCriteria,
    },

    /// No message box carries the requested title.
    #[error("no message box titled '{title}'")]
    MessageBoxNotFound {
        /// The requested title.
        title: String,
    },

    /// No menu entry carries the requested label.
    #[error("no menu item labelled '{label}'")]
    MenuItemNotFound {
        /// The requested label.
        label: String,
    },

    /// No control of the requested class matches the criteria.
    #[error("no {class} matching {criteria}")]
    ControlNotFound {
        /// The requested control class.
        class: ControlClass,
        /// The search criteria.
        criteria: SearchCriteria,
    },

    /// No list entry or tree node carries the requested text.
    #[error("no item with text '{text}'")]
    ItemNotFound {
        /// The requested text.
        text: String,
    },

    /// The item has no scroll bar in the requested orientation.
    #[error("the item has no {orientation} scroll bar")]
    NotScrollable {
        /// The requested orientation.
        orientation: Orientation,
    },

    /// The control's class does not support the operation.
    #[error("'{operation}' is not supported by a {class}")]
    UnsupportedOperation {
        /// Name of the attempted operation.
        operation: &'static str,
        /// Class of the control it was attempted on.
        class: ControlClass,
    },

    /// The identifier does not refer to a live object. Indicates a bookkeeping
    /// bug in the caller rather than a recoverable condition.
    #[error("stale object reference")]
    StaleReference,
}
