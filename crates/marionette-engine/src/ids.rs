//! Typed identifiers for objects in the desktop object graph.
//!
//! Identifiers are opaque and only meaningful to the [`Desktop`] that issued
//! them. They are deliberately small `Copy` values so callers can hold on to
//! them without borrowing the desktop.
//!
//! [`Desktop`]: crate::Desktop

use std::fmt;

/// Identifies a running application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApplicationId(pub(crate) u32);

/// Identifies a window, modal window, or message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) u32);

/// Identifies a menu bar entry or a nested menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub(crate) u32);

/// Identifies a control inside a window, including list items and tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(pub(crate) u32);

impl fmt::Display for ApplicationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "application#{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "window#{}", self.0)
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "menu#{}", self.0)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "control#{}", self.0)
    }
}
