//! The closed set of objects the registry can hand out.
//!
//! Handlers dispatch on the variant of the resolved object rather than on
//! open-ended runtime type inspection, which keeps the command-to-kind
//! acceptance matrix statically checkable.

use marionette_engine::{
    ApplicationId, ControlClass, ControlId, MenuId, Orientation, UiItem, WindowId,
};

use crate::registry::Handle;

/// An object addressable by a client handle.
#[derive(Debug, Clone)]
pub enum UiObject {
    /// A running application.
    Application(ApplicationId),
    /// A window, modal window, or message box.
    Window(WindowId),
    /// The menu bar of a window.
    MenuBar(WindowId),
    /// A menu entry.
    Menu(MenuId),
    /// A control inside a window, tagged with its class.
    Control {
        /// Engine identifier of the control.
        id: ControlId,
        /// The control's class, fixed at discovery time.
        class: ControlClass,
    },
    /// A scroll bar of a window or control.
    ScrollBar {
        /// The owning item.
        item: UiItem,
        /// Which of the item's scroll bars this is.
        orientation: Orientation,
    },
    /// An ordered snapshot of objects returned by an enumeration command.
    Collection(Vec<UiObject>),
}

impl UiObject {
    /// Short kind name used in log lines.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Application(_) => "application",
            Self::Window(_) => "window",
            Self::MenuBar(_) => "menu bar",
            Self::Menu(_) => "menu",
            Self::Control { class, .. } => class.as_str(),
            Self::ScrollBar { .. } => "scroll bar",
            Self::Collection(_) => "collection",
        }
    }

    /// The object as a window or control, when it is one.
    #[must_use]
    pub fn as_ui_item(&self) -> Option<UiItem> {
        match self {
            Self::Window(id) => Some(UiItem::Window(*id)),
            Self::Control { id, .. } => Some(UiItem::Control(*id)),
            _ => None,
        }
    }
}

/// The object a request resolved its handle to.
#[derive(Debug, Clone)]
pub struct Target {
    /// The handle named in the request.
    pub handle: Handle,
    /// The object the handle resolved to.
    pub object: UiObject,
}
