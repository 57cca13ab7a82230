//! Shared vocabulary for addressing objects in the desktop graph.

use std::fmt;

use crate::ids::{ControlId, WindowId};

/// The closed set of control kinds the engine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlClass {
    /// Push button.
    Button,
    /// Two-state check box.
    CheckBox,
    /// Mutually exclusive radio button.
    RadioButton,
    /// Single-line editable text field.
    TextBox,
    /// Multi-line editable text field.
    MultilineTextBox,
    /// Static text.
    Label,
    /// List of selectable items.
    ListBox,
    /// Drop-down list, optionally editable.
    ComboBox,
    /// Entry inside a list box or combo box.
    ListItem,
    /// Read-only progress indicator.
    ProgressBar,
    /// Draggable value selector.
    Slider,
    /// Hierarchical tree of nodes.
    Tree,
    /// Node inside a tree.
    TreeNode,
    /// Clickable link.
    Hyperlink,
}

impl ControlClass {
    /// Human-readable name used in messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::CheckBox => "check box",
            Self::RadioButton => "radio button",
            Self::TextBox => "text box",
            Self::MultilineTextBox => "multiline text box",
            Self::Label => "label",
            Self::ListBox => "list box",
            Self::ComboBox => "combo box",
            Self::ListItem => "list item",
            Self::ProgressBar => "progress bar",
            Self::Slider => "slider",
            Self::Tree => "tree",
            Self::TreeNode => "tree node",
            Self::Hyperlink => "hyperlink",
        }
    }
}

impl fmt::Display for ControlClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A window or a control: the targets that accept pointer, keyboard, and
/// visibility operations uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiItem {
    /// A top-level, modal, or message-box window.
    Window(WindowId),
    /// A control inside a window.
    Control(ControlId),
}

/// Scroll bar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left/right scroll bar.
    Horizontal,
    /// Up/down scroll bar.
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

/// How a discovery operation identifies the object it is looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    /// Match on the identifier assigned by the application's author.
    AutomationId(String),
    /// Match on the visible text of the object.
    Text(String),
}

impl fmt::Display for SearchCriteria {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutomationId(value) => write!(formatter, "automation id '{value}'"),
            Self::Text(value) => write!(formatter, "text '{value}'"),
        }
    }
}
