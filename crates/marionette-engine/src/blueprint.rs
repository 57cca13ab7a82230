//! Declarative descriptions of simulated programs.
//!
//! A blueprint describes what a program looks like when it runs: its windows,
//! their menus, and the control tree inside each window. Blueprints are
//! installed into a [`Desktop`] under their launch path; `launch` instantiates
//! a fresh copy of the blueprint as a running application.
//!
//! [`Desktop`]: crate::Desktop

/// Description of an installable program.
#[derive(Debug, Clone)]
pub struct ApplicationBlueprint {
    pub(crate) path: String,
    pub(crate) windows: Vec<WindowBlueprint>,
}

impl ApplicationBlueprint {
    /// Creates a program installed under `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            windows: Vec::new(),
        }
    }

    /// Adds a top-level window.
    #[must_use]
    pub fn window(mut self, window: WindowBlueprint) -> Self {
        self.windows.push(window);
        self
    }

    /// The launch path the program is installed under.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Description of a window and everything inside it.
#[derive(Debug, Clone)]
pub struct WindowBlueprint {
    pub(crate) title: String,
    pub(crate) automation_id: Option<String>,
    pub(crate) controls: Vec<ControlBlueprint>,
    pub(crate) menus: Vec<MenuBlueprint>,
    pub(crate) modals: Vec<WindowBlueprint>,
    pub(crate) message_boxes: Vec<WindowBlueprint>,
}

impl WindowBlueprint {
    /// Creates an empty window with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            automation_id: None,
            controls: Vec::new(),
            menus: Vec::new(),
            modals: Vec::new(),
            message_boxes: Vec::new(),
        }
    }

    /// Assigns an automation id used by criteria-based discovery.
    #[must_use]
    pub fn automation_id(mut self, id: impl Into<String>) -> Self {
        self.automation_id = Some(id.into());
        self
    }

    /// Adds a control to the window.
    #[must_use]
    pub fn control(mut self, control: ControlBlueprint) -> Self {
        self.controls.push(control);
        self
    }

    /// Adds a top-level menu to the window's menu bar.
    #[must_use]
    pub fn menu(mut self, menu: MenuBlueprint) -> Self {
        self.menus.push(menu);
        self
    }

    /// Adds a modal window owned by this window.
    #[must_use]
    pub fn modal(mut self, window: WindowBlueprint) -> Self {
        self.modals.push(window);
        self
    }

    /// Adds a message box owned by this window.
    #[must_use]
    pub fn message_box(mut self, window: WindowBlueprint) -> Self {
        self.message_boxes.push(window);
        self
    }
}

/// Description of a menu entry.
#[derive(Debug, Clone)]
pub struct MenuBlueprint {
    pub(crate) label: String,
    pub(crate) children: Vec<MenuBlueprint>,
}

impl MenuBlueprint {
    /// Creates a menu entry with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Adds a child entry.
    #[must_use]
    pub fn item(mut self, child: MenuBlueprint) -> Self {
        self.children.push(child);
        self
    }
}

/// Description of a single control.
#[derive(Debug, Clone)]
pub struct ControlBlueprint {
    pub(crate) automation_id: Option<String>,
    pub(crate) enabled: bool,
    pub(crate) scroll: Option<ScrollBlueprint>,
    pub(crate) kind: ControlKind,
}

impl ControlBlueprint {
    fn with_kind(automation_id: Option<String>, kind: ControlKind) -> Self {
        Self {
            automation_id,
            enabled: true,
            scroll: None,
            kind,
        }
    }

    /// A push button.
    #[must_use]
    pub fn button(automation_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::Button {
                label: label.into(),
            },
        )
    }

    /// An unchecked check box.
    #[must_use]
    pub fn check_box(automation_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::CheckBox {
                label: label.into(),
                checked: false,
            },
        )
    }

    /// An unselected radio button.
    #[must_use]
    pub fn radio_button(automation_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::RadioButton {
                label: label.into(),
                selected: false,
            },
        )
    }

    /// An editable single-line text box.
    #[must_use]
    pub fn text_box(automation_id: impl Into<String>) -> Self {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::TextBox {
                text: String::new(),
                read_only: false,
            },
        )
    }

    /// A multi-line text box.
    #[must_use]
    pub fn multiline_text_box(automation_id: impl Into<String>) -> Self {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::MultilineTextBox {
                text: String::new(),
            },
        )
    }

    /// A static label.
    #[must_use]
    pub fn label(automation_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_kind(Some(automation_id.into()), ControlKind::Label { text: text.into() })
    }

    /// A list box populated with items.
    #[must_use]
    pub fn list_box<I, S>(automation_id: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::ListBox {
                items: items.into_iter().map(ListItemBlueprint::new).collect(),
            },
        )
    }

    /// A non-editable combo box populated with items.
    #[must_use]
    pub fn combo_box<I, S>(automation_id: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::ComboBox {
                items: items.into_iter().map(ListItemBlueprint::new).collect(),
                editable: false,
            },
        )
    }

    /// A progress bar with the given bounds and current value.
    #[must_use]
    pub fn progress_bar(automation_id: impl Into<String>, value: f64, minimum: f64, maximum: f64) -> Self {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::ProgressBar {
                value,
                minimum,
                maximum,
            },
        )
    }

    /// A slider with the given bounds, current value, and small-change step.
    #[must_use]
    pub fn slider(
        automation_id: impl Into<String>,
        value: f64,
        minimum: f64,
        maximum: f64,
        step: f64,
    ) -> Self {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::Slider {
                value,
                minimum,
                maximum,
                step,
            },
        )
    }

    /// A tree populated with nodes.
    #[must_use]
    pub fn tree<I>(automation_id: impl Into<String>, nodes: I) -> Self
    where
        I: IntoIterator<Item = TreeNodeBlueprint>,
    {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::Tree {
                nodes: nodes.into_iter().collect(),
            },
        )
    }

    /// A hyperlink.
    #[must_use]
    pub fn hyperlink(automation_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(
            Some(automation_id.into()),
            ControlKind::Hyperlink {
                label: label.into(),
            },
        )
    }

    /// Replaces the control's kind payload, keeping id and flags.
    #[must_use]
    pub fn kind(mut self, kind: ControlKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the control disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Attaches scroll bars to the control.
    #[must_use]
    pub fn scrollable(mut self, scroll: ScrollBlueprint) -> Self {
        self.scroll = Some(scroll);
        self
    }
}

/// Initial state for each control kind.
#[derive(Debug, Clone)]
pub enum ControlKind {
    /// Push button.
    Button {
        /// Visible label.
        label: String,
    },
    /// Two-state check box.
    CheckBox {
        /// Visible label.
        label: String,
        /// Initial checked state.
        checked: bool,
    },
    /// Radio button.
    RadioButton {
        /// Visible label.
        label: String,
        /// Initial selected state.
        selected: bool,
    },
    /// Single-line text field.
    TextBox {
        /// Initial content.
        text: String,
        /// Whether keyboard input is rejected.
        read_only: bool,
    },
    /// Multi-line text field.
    MultilineTextBox {
        /// Initial content.
        text: String,
    },
    /// Static text.
    Label {
        /// Visible text.
        text: String,
    },
    /// List of selectable items.
    ListBox {
        /// Initial items.
        items: Vec<ListItemBlueprint>,
    },
    /// Drop-down list.
    ComboBox {
        /// Initial items.
        items: Vec<ListItemBlueprint>,
        /// Whether free text can be typed into the box.
        editable: bool,
    },
    /// Progress indicator.
    ProgressBar {
        /// Current value.
        value: f64,
        /// Lower bound.
        minimum: f64,
        /// Upper bound.
        maximum: f64,
    },
    /// Value selector.
    Slider {
        /// Current value.
        value: f64,
        /// Lower bound.
        minimum: f64,
        /// Upper bound.
        maximum: f64,
        /// Small-change increment.
        step: f64,
    },
    /// Tree of nodes.
    Tree {
        /// Root nodes.
        nodes: Vec<TreeNodeBlueprint>,
    },
    /// Clickable link.
    Hyperlink {
        /// Visible label.
        label: String,
    },
}

/// Initial state of a list entry.
#[derive(Debug, Clone)]
pub struct ListItemBlueprint {
    pub(crate) text: String,
    pub(crate) checked: bool,
    pub(crate) selected: bool,
}

impl ListItemBlueprint {
    /// Creates an unchecked, unselected entry.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
            selected: false,
        }
    }

    /// Marks the entry initially selected.
    #[must_use]
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Marks the entry initially checked.
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }
}

/// Initial state of a tree node.
#[derive(Debug, Clone)]
pub struct TreeNodeBlueprint {
    pub(crate) text: String,
    pub(crate) expanded: bool,
    pub(crate) selected: bool,
    pub(crate) children: Vec<TreeNodeBlueprint>,
}

impl TreeNodeBlueprint {
    /// Creates a collapsed, unselected node.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expanded: false,
            selected: false,
            children: Vec::new(),
        }
    }

    /// Adds a child node.
    #[must_use]
    pub fn child(mut self, node: TreeNodeBlueprint) -> Self {
        self.children.push(node);
        self
    }

    /// Marks the node initially selected.
    #[must_use]
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// Scroll bars attached to a control.
#[derive(Debug, Clone, Default)]
pub struct ScrollBlueprint {
    pub(crate) horizontal: Option<ScrollAxisBlueprint>,
    pub(crate) vertical: Option<ScrollAxisBlueprint>,
}

impl ScrollBlueprint {
    /// No scroll bars.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a horizontal scroll bar.
    #[must_use]
    pub fn horizontal(mut self, axis: ScrollAxisBlueprint) -> Self {
        self.horizontal = Some(axis);
        self
    }

    /// Attaches a vertical scroll bar.
    #[must_use]
    pub fn vertical(mut self, axis: ScrollAxisBlueprint) -> Self {
        self.vertical = Some(axis);
        self
    }
}

/// Range and position of a single scroll bar.
#[derive(Debug, Clone)]
pub struct ScrollAxisBlueprint {
    pub(crate) minimum: f64,
    pub(crate) maximum: f64,
    pub(crate) value: f64,
    pub(crate) step: f64,
}

impl ScrollAxisBlueprint {
    /// Creates a scroll bar covering `minimum..=maximum`, positioned at
    /// `minimum`, moving by `step` per scroll command.
    #[must_use]
    pub fn new(minimum: f64, maximum: f64, step: f64) -> Self {
        Self {
            minimum,
            maximum,
            value: minimum,
            step,
        }
    }
}
