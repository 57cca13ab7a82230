//! In-process simulated desktop.
//!
//! The desktop owns the whole object graph: installed programs, running
//! applications, their windows, menus, and controls. Programs are described
//! by [`ApplicationBlueprint`]s installed under a launch path; `launch`
//! instantiates a fresh copy of the blueprint, and `attach` binds to an
//! application that is already running.
//!
//! Every operation is synchronous and settles before it returns, so the
//! wait-style operations (`wait_while_application_busy`,
//! `wait_while_window_busy`) succeed immediately once the target is live.
//!
//! Identifiers handed out by one desktop are meaningless to another. The
//! desktop never reclaims identifiers: closed windows and stopped
//! applications stay in the graph so stale references fail loudly instead of
//! aliasing a newer object.

use std::collections::HashMap;

use tracing::debug;

use crate::blueprint::{
    ApplicationBlueprint, ControlBlueprint, ControlKind, ListItemBlueprint, MenuBlueprint,
    ScrollAxisBlueprint, ScrollBlueprint, TreeNodeBlueprint, WindowBlueprint,
};
use crate::errors::EngineError;
use crate::ids::{ApplicationId, ControlId, MenuId, WindowId};
use crate::object::{ControlClass, Orientation, SearchCriteria, UiItem};

const DESKTOP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::desktop");

/// The simulated desktop session.
#[derive(Debug)]
pub struct Desktop {
    programs: HashMap<String, ApplicationBlueprint>,
    applications: HashMap<ApplicationId, ApplicationState>,
    windows: HashMap<WindowId, WindowState>,
    menus: HashMap<MenuId, MenuState>,
    controls: HashMap<ControlId, ControlState>,
    focused: Option<UiItem>,
    next_object: u32,
    next_pid: u32,
}

#[derive(Debug)]
struct ApplicationState {
    path: String,
    pid: u32,
    windows: Vec<WindowId>,
    running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowRole {
    Main,
    Modal,
    MessageBox,
}

#[derive(Debug)]
struct WindowState {
    application: ApplicationId,
    title: String,
    automation_id: Option<String>,
    role: WindowRole,
    controls: Vec<ControlId>,
    menus: Vec<MenuId>,
    modals: Vec<WindowId>,
    message_boxes: Vec<WindowId>,
    open: bool,
}

#[derive(Debug)]
struct MenuState {
    label: String,
    children: Vec<MenuId>,
}

#[derive(Debug)]
struct ControlState {
    window: WindowId,
    parent: Option<ControlId>,
    automation_id: Option<String>,
    enabled: bool,
    clicks: u32,
    scroll: Option<ScrollState>,
    data: ControlData,
}

#[derive(Debug)]
struct ScrollState {
    horizontal: Option<ScrollAxis>,
    vertical: Option<ScrollAxis>,
}

#[derive(Debug)]
struct ScrollAxis {
    minimum: f64,
    maximum: f64,
    value: f64,
    step: f64,
}

impl ScrollAxis {
    fn scrollable(&self) -> bool {
        self.maximum > self.minimum
    }
}

#[derive(Debug)]
enum ControlData {
    Button { label: String, toggled: bool },
    CheckBox { label: String, checked: bool },
    RadioButton { label: String, selected: bool },
    TextBox { text: String, read_only: bool },
    MultilineTextBox { text: String },
    Label { text: String },
    ListBox { items: Vec<ControlId> },
    ComboBox { items: Vec<ControlId>, editable: bool },
    ListItem { text: String, checked: bool, selected: bool },
    ProgressBar { value: f64, minimum: f64, maximum: f64 },
    Slider { value: f64, minimum: f64, maximum: f64, step: f64 },
    Tree { nodes: Vec<ControlId> },
    TreeNode { text: String, expanded: bool, selected: bool, children: Vec<ControlId> },
    Hyperlink { label: String },
}

impl ControlData {
    fn class(&self) -> ControlClass {
        match self {
            Self::Button { .. } => ControlClass::Button,
            Self::CheckBox { .. } => ControlClass::CheckBox,
            Self::RadioButton { .. } => ControlClass::RadioButton,
            Self::TextBox { .. } => ControlClass::TextBox,
            Self::MultilineTextBox { .. } => ControlClass::MultilineTextBox,
            Self::Label { .. } => ControlClass::Label,
            Self::ListBox { .. } => ControlClass::ListBox,
            Self::ComboBox { .. } => ControlClass::ComboBox,
            Self::ListItem { .. } => ControlClass::ListItem,
            Self::ProgressBar { .. } => ControlClass::ProgressBar,
            Self::Slider { .. } => ControlClass::Slider,
            Self::Tree { .. } => ControlClass::Tree,
            Self::TreeNode { .. } => ControlClass::TreeNode,
            Self::Hyperlink { .. } => ControlClass::Hyperlink,
        }
    }

    fn visible_text(&self) -> Option<&str> {
        match self {
            Self::Button { label, .. }
            | Self::CheckBox { label, .. }
            | Self::RadioButton { label, .. }
            | Self::Hyperlink { label } => Some(label),
            Self::TextBox { text, .. }
            | Self::MultilineTextBox { text }
            | Self::Label { text }
            | Self::ListItem { text, .. }
            | Self::TreeNode { text, .. } => Some(text),
            Self::ListBox { .. }
            | Self::ComboBox { .. }
            | Self::ProgressBar { .. }
            | Self::Slider { .. }
            | Self::Tree { .. } => None,
        }
    }
}

impl Desktop {
    /// Creates an empty desktop with nothing installed and nothing running.
    #[must_use]
    pub fn new() -> Self {
        Self {
            programs: HashMap::new(),
            applications: HashMap::new(),
            windows: HashMap::new(),
            menus: HashMap::new(),
            controls: HashMap::new(),
            focused: None,
            next_object: 1,
            next_pid: 1000,
        }
    }

    /// Installs a program so `launch` can instantiate it by path.
    ///
    /// Installing a second program under the same path replaces the first.
    pub fn install(&mut self, blueprint: ApplicationBlueprint) {
        self.programs.insert(blueprint.path.clone(), blueprint);
    }

    /// Launches the program installed under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LaunchFailed`] when no program is installed
    /// under the path.
    pub fn launch(&mut self, path: &str) -> Result<ApplicationId, EngineError> {
        let blueprint = self
            .programs
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::LaunchFailed {
                path: path.to_owned(),
            })?;
        let application = self.instantiate_application(blueprint);
        debug!(
            target: DESKTOP_TARGET,
            path,
            %application,
            "launched application"
        );
        Ok(application)
    }

    /// Attaches to the running application with the given process id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ProcessNotFound`] when no running application
    /// carries the process id.
    pub fn attach(&mut self, pid: u32) -> Result<ApplicationId, EngineError> {
        self.applications
            .iter()
            .find(|(_, state)| state.running && state.pid == pid)
            .map(|(id, _)| *id)
            .ok_or(EngineError::ProcessNotFound { pid })
    }

    /// Process id of a running application.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn process_id(&self, application: ApplicationId) -> Result<u32, EngineError> {
        Ok(self.application(application)?.pid)
    }

    /// Whether the application is still running.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn is_running(&self, application: ApplicationId) -> Result<bool, EngineError> {
        Ok(self.application(application)?.running)
    }

    /// Launch path the application was started from.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn application_path(&self, application: ApplicationId) -> Result<&str, EngineError> {
        Ok(&self.application(application)?.path)
    }

    /// Stops the application and closes all of its windows.
    ///
    /// # Errors
    ///
    /// Fails when the application has already been stopped.
    pub fn close_application(&mut self, application: ApplicationId) -> Result<(), EngineError> {
        let windows = {
            let state = self.running_application_mut(application)?;
            state.running = false;
            state.windows.clone()
        };
        for window in windows {
            if let Some(state) = self.windows.get_mut(&window) {
                state.open = false;
            }
        }
        debug!(target: DESKTOP_TARGET, %application, "closed application");
        Ok(())
    }

    /// Blocks until the application has settled. The simulated desktop
    /// settles synchronously, so this returns as soon as the target is live.
    ///
    /// # Errors
    ///
    /// Fails when the application has been stopped.
    pub fn wait_while_application_busy(
        &mut self,
        application: ApplicationId,
    ) -> Result<(), EngineError> {
        self.running_application_mut(application).map(|_| ())
    }

    /// Finds an open window of the application by exact title.
    ///
    /// # Errors
    ///
    /// Fails when the application has stopped or no open window matches.
    pub fn find_window(
        &self,
        application: ApplicationId,
        title: &str,
    ) -> Result<WindowId, EngineError> {
        let state = self.application(application)?;
        if !state.running {
            return Err(EngineError::ApplicationStopped);
        }
        state
            .windows
            .iter()
            .copied()
            .find(|id| {
                self.windows
                    .get(id)
                    .is_some_and(|window| window.open && window.title == title)
            })
            .ok_or_else(|| EngineError::WindowNotFound {
                title: title.to_owned(),
            })
    }

    /// Title of an open window.
    ///
    /// # Errors
    ///
    /// Fails when the window has been closed.
    pub fn window_title(&self, window: WindowId) -> Result<String, EngineError> {
        Ok(self.open_window(window)?.title.clone())
    }

    /// Closes the window along with its modal windows and message boxes.
    ///
    /// # Errors
    ///
    /// Fails when the window has already been closed.
    pub fn close_window(&mut self, window: WindowId) -> Result<(), EngineError> {
        let (title, mut to_close) = {
            let state = self.open_window(window)?;
            let mut owned = vec![window];
            owned.extend(state.modals.iter().copied());
            owned.extend(state.message_boxes.iter().copied());
            (state.title.clone(), owned)
        };
        while let Some(id) = to_close.pop() {
            if let Some(state) = self.windows.get_mut(&id) {
                state.open = false;
            }
        }
        debug!(target: DESKTOP_TARGET, %window, title, "closed window");
        Ok(())
    }

    /// Blocks until the window has settled; see
    /// [`wait_while_application_busy`](Self::wait_while_application_busy).
    ///
    /// # Errors
    ///
    /// Fails when the window has been closed.
    pub fn wait_while_window_busy(&mut self, window: WindowId) -> Result<(), EngineError> {
        self.open_window(window).map(|_| ())
    }

    /// Finds the open modal window matching the criteria.
    ///
    /// # Errors
    ///
    /// Fails when the owning window is closed or no modal window matches.
    pub fn modal_window(
        &self,
        window: WindowId,
        criteria: &SearchCriteria,
    ) -> Result<WindowId, EngineError> {
        self.modal_windows(window)?
            .into_iter()
            .find(|id| {
                self.windows.get(id).is_some_and(|modal| match criteria {
                    SearchCriteria::AutomationId(value) => {
                        modal.automation_id.as_deref() == Some(value)
                    }
                    SearchCriteria::Text(value) => modal.title == *value,
                })
            })
            .ok_or_else(|| EngineError::ModalWindowNotFound {
                criteria: criteria.clone(),
            })
    }

    /// All open modal windows owned by the window.
    ///
    /// # Errors
    ///
    /// Fails when the owning window is closed.
    pub fn modal_windows(&self, window: WindowId) -> Result<Vec<WindowId>, EngineError> {
        let state = self.open_window(window)?;
        Ok(state
            .modals
            .iter()
            .copied()
            .filter(|id| self.windows.get(id).is_some_and(|modal| modal.open))
            .collect())
    }

    /// Finds the open message box with the given title.
    ///
    /// # Errors
    ///
    /// Fails when the owning window is closed or no message box matches.
    pub fn message_box(&self, window: WindowId, title: &str) -> Result<WindowId, EngineError> {
        let state = self.open_window(window)?;
        state
            .message_boxes
            .iter()
            .copied()
            .find(|id| {
                self.windows
                    .get(id)
                    .is_some_and(|found| found.open && found.title == title)
            })
            .ok_or_else(|| EngineError::MessageBoxNotFound {
                title: title.to_owned(),
            })
    }

    /// Whether the window has a menu bar.
    ///
    /// # Errors
    ///
    /// Fails when the window has been closed.
    pub fn has_menu_bar(&self, window: WindowId) -> Result<bool, EngineError> {
        Ok(!self.open_window(window)?.menus.is_empty())
    }

    /// Finds a top-level menu entry by label.
    ///
    /// # Errors
    ///
    /// Fails when the window is closed or no entry matches.
    pub fn menu_item(&self, window: WindowId, label: &str) -> Result<MenuId, EngineError> {
        let state = self.open_window(window)?;
        self.find_menu(&state.menus, label)
    }

    /// Finds a child entry of a menu by label.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale or no child matches.
    pub fn submenu(&self, menu: MenuId, label: &str) -> Result<MenuId, EngineError> {
        let state = self.menu(menu)?;
        self.find_menu(&state.children, label)
    }

    /// Child entries of a menu, in declaration order.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn menu_children(&self, menu: MenuId) -> Result<Vec<MenuId>, EngineError> {
        Ok(self.menu(menu)?.children.clone())
    }

    /// Label of a menu entry.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn menu_label(&self, menu: MenuId) -> Result<String, EngineError> {
        Ok(self.menu(menu)?.label.clone())
    }

    /// Finds a top-level control of the window by class and criteria.
    ///
    /// # Errors
    ///
    /// Fails when the window is closed or no control matches.
    pub fn find_control(
        &self,
        window: WindowId,
        class: ControlClass,
        criteria: &SearchCriteria,
    ) -> Result<ControlId, EngineError> {
        let state = self.open_window(window)?;
        state
            .controls
            .iter()
            .copied()
            .find(|id| {
                self.controls.get(id).is_some_and(|control| {
                    control.data.class() == class
                        && match criteria {
                            SearchCriteria::AutomationId(value) => {
                                control.automation_id.as_deref() == Some(value)
                            }
                            SearchCriteria::Text(value) => {
                                control.data.visible_text() == Some(value)
                            }
                        }
                })
            })
            .ok_or_else(|| EngineError::ControlNotFound {
                class,
                criteria: criteria.clone(),
            })
    }

    /// Class of a control.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn control_class(&self, control: ControlId) -> Result<ControlClass, EngineError> {
        Ok(self.control(control)?.data.class())
    }

    /// Clicks the item, moving focus to it.
    ///
    /// # Errors
    ///
    /// Fails when the item's window has been closed.
    pub fn click(&mut self, item: UiItem) -> Result<(), EngineError> {
        self.ensure_live(item)?;
        self.focused = Some(item);
        if let UiItem::Control(id) = item {
            let class = {
                let control = self.control_mut(id)?;
                control.clicks += 1;
                control.data.class()
            };
            match class {
                ControlClass::CheckBox => {
                    if let ControlData::CheckBox { checked, .. } = &mut self.control_mut(id)?.data {
                        *checked = !*checked;
                    }
                }
                ControlClass::RadioButton | ControlClass::ListItem => self.select_item(id)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Right-clicks the item, moving focus to it.
    ///
    /// # Errors
    ///
    /// Fails when the item's window has been closed.
    pub fn right_click(&mut self, item: UiItem) -> Result<(), EngineError> {
        self.ensure_live(item)?;
        self.focused = Some(item);
        if let UiItem::Control(id) = item {
            self.control_mut(id)?.clicks += 1;
        }
        Ok(())
    }

    /// Double-clicks the item.
    ///
    /// # Errors
    ///
    /// Fails when the item's window has been closed.
    pub fn double_click(&mut self, item: UiItem) -> Result<(), EngineError> {
        self.click(item)?;
        self.click(item)
    }

    /// Types `text` into the item. Keystrokes land in editable text fields
    /// and are discarded by every other item kind, matching how a real
    /// desktop swallows typing aimed at a button.
    ///
    /// # Errors
    ///
    /// Fails when the item's window has been closed.
    pub fn enter_text(&mut self, item: UiItem, text: &str) -> Result<(), EngineError> {
        self.ensure_live(item)?;
        if let UiItem::Control(id) = item {
            match &mut self.control_mut(id)?.data {
                ControlData::TextBox {
                    text: current,
                    read_only: false,
                } => current.push_str(text),
                ControlData::MultilineTextBox { text: current } => current.push_str(text),
                _ => {}
            }
        }
        Ok(())
    }

    /// Moves keyboard focus to the item.
    ///
    /// # Errors
    ///
    /// Fails when the item's window has been closed.
    pub fn focus(&mut self, item: UiItem) -> Result<(), EngineError> {
        self.ensure_live(item)?;
        self.focused = Some(item);
        Ok(())
    }

    /// Whether the item currently holds keyboard focus.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn is_focused(&self, item: UiItem) -> Result<bool, EngineError> {
        self.ensure_exists(item)?;
        Ok(self.focused == Some(item))
    }

    /// Whether the item accepts input.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn is_enabled(&self, item: UiItem) -> Result<bool, EngineError> {
        match item {
            UiItem::Window(id) => Ok(self.window(id)?.open),
            UiItem::Control(id) => Ok(self.control(id)?.enabled),
        }
    }

    /// Whether the item is visible. Closed windows and their contents are
    /// invisible; everything else is in view.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn is_visible(&self, item: UiItem) -> Result<bool, EngineError> {
        let window = match item {
            UiItem::Window(id) => id,
            UiItem::Control(id) => self.control(id)?.window,
        };
        Ok(self.window(window)?.open)
    }

    /// Whether the item lies outside the visible desktop area.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn is_off_screen(&self, item: UiItem) -> Result<bool, EngineError> {
        self.ensure_exists(item)?;
        Ok(false)
    }

    /// Accessible name of the item: a window's title, a control's label or
    /// text, or its automation id when it has no visible text.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn name(&self, item: UiItem) -> Result<String, EngineError> {
        match item {
            UiItem::Window(id) => Ok(self.window(id)?.title.clone()),
            UiItem::Control(id) => {
                let control = self.control(id)?;
                Ok(control
                    .data
                    .visible_text()
                    .map(str::to_owned)
                    .or_else(|| control.automation_id.clone())
                    .unwrap_or_default())
            }
        }
    }

    /// Number of clicks the control has received. Test observability hook.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn click_count(&self, control: ControlId) -> Result<u32, EngineError> {
        Ok(self.control(control)?.clicks)
    }

    /// Text content of a text field, label, list item, or tree node.
    ///
    /// # Errors
    ///
    /// Fails when the control's class carries no text.
    pub fn text_of(&self, control: ControlId) -> Result<String, EngineError> {
        let state = self.control(control)?;
        match &state.data {
            ControlData::TextBox { text, .. }
            | ControlData::MultilineTextBox { text }
            | ControlData::Label { text }
            | ControlData::ListItem { text, .. }
            | ControlData::TreeNode { text, .. } => Ok(text.clone()),
            other => Err(EngineError::UnsupportedOperation {
                operation: "get text",
                class: other.class(),
            }),
        }
    }

    /// Replaces the content of a text field.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a text field.
    pub fn set_text(&mut self, control: ControlId, text: &str) -> Result<(), EngineError> {
        match &mut self.control_mut(control)?.data {
            ControlData::TextBox { text: current, .. }
            | ControlData::MultilineTextBox { text: current } => {
                text.clone_into(current);
                Ok(())
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "set text",
                class: other.class(),
            }),
        }
    }

    /// Whether the text field rejects keyboard input.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a text field.
    pub fn is_read_only(&self, control: ControlId) -> Result<bool, EngineError> {
        match &self.control(control)?.data {
            ControlData::TextBox { read_only, .. } => Ok(*read_only),
            ControlData::MultilineTextBox { .. } => Ok(false),
            other => Err(EngineError::UnsupportedOperation {
                operation: "read-only query",
                class: other.class(),
            }),
        }
    }

    /// Whether the combo box accepts free text.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a combo box.
    pub fn is_editable(&self, control: ControlId) -> Result<bool, EngineError> {
        match &self.control(control)?.data {
            ControlData::ComboBox { editable, .. } => Ok(*editable),
            other => Err(EngineError::UnsupportedOperation {
                operation: "editable query",
                class: other.class(),
            }),
        }
    }

    /// Sets the checked state of a check box or list item.
    ///
    /// # Errors
    ///
    /// Fails when the control's class has no checked state.
    pub fn set_checked(&mut self, control: ControlId, value: bool) -> Result<(), EngineError> {
        match &mut self.control_mut(control)?.data {
            ControlData::CheckBox { checked, .. } | ControlData::ListItem { checked, .. } => {
                *checked = value;
                Ok(())
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "set checked",
                class: other.class(),
            }),
        }
    }

    /// Checked state of a check box or list item.
    ///
    /// # Errors
    ///
    /// Fails when the control's class has no checked state.
    pub fn is_checked(&self, control: ControlId) -> Result<bool, EngineError> {
        match &self.control(control)?.data {
            ControlData::CheckBox { checked, .. } | ControlData::ListItem { checked, .. } => {
                Ok(*checked)
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "checked query",
                class: other.class(),
            }),
        }
    }

    /// Selects a list item (exclusively within its list) or a radio button
    /// (exclusively within its window).
    ///
    /// # Errors
    ///
    /// Fails when the control's class has no selected state.
    pub fn select_item(&mut self, control: ControlId) -> Result<(), EngineError> {
        let (class, parent, window) = {
            let state = self.control(control)?;
            (state.data.class(), state.parent, state.window)
        };
        match class {
            ControlClass::ListItem => {
                let siblings = match parent.map(|id| self.control(id)).transpose()? {
                    Some(list) => match &list.data {
                        ControlData::ListBox { items } | ControlData::ComboBox { items, .. } => {
                            items.clone()
                        }
                        _ => Vec::new(),
                    },
                    None => Vec::new(),
                };
                for sibling in siblings {
                    if let ControlData::ListItem { selected, .. } =
                        &mut self.control_mut(sibling)?.data
                    {
                        *selected = false;
                    }
                }
                if let ControlData::ListItem { selected, .. } = &mut self.control_mut(control)?.data
                {
                    *selected = true;
                }
                Ok(())
            }
            ControlClass::RadioButton => {
                let peers: Vec<ControlId> = self
                    .controls
                    .iter()
                    .filter(|(_, state)| {
                        state.window == window
                            && matches!(state.data, ControlData::RadioButton { .. })
                    })
                    .map(|(id, _)| *id)
                    .collect();
                for peer in peers {
                    if let ControlData::RadioButton { selected, .. } =
                        &mut self.control_mut(peer)?.data
                    {
                        *selected = peer == control;
                    }
                }
                Ok(())
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "select",
                class: other,
            }),
        }
    }

    /// Selected state of a list item, radio button, or tree node.
    ///
    /// # Errors
    ///
    /// Fails when the control's class has no selected state.
    pub fn is_selected(&self, control: ControlId) -> Result<bool, EngineError> {
        match &self.control(control)?.data {
            ControlData::ListItem { selected, .. }
            | ControlData::RadioButton { selected, .. }
            | ControlData::TreeNode { selected, .. } => Ok(*selected),
            other => Err(EngineError::UnsupportedOperation {
                operation: "selected query",
                class: other.class(),
            }),
        }
    }

    /// Toggles a button's pressed state.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a button.
    pub fn toggle(&mut self, control: ControlId) -> Result<(), EngineError> {
        match &mut self.control_mut(control)?.data {
            ControlData::Button { toggled, .. } => {
                *toggled = !*toggled;
                Ok(())
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "toggle",
                class: other.class(),
            }),
        }
    }

    /// A button's pressed state. Test observability hook.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a button.
    pub fn is_toggled(&self, control: ControlId) -> Result<bool, EngineError> {
        match &self.control(control)?.data {
            ControlData::Button { toggled, .. } => Ok(*toggled),
            other => Err(EngineError::UnsupportedOperation {
                operation: "toggled query",
                class: other.class(),
            }),
        }
    }

    /// Moves a slider one small step towards its maximum.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a slider.
    pub fn increment(&mut self, control: ControlId) -> Result<(), EngineError> {
        self.nudge_slider(control, 1.0)
    }

    /// Moves a slider one small step towards its minimum.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a slider.
    pub fn decrement(&mut self, control: ControlId) -> Result<(), EngineError> {
        self.nudge_slider(control, -1.0)
    }

    /// Current value of a progress bar or slider.
    ///
    /// # Errors
    ///
    /// Fails when the control carries no value.
    pub fn value_of(&self, control: ControlId) -> Result<f64, EngineError> {
        match &self.control(control)?.data {
            ControlData::ProgressBar { value, .. } | ControlData::Slider { value, .. } => {
                Ok(*value)
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "get value",
                class: other.class(),
            }),
        }
    }

    /// Minimum and maximum of a progress bar or slider.
    ///
    /// # Errors
    ///
    /// Fails when the control carries no value.
    pub fn value_bounds(&self, control: ControlId) -> Result<(f64, f64), EngineError> {
        match &self.control(control)?.data {
            ControlData::ProgressBar {
                minimum, maximum, ..
            }
            | ControlData::Slider {
                minimum, maximum, ..
            } => Ok((*minimum, *maximum)),
            other => Err(EngineError::UnsupportedOperation {
                operation: "get value bounds",
                class: other.class(),
            }),
        }
    }

    /// Selects the list entry with the given text.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a list, or no entry matches.
    pub fn select_in_list(&mut self, control: ControlId, text: &str) -> Result<(), EngineError> {
        let items = self.list_items(control)?;
        let found = items
            .iter()
            .copied()
            .find(|id| {
                self.controls.get(id).is_some_and(|item| {
                    matches!(&item.data, ControlData::ListItem { text: t, .. } if t == text)
                })
            })
            .ok_or_else(|| EngineError::ItemNotFound {
                text: text.to_owned(),
            })?;
        self.select_item(found)
    }

    /// The currently selected entry of a list, if any.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a list.
    pub fn selected_item(&self, control: ControlId) -> Result<Option<ControlId>, EngineError> {
        Ok(self
            .list_items(control)?
            .into_iter()
            .find(|id| {
                self.controls.get(id).is_some_and(|item| {
                    matches!(item.data, ControlData::ListItem { selected: true, .. })
                })
            }))
    }

    /// Entries of a list box or combo box, in display order.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a list.
    pub fn list_items(&self, control: ControlId) -> Result<Vec<ControlId>, EngineError> {
        match &self.control(control)?.data {
            ControlData::ListBox { items } | ControlData::ComboBox { items, .. } => {
                Ok(items.clone())
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "list items",
                class: other.class(),
            }),
        }
    }

    /// Root nodes of a tree, in display order.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree.
    pub fn tree_nodes(&self, control: ControlId) -> Result<Vec<ControlId>, EngineError> {
        match &self.control(control)?.data {
            ControlData::Tree { nodes } => Ok(nodes.clone()),
            other => Err(EngineError::UnsupportedOperation {
                operation: "tree nodes",
                class: other.class(),
            }),
        }
    }

    /// Finds a direct root node of a tree by text.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree or no node matches.
    pub fn tree_node(&self, tree: ControlId, text: &str) -> Result<ControlId, EngineError> {
        let nodes = self.tree_nodes(tree)?;
        self.find_node_in(&nodes, text)
    }

    /// Finds a direct child of a tree node by text.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree node or no child matches.
    pub fn child_node(&self, node: ControlId, text: &str) -> Result<ControlId, EngineError> {
        let children = self.node_children(node)?;
        self.find_node_in(&children, text)
    }

    /// Direct children of a tree node, in display order.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree node.
    pub fn node_children(&self, node: ControlId) -> Result<Vec<ControlId>, EngineError> {
        match &self.control(node)?.data {
            ControlData::TreeNode { children, .. } => Ok(children.clone()),
            other => Err(EngineError::UnsupportedOperation {
                operation: "node children",
                class: other.class(),
            }),
        }
    }

    /// The selected node anywhere in the tree, if any.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree.
    pub fn selected_node(&self, tree: ControlId) -> Result<Option<ControlId>, EngineError> {
        Ok(self
            .tree_descendants(tree)?
            .into_iter()
            .find(|id| {
                self.controls.get(id).is_some_and(|node| {
                    matches!(node.data, ControlData::TreeNode { selected: true, .. })
                })
            }))
    }

    /// Expands or collapses a tree node.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree node.
    pub fn set_expanded(&mut self, node: ControlId, value: bool) -> Result<(), EngineError> {
        match &mut self.control_mut(node)?.data {
            ControlData::TreeNode { expanded, .. } => {
                *expanded = value;
                Ok(())
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "expand",
                class: other.class(),
            }),
        }
    }

    /// Whether a tree node is expanded.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree node.
    pub fn is_expanded(&self, node: ControlId) -> Result<bool, EngineError> {
        match &self.control(node)?.data {
            ControlData::TreeNode { expanded, .. } => Ok(*expanded),
            other => Err(EngineError::UnsupportedOperation {
                operation: "expanded query",
                class: other.class(),
            }),
        }
    }

    /// Selects a tree node, deselecting every other node of the same tree.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree node.
    pub fn select_node(&mut self, node: ControlId) -> Result<(), EngineError> {
        if !matches!(self.control(node)?.data, ControlData::TreeNode { .. }) {
            return Err(EngineError::UnsupportedOperation {
                operation: "select node",
                class: self.control(node)?.data.class(),
            });
        }
        if let Some(tree) = self.owning_tree(node)? {
            for descendant in self.tree_descendants(tree)? {
                if let ControlData::TreeNode { selected, .. } =
                    &mut self.control_mut(descendant)?.data
                {
                    *selected = false;
                }
            }
        }
        if let ControlData::TreeNode { selected, .. } = &mut self.control_mut(node)?.data {
            *selected = true;
        }
        Ok(())
    }

    /// Deselects a tree node.
    ///
    /// # Errors
    ///
    /// Fails when the control is not a tree node.
    pub fn deselect_node(&mut self, node: ControlId) -> Result<(), EngineError> {
        match &mut self.control_mut(node)?.data {
            ControlData::TreeNode { selected, .. } => {
                *selected = false;
                Ok(())
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "deselect node",
                class: other.class(),
            }),
        }
    }

    /// Whether the item can scroll in either direction.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn can_scroll(&self, item: UiItem) -> Result<bool, EngineError> {
        let horizontal = self.scroll_axis(item, Orientation::Horizontal)?;
        if horizontal.is_some_and(ScrollAxis::scrollable) {
            return Ok(true);
        }
        let vertical = self.scroll_axis(item, Orientation::Vertical)?;
        Ok(vertical.is_some_and(ScrollAxis::scrollable))
    }

    /// Whether the item exposes a usable scroll bar in the orientation.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn has_scroll_bar(&self, item: UiItem, orientation: Orientation) -> Result<bool, EngineError> {
        Ok(self
            .scroll_axis(item, orientation)?
            .is_some_and(ScrollAxis::scrollable))
    }

    /// Whether the scroll bar can actually move.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is stale.
    pub fn is_scrollable(&self, item: UiItem, orientation: Orientation) -> Result<bool, EngineError> {
        Ok(self
            .scroll_axis(item, orientation)?
            .is_some_and(ScrollAxis::scrollable))
    }

    /// Current position of the scroll bar.
    ///
    /// # Errors
    ///
    /// Fails when the item has no scroll bar in the orientation.
    pub fn scroll_value(&self, item: UiItem, orientation: Orientation) -> Result<f64, EngineError> {
        self.scroll_axis(item, orientation)?
            .map(|axis| axis.value)
            .ok_or(EngineError::NotScrollable { orientation })
    }

    /// Minimum and maximum positions of the scroll bar.
    ///
    /// # Errors
    ///
    /// Fails when the item has no scroll bar in the orientation.
    pub fn scroll_bounds(
        &self,
        item: UiItem,
        orientation: Orientation,
    ) -> Result<(f64, f64), EngineError> {
        self.scroll_axis(item, orientation)?
            .map(|axis| (axis.minimum, axis.maximum))
            .ok_or(EngineError::NotScrollable { orientation })
    }

    /// Scrolls one step towards the minimum (left or up).
    ///
    /// # Errors
    ///
    /// Fails when the item has no scroll bar in the orientation.
    pub fn scroll_backward(
        &mut self,
        item: UiItem,
        orientation: Orientation,
    ) -> Result<(), EngineError> {
        self.nudge_scroll(item, orientation, -1.0)
    }

    /// Scrolls one step towards the maximum (right or down).
    ///
    /// # Errors
    ///
    /// Fails when the item has no scroll bar in the orientation.
    pub fn scroll_forward(
        &mut self,
        item: UiItem,
        orientation: Orientation,
    ) -> Result<(), EngineError> {
        self.nudge_scroll(item, orientation, 1.0)
    }

    fn nudge_slider(&mut self, control: ControlId, direction: f64) -> Result<(), EngineError> {
        match &mut self.control_mut(control)?.data {
            ControlData::Slider {
                value,
                minimum,
                maximum,
                step,
            } => {
                *value = (*value + direction * *step).clamp(*minimum, *maximum);
                Ok(())
            }
            other => Err(EngineError::UnsupportedOperation {
                operation: "slider step",
                class: other.class(),
            }),
        }
    }

    fn nudge_scroll(
        &mut self,
        item: UiItem,
        orientation: Orientation,
        direction: f64,
    ) -> Result<(), EngineError> {
        let UiItem::Control(id) = item else {
            return Err(EngineError::NotScrollable { orientation });
        };
        let state = self.control_mut(id)?;
        let axis = state
            .scroll
            .as_mut()
            .and_then(|scroll| match orientation {
                Orientation::Horizontal => scroll.horizontal.as_mut(),
                Orientation::Vertical => scroll.vertical.as_mut(),
            })
            .ok_or(EngineError::NotScrollable { orientation })?;
        axis.value = (axis.value + direction * axis.step).clamp(axis.minimum, axis.maximum);
        Ok(())
    }

    fn scroll_axis(
        &self,
        item: UiItem,
        orientation: Orientation,
    ) -> Result<Option<&ScrollAxis>, EngineError> {
        match item {
            UiItem::Window(id) => {
                self.window(id)?;
                Ok(None)
            }
            UiItem::Control(id) => {
                let state = self.control(id)?;
                Ok(state.scroll.as_ref().and_then(|scroll| match orientation {
                    Orientation::Horizontal => scroll.horizontal.as_ref(),
                    Orientation::Vertical => scroll.vertical.as_ref(),
                }))
            }
        }
    }

    fn find_menu(&self, candidates: &[MenuId], label: &str) -> Result<MenuId, EngineError> {
        candidates
            .iter()
            .copied()
            .find(|id| self.menus.get(id).is_some_and(|menu| menu.label == label))
            .ok_or_else(|| EngineError::MenuItemNotFound {
                label: label.to_owned(),
            })
    }

    fn find_node_in(&self, nodes: &[ControlId], text: &str) -> Result<ControlId, EngineError> {
        nodes
            .iter()
            .copied()
            .find(|id| {
                self.controls.get(id).is_some_and(|node| {
                    matches!(&node.data, ControlData::TreeNode { text: t, .. } if t == text)
                })
            })
            .ok_or_else(|| EngineError::ItemNotFound {
                text: text.to_owned(),
            })
    }

    fn tree_descendants(&self, tree: ControlId) -> Result<Vec<ControlId>, EngineError> {
        let mut stack = self.tree_nodes(tree)?;
        let mut all = Vec::new();
        while let Some(node) = stack.pop() {
            all.push(node);
            if let ControlData::TreeNode { children, .. } = &self.control(node)?.data {
                stack.extend(children.iter().copied());
            }
        }
        Ok(all)
    }

    fn owning_tree(&self, node: ControlId) -> Result<Option<ControlId>, EngineError> {
        let mut current = self.control(node)?;
        while let Some(parent) = current.parent {
            let state = self.control(parent)?;
            if matches!(state.data, ControlData::Tree { .. }) {
                return Ok(Some(parent));
            }
            current = state;
        }
        Ok(None)
    }

    fn ensure_exists(&self, item: UiItem) -> Result<(), EngineError> {
        match item {
            UiItem::Window(id) => self.window(id).map(|_| ()),
            UiItem::Control(id) => self.control(id).map(|_| ()),
        }
    }

    fn ensure_live(&self, item: UiItem) -> Result<(), EngineError> {
        let window = match item {
            UiItem::Window(id) => id,
            UiItem::Control(id) => self.control(id)?.window,
        };
        self.open_window(window).map(|_| ())
    }

    fn application(&self, id: ApplicationId) -> Result<&ApplicationState, EngineError> {
        self.applications.get(&id).ok_or(EngineError::StaleReference)
    }

    fn running_application_mut(
        &mut self,
        id: ApplicationId,
    ) -> Result<&mut ApplicationState, EngineError> {
        let state = self
            .applications
            .get_mut(&id)
            .ok_or(EngineError::StaleReference)?;
        if !state.running {
            return Err(EngineError::ApplicationStopped);
        }
        Ok(state)
    }

    fn window(&self, id: WindowId) -> Result<&WindowState, EngineError> {
        self.windows.get(&id).ok_or(EngineError::StaleReference)
    }

    fn open_window(&self, id: WindowId) -> Result<&WindowState, EngineError> {
        let state = self.window(id)?;
        if !state.open {
            return Err(EngineError::WindowClosed {
                title: state.title.clone(),
            });
        }
        Ok(state)
    }

    fn menu(&self, id: MenuId) -> Result<&MenuState, EngineError> {
        self.menus.get(&id).ok_or(EngineError::StaleReference)
    }

    fn control(&self, id: ControlId) -> Result<&ControlState, EngineError> {
        self.controls.get(&id).ok_or(EngineError::StaleReference)
    }

    fn control_mut(&mut self, id: ControlId) -> Result<&mut ControlState, EngineError> {
        self.controls.get_mut(&id).ok_or(EngineError::StaleReference)
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_object;
        self.next_object += 1;
        id
    }

    fn instantiate_application(&mut self, blueprint: ApplicationBlueprint) -> ApplicationId {
        let id = ApplicationId(self.alloc_id());
        let pid = self.next_pid;
        self.next_pid += 1;
        self.applications.insert(
            id,
            ApplicationState {
                path: blueprint.path,
                pid,
                windows: Vec::new(),
                running: true,
            },
        );
        for window in blueprint.windows {
            self.instantiate_window(id, window, WindowRole::Main);
        }
        id
    }

    fn instantiate_window(
        &mut self,
        application: ApplicationId,
        blueprint: WindowBlueprint,
        role: WindowRole,
    ) -> WindowId {
        let id = WindowId(self.alloc_id());
        let controls = blueprint
            .controls
            .into_iter()
            .map(|control| self.instantiate_control(id, None, control))
            .collect();
        let menus = blueprint
            .menus
            .into_iter()
            .map(|menu| self.instantiate_menu(menu))
            .collect();
        let modals = blueprint
            .modals
            .into_iter()
            .map(|modal| self.instantiate_window(application, modal, WindowRole::Modal))
            .collect();
        let message_boxes = blueprint
            .message_boxes
            .into_iter()
            .map(|found| self.instantiate_window(application, found, WindowRole::MessageBox))
            .collect();
        self.windows.insert(
            id,
            WindowState {
                application,
                title: blueprint.title,
                automation_id: blueprint.automation_id,
                role,
                controls,
                menus,
                modals,
                message_boxes,
                open: true,
            },
        );
        if let Some(state) = self.applications.get_mut(&application) {
            state.windows.push(id);
        }
        id
    }

    fn instantiate_menu(&mut self, blueprint: MenuBlueprint) -> MenuId {
        let id = MenuId(self.alloc_id());
        let children = blueprint
            .children
            .into_iter()
            .map(|child| self.instantiate_menu(child))
            .collect();
        self.menus.insert(
            id,
            MenuState {
                label: blueprint.label,
                children,
            },
        );
        id
    }

    fn instantiate_control(
        &mut self,
        window: WindowId,
        parent: Option<ControlId>,
        blueprint: ControlBlueprint,
    ) -> ControlId {
        let id = ControlId(self.alloc_id());
        let data = match blueprint.kind {
            ControlKind::Button { label } => ControlData::Button {
                label,
                toggled: false,
            },
            ControlKind::CheckBox { label, checked } => ControlData::CheckBox { label, checked },
            ControlKind::RadioButton { label, selected } => {
                ControlData::RadioButton { label, selected }
            }
            ControlKind::TextBox { text, read_only } => ControlData::TextBox { text, read_only },
            ControlKind::MultilineTextBox { text } => ControlData::MultilineTextBox { text },
            ControlKind::Label { text } => ControlData::Label { text },
            ControlKind::ListBox { items } => ControlData::ListBox {
                items: self.instantiate_list_items(window, id, items),
            },
            ControlKind::ComboBox { items, editable } => ControlData::ComboBox {
                items: self.instantiate_list_items(window, id, items),
                editable,
            },
            ControlKind::ProgressBar {
                value,
                minimum,
                maximum,
            } => ControlData::ProgressBar {
                value,
                minimum,
                maximum,
            },
            ControlKind::Slider {
                value,
                minimum,
                maximum,
                step,
            } => ControlData::Slider {
                value,
                minimum,
                maximum,
                step,
            },
            ControlKind::Tree { nodes } => ControlData::Tree {
                nodes: nodes
                    .into_iter()
                    .map(|node| self.instantiate_tree_node(window, id, node))
                    .collect(),
            },
            ControlKind::Hyperlink { label } => ControlData::Hyperlink { label },
        };
        self.controls.insert(
            id,
            ControlState {
                window,
                parent,
                automation_id: blueprint.automation_id,
                enabled: blueprint.enabled,
                clicks: 0,
                scroll: blueprint.scroll.map(instantiate_scroll),
                data,
            },
        );
        id
    }

    fn instantiate_list_items(
        &mut self,
        window: WindowId,
        parent: ControlId,
        items: Vec<ListItemBlueprint>,
    ) -> Vec<ControlId> {
        items
            .into_iter()
            .map(|item| {
                let id = ControlId(self.alloc_id());
                self.controls.insert(
                    id,
                    ControlState {
                        window,
                        parent: Some(parent),
                        automation_id: None,
                        enabled: true,
                        clicks: 0,
                        scroll: None,
                        data: ControlData::ListItem {
                            text: item.text,
                            checked: item.checked,
                            selected: item.selected,
                        },
                    },
                );
                id
            })
            .collect()
    }

    fn instantiate_tree_node(
        &mut self,
        window: WindowId,
        parent: ControlId,
        blueprint: TreeNodeBlueprint,
    ) -> ControlId {
        let id = ControlId(self.alloc_id());
        let children = blueprint
            .children
            .into_iter()
            .map(|child| self.instantiate_tree_node(window, id, child))
            .collect();
        self.controls.insert(
            id,
            ControlState {
                window,
                parent: Some(parent),
                automation_id: None,
                enabled: true,
                clicks: 0,
                scroll: None,
                data: ControlData::TreeNode {
                    text: blueprint.text,
                    expanded: blueprint.expanded,
                    selected: blueprint.selected,
                    children,
                },
            },
        );
        id
    }
}

fn instantiate_scroll(blueprint: ScrollBlueprint) -> ScrollState {
    ScrollState {
        horizontal: blueprint.horizontal.map(instantiate_axis),
        vertical: blueprint.vertical.map(instantiate_axis),
    }
}

fn instantiate_axis(blueprint: ScrollAxisBlueprint) -> ScrollAxis {
    ScrollAxis {
        minimum: blueprint.minimum,
        maximum: blueprint.maximum,
        value: blueprint.value,
        step: blueprint.step,
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const EDITOR_PATH: &str = "C:/tools/editor.exe";

    fn editor_blueprint() -> ApplicationBlueprint {
        ApplicationBlueprint::new(EDITOR_PATH).window(
            WindowBlueprint::new("Editor")
                .menu(MenuBlueprint::new("File").item(MenuBlueprint::new("Save")))
                .control(ControlBlueprint::button("ok_button", "OK"))
                .control(ControlBlueprint::text_box("name_box"))
                .control(ControlBlueprint::check_box("wrap_lines", "Wrap lines"))
                .control(ControlBlueprint::list_box(
                    "flavours",
                    ["vanilla", "chocolate"],
                ))
                .control(ControlBlueprint::tree(
                    "project_tree",
                    [TreeNodeBlueprint::new("root")
                        .child(TreeNodeBlueprint::new("src"))
                        .child(TreeNodeBlueprint::new("docs"))],
                ))
                .control(
                    ControlBlueprint::multiline_text_box("body").scrollable(
                        ScrollBlueprint::new()
                            .vertical(ScrollAxisBlueprint::new(0.0, 100.0, 10.0)),
                    ),
                )
                .modal(WindowBlueprint::new("Confirm").automation_id("confirm_dialog"))
                .message_box(WindowBlueprint::new("Error")),
        )
    }

    struct World {
        desktop: Desktop,
        application: ApplicationId,
        window: WindowId,
    }

    #[fixture]
    fn world() -> World {
        let mut desktop = Desktop::new();
        desktop.install(editor_blueprint());
        let application = desktop.launch(EDITOR_PATH).expect("launch editor");
        let window = desktop
            .find_window(application, "Editor")
            .expect("find main window");
        World {
            desktop,
            application,
            window,
        }
    }

    fn button(world: &World) -> ControlId {
        world
            .desktop
            .find_control(
                world.window,
                ControlClass::Button,
                &SearchCriteria::AutomationId("ok_button".into()),
            )
            .expect("find button")
    }

    #[rstest]
    fn launch_of_unknown_path_fails(mut world: World) {
        let error = world
            .desktop
            .launch("C:/missing.exe")
            .expect_err("launch should fail");
        assert!(matches!(error, EngineError::LaunchFailed { .. }));
    }

    #[rstest]
    fn attach_finds_running_application(mut world: World) {
        let pid = world
            .desktop
            .process_id(world.application)
            .expect("process id");
        let attached = world.desktop.attach(pid).expect("attach");
        assert_eq!(attached, world.application);
    }

    #[rstest]
    fn attach_to_unknown_pid_fails(mut world: World) {
        let error = world.desktop.attach(1).expect_err("attach should fail");
        assert!(matches!(error, EngineError::ProcessNotFound { pid: 1 }));
    }

    #[rstest]
    fn finds_controls_by_automation_id_and_text(world: World) {
        let by_id = button(&world);
        let by_text = world
            .desktop
            .find_control(
                world.window,
                ControlClass::Button,
                &SearchCriteria::Text("OK".into()),
            )
            .expect("find by text");
        assert_eq!(by_id, by_text);
    }

    #[rstest]
    fn missing_control_reports_class_and_criteria(world: World) {
        let error = world
            .desktop
            .find_control(
                world.window,
                ControlClass::Slider,
                &SearchCriteria::AutomationId("volume".into()),
            )
            .expect_err("find should fail");
        assert_eq!(
            error.to_string(),
            "no slider matching automation id 'volume'"
        );
    }

    #[rstest]
    fn click_counts_and_focuses(mut world: World) {
        let target = button(&world);
        world
            .desktop
            .click(UiItem::Control(target))
            .expect("click");
        assert_eq!(world.desktop.click_count(target).expect("count"), 1);
        assert!(world
            .desktop
            .is_focused(UiItem::Control(target))
            .expect("focus query"));
    }

    #[rstest]
    fn click_toggles_check_box(mut world: World) {
        let check = world
            .desktop
            .find_control(
                world.window,
                ControlClass::CheckBox,
                &SearchCriteria::AutomationId("wrap_lines".into()),
            )
            .expect("find check box");
        world.desktop.click(UiItem::Control(check)).expect("click");
        assert!(world.desktop.is_checked(check).expect("checked"));
        world.desktop.click(UiItem::Control(check)).expect("click");
        assert!(!world.desktop.is_checked(check).expect("checked"));
    }

    #[rstest]
    fn entered_text_accumulates(mut world: World) {
        let name = world
            .desktop
            .find_control(
                world.window,
                ControlClass::TextBox,
                &SearchCriteria::AutomationId("name_box".into()),
            )
            .expect("find text box");
        world
            .desktop
            .enter_text(UiItem::Control(name), "hello")
            .expect("enter");
        world
            .desktop
            .enter_text(UiItem::Control(name), " world")
            .expect("enter");
        assert_eq!(world.desktop.text_of(name).expect("text"), "hello world");
    }

    #[rstest]
    fn list_selection_is_exclusive(mut world: World) {
        let list = world
            .desktop
            .find_control(
                world.window,
                ControlClass::ListBox,
                &SearchCriteria::AutomationId("flavours".into()),
            )
            .expect("find list");
        world
            .desktop
            .select_in_list(list, "vanilla")
            .expect("select first");
        world
            .desktop
            .select_in_list(list, "chocolate")
            .expect("select second");
        let selected = world
            .desktop
            .selected_item(list)
            .expect("selected item")
            .expect("something selected");
        assert_eq!(world.desktop.text_of(selected).expect("text"), "chocolate");
    }

    #[rstest]
    fn tree_nodes_are_searchable_and_selectable(mut world: World) {
        let tree = world
            .desktop
            .find_control(
                world.window,
                ControlClass::Tree,
                &SearchCriteria::AutomationId("project_tree".into()),
            )
            .expect("find tree");
        let root = world.desktop.tree_node(tree, "root").expect("root node");
        let src = world.desktop.child_node(root, "src").expect("src node");
        let docs = world.desktop.child_node(root, "docs").expect("docs node");

        world.desktop.select_node(src).expect("select src");
        world.desktop.select_node(docs).expect("select docs");
        assert!(!world.desktop.is_selected(src).expect("src query"));
        let selected = world
            .desktop
            .selected_node(tree)
            .expect("selected node")
            .expect("something selected");
        assert_eq!(selected, docs);

        world.desktop.set_expanded(root, true).expect("expand");
        assert!(world.desktop.is_expanded(root).expect("expanded query"));
    }

    #[rstest]
    fn scroll_positions_clamp_to_bounds(mut world: World) {
        let body = world
            .desktop
            .find_control(
                world.window,
                ControlClass::MultilineTextBox,
                &SearchCriteria::AutomationId("body".into()),
            )
            .expect("find body");
        let item = UiItem::Control(body);
        assert!(world.desktop.can_scroll(item).expect("can scroll"));
        assert!(!world
            .desktop
            .has_scroll_bar(item, Orientation::Horizontal)
            .expect("horizontal query"));

        world
            .desktop
            .scroll_backward(item, Orientation::Vertical)
            .expect("scroll");
        assert_eq!(
            world
                .desktop
                .scroll_value(item, Orientation::Vertical)
                .expect("value"),
            0.0
        );
        world
            .desktop
            .scroll_forward(item, Orientation::Vertical)
            .expect("scroll");
        assert_eq!(
            world
                .desktop
                .scroll_value(item, Orientation::Vertical)
                .expect("value"),
            10.0
        );
    }

    #[rstest]
    fn modal_windows_and_message_boxes_resolve(world: World) {
        let modal = world
            .desktop
            .modal_window(
                world.window,
                &SearchCriteria::AutomationId("confirm_dialog".into()),
            )
            .expect("modal window");
        assert_eq!(
            world.desktop.window_title(modal).expect("title"),
            "Confirm"
        );
        let message_box = world
            .desktop
            .message_box(world.window, "Error")
            .expect("message box");
        assert_eq!(
            world.desktop.window_title(message_box).expect("title"),
            "Error"
        );
    }

    #[rstest]
    fn menus_resolve_by_label(world: World) {
        assert!(world.desktop.has_menu_bar(world.window).expect("menu bar"));
        let file = world
            .desktop
            .menu_item(world.window, "File")
            .expect("file menu");
        let save = world.desktop.submenu(file, "Save").expect("save item");
        assert_eq!(world.desktop.menu_label(save).expect("label"), "Save");
    }

    #[rstest]
    fn closing_the_application_closes_its_windows(mut world: World) {
        world
            .desktop
            .close_application(world.application)
            .expect("close");
        let error = world
            .desktop
            .find_window(world.application, "Editor")
            .expect_err("find should fail");
        assert!(matches!(error, EngineError::ApplicationStopped));
        let error = world
            .desktop
            .window_title(world.window)
            .expect_err("title should fail");
        assert!(matches!(error, EngineError::WindowClosed { .. }));
    }

    #[rstest]
    fn closing_twice_fails(mut world: World) {
        world
            .desktop
            .close_application(world.application)
            .expect("close");
        let error = world
            .desktop
            .close_application(world.application)
            .expect_err("second close should fail");
        assert!(matches!(error, EngineError::ApplicationStopped));
    }
}
