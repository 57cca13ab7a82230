//! The command table.
//!
//! A fixed mapping from wire command name to handler. Names are matched
//! case-sensitively. The two bootstrap commands (`launch` and `attach`) run
//! without a resolved target because their purpose is to create the first
//! handle of a session; every other command requires one.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::context::CommandContext;
use super::errors::CommandError;
use super::handlers::{controls, items, lists, menus, scrolling, session, trees, windows};
use super::outcome::Outcome;

/// Handler signature shared by every command.
pub type HandlerFn = fn(&mut CommandContext<'_>) -> Result<Outcome, CommandError>;

/// One entry of the command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Wire name of the command.
    pub name: &'static str,
    /// Whether the dispatcher must resolve a handle before invoking the
    /// handler. False only for the bootstrap commands.
    pub needs_target: bool,
    /// The handler.
    pub run: HandlerFn,
}

const fn bootstrap(name: &'static str, run: HandlerFn) -> CommandSpec {
    CommandSpec {
        name,
        needs_target: false,
        run,
    }
}

const fn targeted(name: &'static str, run: HandlerFn) -> CommandSpec {
    CommandSpec {
        name,
        needs_target: true,
        run,
    }
}

/// Every command the daemon understands.
pub static COMMANDS: &[CommandSpec] = &[
    bootstrap("launch", session::launch),
    bootstrap("attach", session::attach),
    targeted("getwindow", windows::get_window),
    targeted("getwindowfromrefid", windows::get_window_from_ref_id),
    targeted("getmodalwindow", windows::get_modal_window),
    targeted("getmodalwindows", windows::get_modal_windows),
    targeted("getmenubar", windows::get_menu_bar),
    targeted("gettitle", windows::get_title),
    targeted("getmessagebox", windows::get_message_box),
    targeted("isenabled", items::is_enabled),
    targeted("doubleclick", items::double_click),
    targeted("isoffscreen", items::is_off_screen),
    targeted("setfocus", items::set_focus),
    targeted("isfocused", items::is_focused),
    targeted("isvisible", items::is_visible),
    targeted("getname", items::get_name),
    targeted("canscroll", scrolling::can_scroll),
    targeted("getminvalue", scrolling::get_min_value),
    targeted("getmaxvalue", scrolling::get_max_value),
    targeted("waitwhilebusy", session::wait_while_busy),
    targeted("gethscrollbar", scrolling::get_h_scroll_bar),
    targeted("getvscrollbar", scrolling::get_v_scroll_bar),
    targeted("scrollleft", scrolling::scroll_left),
    targeted("scrollright", scrolling::scroll_right),
    targeted("scrollup", scrolling::scroll_up),
    targeted("scrolldown", scrolling::scroll_down),
    targeted("getmenuitem", menus::get_menu_item),
    targeted("enter", items::enter),
    targeted("entertext", items::enter),
    targeted("click", items::click),
    targeted("rightclick", items::right_click),
    targeted("toggle", controls::toggle),
    targeted("getcombobox", controls::get_combo_box),
    targeted("selecttext", lists::select_text),
    targeted("iseditable", controls::is_editable),
    targeted("getselecteditem", lists::get_selected_item),
    targeted("getlistitems", lists::get_list_items),
    targeted("getitembyindex", lists::get_item_by_index),
    targeted("getitembytext", lists::get_item_by_text),
    targeted("getitemscount", lists::get_items_count),
    targeted("getchildren", menus::get_children),
    targeted("getnodes", trees::get_nodes),
    targeted("getnode", trees::get_node),
    targeted("getselectednode", trees::get_selected_node),
    targeted("getlistbox", controls::get_list_box),
    targeted("gettextbox", controls::get_text_box),
    targeted("getlabel", controls::get_label),
    targeted("gettree", controls::get_tree),
    targeted("getmultilinetextbox", controls::get_multiline_text_box),
    targeted("getprogressbar", controls::get_progress_bar),
    targeted("getcheckbox", controls::get_check_box),
    targeted("getradiobutton", controls::get_radio_button),
    targeted("getslider", controls::get_slider),
    targeted("gethyperlink", controls::get_hyperlink),
    targeted("gettext", controls::get_text),
    targeted("getvalue", controls::get_value),
    targeted("settext", controls::set_text),
    targeted("isreadonly", controls::is_read_only),
    targeted("check", controls::check),
    targeted("uncheck", controls::uncheck),
    targeted("select", controls::select),
    targeted("isselected", controls::is_selected),
    targeted("ischecked", controls::is_checked),
    targeted("increment", controls::increment),
    targeted("decrement", controls::decrement),
    targeted("expand", trees::expand),
    targeted("collapse", trees::collapse),
    targeted("isexpanded", trees::is_expanded),
    targeted("selecttreenode", trees::select_tree_node),
    targeted("deselecttreenode", trees::deselect_tree_node),
    targeted("getbutton", controls::get_button),
    targeted("close", session::close),
];

static INDEX: Lazy<HashMap<&'static str, &'static CommandSpec>> = Lazy::new(|| {
    COMMANDS
        .iter()
        .map(|spec| (spec.name, spec))
        .collect()
});

/// Looks a command up by its exact wire name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    INDEX.get(name).copied()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn command_names_are_unique() {
        let mut seen = HashSet::new();
        for spec in COMMANDS {
            assert!(seen.insert(spec.name), "duplicate command {}", spec.name);
        }
    }

    #[test]
    fn only_launch_and_attach_are_bootstrap_commands() {
        let bootstrap: Vec<&str> = COMMANDS
            .iter()
            .filter(|spec| !spec.needs_target)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(bootstrap, ["launch", "attach"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("click").is_some());
        assert!(lookup("Click").is_none());
        assert!(lookup("bogus").is_none());
    }
}
