//! Window discovery and window-level queries.

use crate::dispatch::context::CommandContext;
use crate::dispatch::errors::CommandError;
use crate::dispatch::outcome::Outcome;
use crate::dispatch::target::UiObject;

/// Finds a window of the target application by the title in parameter 1.
pub(crate) fn get_window(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let application = ctx.application()?;
    let title = ctx.params().required(1, "title")?;
    let window = ctx.desktop.find_window(application, title)?;
    Ok(Outcome::Handle(ctx.registry.put(UiObject::Window(window))))
}

/// Re-registers the target window under a fresh handle.
pub(crate) fn get_window_from_ref_id(
    ctx: &mut CommandContext<'_>,
) -> Result<Outcome, CommandError> {
    let window = ctx.window()?;
    Ok(Outcome::Handle(ctx.registry.put(UiObject::Window(window))))
}

/// Finds the open modal window of the target window matching the criteria.
pub(crate) fn get_modal_window(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let window = ctx.window()?;
    let criteria = ctx.search_criteria()?;
    let modal = ctx.desktop.modal_window(window, &criteria)?;
    Ok(Outcome::Handle(ctx.registry.put(UiObject::Window(modal))))
}

/// Registers the collection of open modal windows, or answers empty when
/// there are none.
pub(crate) fn get_modal_windows(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let window = ctx.window()?;
    let modals = ctx.desktop.modal_windows(window)?;
    if modals.is_empty() {
        return Ok(Outcome::Empty);
    }
    let collection = modals.into_iter().map(UiObject::Window).collect();
    Ok(Outcome::Handle(
        ctx.registry.put(UiObject::Collection(collection)),
    ))
}

/// Title of the target window.
pub(crate) fn get_title(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let window = ctx.window()?;
    Ok(Outcome::Text(ctx.desktop.window_title(window)?))
}

/// Finds the message box of the target window by the title in parameter 1.
pub(crate) fn get_message_box(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let window = ctx.window()?;
    let title = ctx.params().required(1, "title")?;
    let message_box = ctx.desktop.message_box(window, title)?;
    Ok(Outcome::Handle(
        ctx.registry.put(UiObject::Window(message_box)),
    ))
}

/// Registers the target window's menu bar, or answers empty when the window
/// has none.
pub(crate) fn get_menu_bar(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let window = ctx.window()?;
    if ctx.desktop.has_menu_bar(window)? {
        Ok(Outcome::Handle(ctx.registry.put(UiObject::MenuBar(window))))
    } else {
        Ok(Outcome::Empty)
    }
}
