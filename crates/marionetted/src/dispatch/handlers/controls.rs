//! Control discovery and per-control state commands.

use marionette_engine::ControlClass;

use crate::dispatch::context::CommandContext;
use crate::dispatch::errors::CommandError;
use crate::dispatch::outcome::Outcome;
use crate::dispatch::target::UiObject;

/// Finds a control of `class` on the target window using the request's
/// search criteria and registers it.
fn find(ctx: &mut CommandContext<'_>, class: ControlClass) -> Result<Outcome, CommandError> {
    let window = ctx.window()?;
    let criteria = ctx.search_criteria()?;
    let id = ctx.desktop.find_control(window, class, &criteria)?;
    Ok(Outcome::Handle(
        ctx.registry.put(UiObject::Control { id, class }),
    ))
}

pub(crate) fn get_button(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::Button)
}

pub(crate) fn get_combo_box(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::ComboBox)
}

pub(crate) fn get_list_box(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::ListBox)
}

pub(crate) fn get_text_box(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::TextBox)
}

pub(crate) fn get_multiline_text_box(
    ctx: &mut CommandContext<'_>,
) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::MultilineTextBox)
}

pub(crate) fn get_label(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::Label)
}

pub(crate) fn get_tree(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::Tree)
}

pub(crate) fn get_progress_bar(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::ProgressBar)
}

pub(crate) fn get_check_box(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::CheckBox)
}

pub(crate) fn get_radio_button(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::RadioButton)
}

pub(crate) fn get_slider(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::Slider)
}

pub(crate) fn get_hyperlink(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    find(ctx, ControlClass::Hyperlink)
}

/// Text of any control kind that carries text.
pub(crate) fn get_text(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[
        ControlClass::ListItem,
        ControlClass::TextBox,
        ControlClass::MultilineTextBox,
        ControlClass::Label,
        ControlClass::TreeNode,
    ])?;
    Ok(Outcome::Text(ctx.desktop.text_of(control)?))
}

/// Replaces a text field's content with parameter 1.
pub(crate) fn set_text(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::TextBox, ControlClass::MultilineTextBox])?;
    let text = ctx.params().required(1, "text")?;
    ctx.desktop.set_text(control, text)?;
    Ok(Outcome::Empty)
}

pub(crate) fn is_read_only(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::TextBox, ControlClass::MultilineTextBox])?;
    Ok(Outcome::Bool(ctx.desktop.is_read_only(control)?))
}

pub(crate) fn is_editable(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::ComboBox])?;
    Ok(Outcome::Bool(ctx.desktop.is_editable(control)?))
}

pub(crate) fn check(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::ListItem, ControlClass::CheckBox])?;
    ctx.desktop.set_checked(control, true)?;
    Ok(Outcome::Empty)
}

pub(crate) fn uncheck(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::ListItem, ControlClass::CheckBox])?;
    ctx.desktop.set_checked(control, false)?;
    Ok(Outcome::Empty)
}

pub(crate) fn is_checked(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::ListItem, ControlClass::CheckBox])?;
    Ok(Outcome::Bool(ctx.desktop.is_checked(control)?))
}

pub(crate) fn select(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::ListItem, ControlClass::RadioButton])?;
    ctx.desktop.select_item(control)?;
    Ok(Outcome::Empty)
}

pub(crate) fn is_selected(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[
        ControlClass::ListItem,
        ControlClass::TreeNode,
        ControlClass::RadioButton,
    ])?;
    Ok(Outcome::Bool(ctx.desktop.is_selected(control)?))
}

pub(crate) fn toggle(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::Button])?;
    ctx.desktop.toggle(control)?;
    Ok(Outcome::Empty)
}

pub(crate) fn increment(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::Slider])?;
    ctx.desktop.increment(control)?;
    Ok(Outcome::Empty)
}

pub(crate) fn decrement(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(&[ControlClass::Slider])?;
    ctx.desktop.decrement(control)?;
    Ok(Outcome::Empty)
}

/// Current value of a progress bar, slider, or scroll bar.
pub(crate) fn get_value(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    if let Ok((item, orientation)) = ctx.scroll_bar() {
        return Ok(Outcome::Number(ctx.desktop.scroll_value(item, orientation)?));
    }
    let control = ctx.control(&[ControlClass::ProgressBar, ControlClass::Slider])?;
    Ok(Outcome::Number(ctx.desktop.value_of(control)?))
}
