//! Pointer, keyboard, and visibility commands shared by windows and
//! controls.

use crate::dispatch::context::CommandContext;
use crate::dispatch::errors::CommandError;
use crate::dispatch::outcome::Outcome;

pub(crate) fn click(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    ctx.desktop.click(item)?;
    Ok(Outcome::Empty)
}

pub(crate) fn right_click(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    ctx.desktop.right_click(item)?;
    Ok(Outcome::Empty)
}

pub(crate) fn double_click(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    ctx.desktop.double_click(item)?;
    Ok(Outcome::Empty)
}

/// Types parameter 1 into the target item.
pub(crate) fn enter(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    let text = ctx.params().required(1, "text")?;
    ctx.desktop.enter_text(item, text)?;
    Ok(Outcome::Empty)
}

pub(crate) fn set_focus(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    ctx.desktop.focus(item)?;
    Ok(Outcome::Empty)
}

pub(crate) fn is_focused(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    Ok(Outcome::Bool(ctx.desktop.is_focused(item)?))
}

pub(crate) fn is_enabled(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    Ok(Outcome::Bool(ctx.desktop.is_enabled(item)?))
}

pub(crate) fn is_visible(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    Ok(Outcome::Bool(ctx.desktop.is_visible(item)?))
}

pub(crate) fn is_off_screen(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    Ok(Outcome::Bool(ctx.desktop.is_off_screen(item)?))
}

pub(crate) fn get_name(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    Ok(Outcome::Text(ctx.desktop.name(item)?))
}
