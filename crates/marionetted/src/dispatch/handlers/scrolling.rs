//! Scroll bar discovery and movement.

use marionette_engine::{ControlClass, Orientation};

use crate::dispatch::context::CommandContext;
use crate::dispatch::errors::CommandError;
use crate::dispatch::outcome::Outcome;
use crate::dispatch::target::UiObject;

/// Whether the target item or scroll bar can scroll.
pub(crate) fn can_scroll(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    if let Ok((item, orientation)) = ctx.scroll_bar() {
        return Ok(Outcome::Bool(ctx.desktop.is_scrollable(item, orientation)?));
    }
    let item = ctx.ui_item()?;
    Ok(Outcome::Bool(ctx.desktop.can_scroll(item)?))
}

fn get_scroll_bar(
    ctx: &mut CommandContext<'_>,
    orientation: Orientation,
) -> Result<Outcome, CommandError> {
    let item = ctx.ui_item()?;
    if ctx.desktop.has_scroll_bar(item, orientation)? {
        Ok(Outcome::Handle(
            ctx.registry.put(UiObject::ScrollBar { item, orientation }),
        ))
    } else {
        Ok(Outcome::Empty)
    }
}

/// Registers the target item's horizontal scroll bar, or answers empty when
/// it has none.
pub(crate) fn get_h_scroll_bar(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    get_scroll_bar(ctx, Orientation::Horizontal)
}

/// Registers the target item's vertical scroll bar, or answers empty when
/// it has none.
pub(crate) fn get_v_scroll_bar(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    get_scroll_bar(ctx, Orientation::Vertical)
}

/// Minimum position of a scroll bar or progress bar.
pub(crate) fn get_min_value(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    if let Ok((item, orientation)) = ctx.scroll_bar() {
        let (minimum, _) = ctx.desktop.scroll_bounds(item, orientation)?;
        return Ok(Outcome::Number(minimum));
    }
    let control = ctx.control(&[ControlClass::ProgressBar])?;
    let (minimum, _) = ctx.desktop.value_bounds(control)?;
    Ok(Outcome::Number(minimum))
}

/// Maximum position of a scroll bar or progress bar.
pub(crate) fn get_max_value(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    if let Ok((item, orientation)) = ctx.scroll_bar() {
        let (_, maximum) = ctx.desktop.scroll_bounds(item, orientation)?;
        return Ok(Outcome::Number(maximum));
    }
    let control = ctx.control(&[ControlClass::ProgressBar])?;
    let (_, maximum) = ctx.desktop.value_bounds(control)?;
    Ok(Outcome::Number(maximum))
}

fn step(
    ctx: &mut CommandContext<'_>,
    expected: Orientation,
    forward: bool,
) -> Result<Outcome, CommandError> {
    let (item, orientation) = ctx.scroll_bar()?;
    if orientation != expected {
        return Err(CommandError::UnsupportedTarget);
    }
    if forward {
        ctx.desktop.scroll_forward(item, orientation)?;
    } else {
        ctx.desktop.scroll_backward(item, orientation)?;
    }
    Ok(Outcome::Empty)
}

pub(crate) fn scroll_left(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    step(ctx, Orientation::Horizontal, false)
}

pub(crate) fn scroll_right(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    step(ctx, Orientation::Horizontal, true)
}

pub(crate) fn scroll_up(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    step(ctx, Orientation::Vertical, false)
}

pub(crate) fn scroll_down(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    step(ctx, Orientation::Vertical, true)
}
