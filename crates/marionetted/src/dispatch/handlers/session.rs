//! Application lifecycle commands, including the two bootstrap commands.

use crate::dispatch::context::CommandContext;
use crate::dispatch::errors::CommandError;
use crate::dispatch::outcome::Outcome;
use crate::dispatch::target::UiObject;

/// Launches the application at the path in parameter 1 and registers it.
pub(crate) fn launch(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let path = ctx.params().required(1, "application path")?;
    let application = ctx.desktop.launch(path)?;
    Ok(Outcome::Handle(
        ctx.registry.put(UiObject::Application(application)),
    ))
}

/// Attaches to the running process named in parameter 1 and registers it.
pub(crate) fn attach(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let raw = ctx.params().required(1, "process id")?;
    let pid: u32 = raw
        .parse()
        .map_err(|_| CommandError::invalid_input("Process id should be a number"))?;
    let application = ctx.desktop.attach(pid)?;
    Ok(Outcome::Handle(
        ctx.registry.put(UiObject::Application(application)),
    ))
}

/// Closes the target application or window and releases its handle.
pub(crate) fn close(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let target = ctx.target()?.clone();
    match target {
        UiObject::Application(id) => {
            ctx.desktop.close_application(id)?;
            ctx.remove_current()?;
            Ok(Outcome::Empty)
        }
        UiObject::Window(id) => {
            ctx.desktop.close_window(id)?;
            ctx.remove_current()?;
            Ok(Outcome::Empty)
        }
        _ => Err(CommandError::UnsupportedTarget),
    }
}

/// Blocks until the target application or window has settled.
pub(crate) fn wait_while_busy(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let target = ctx.target()?.clone();
    match target {
        UiObject::Application(id) => {
            ctx.desktop.wait_while_application_busy(id)?;
            Ok(Outcome::Empty)
        }
        UiObject::Window(id) => {
            ctx.desktop.wait_while_window_busy(id)?;
            Ok(Outcome::Empty)
        }
        _ => Err(CommandError::UnsupportedTarget),
    }
}
