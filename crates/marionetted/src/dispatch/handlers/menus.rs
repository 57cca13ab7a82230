//! Menu navigation.

use crate::dispatch::context::CommandContext;
use crate::dispatch::errors::CommandError;
use crate::dispatch::outcome::Outcome;
use crate::dispatch::target::UiObject;

use marionette_engine::ControlClass;

/// Finds an entry of the target menu bar or menu by the label in
/// parameter 1.
pub(crate) fn get_menu_item(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let label = ctx.params().required(1, "menu item label")?;
    let target = ctx.target()?.clone();
    let menu = match target {
        UiObject::MenuBar(window) => ctx.desktop.menu_item(window, label)?,
        UiObject::Menu(parent) => ctx.desktop.submenu(parent, label)?,
        _ => return Err(CommandError::UnsupportedTarget),
    };
    Ok(Outcome::Handle(ctx.registry.put(UiObject::Menu(menu))))
}

/// Registers the children of the target menu or tree node as a collection,
/// or answers empty when there are none.
pub(crate) fn get_children(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let target = ctx.target()?.clone();
    let collection: Vec<UiObject> = match target {
        UiObject::Menu(menu) => ctx
            .desktop
            .menu_children(menu)?
            .into_iter()
            .map(UiObject::Menu)
            .collect(),
        UiObject::Control {
            id,
            class: ControlClass::TreeNode,
        } => ctx
            .desktop
            .node_children(id)?
            .into_iter()
            .map(|child| UiObject::Control {
                id: child,
                class: ControlClass::TreeNode,
            })
            .collect(),
        _ => return Err(CommandError::UnsupportedTarget),
    };
    if collection.is_empty() {
        return Ok(Outcome::Empty);
    }
    Ok(Outcome::Handle(
        ctx.registry.put(UiObject::Collection(collection)),
    ))
}
