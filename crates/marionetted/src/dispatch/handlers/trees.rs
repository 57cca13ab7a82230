//! Tree and tree-node commands.

use marionette_engine::ControlClass;

use crate::dispatch::context::CommandContext;
use crate::dispatch::errors::CommandError;
use crate::dispatch::outcome::Outcome;
use crate::dispatch::target::UiObject;

fn node_object(id: marionette_engine::ControlId) -> UiObject {
    UiObject::Control {
        id,
        class: ControlClass::TreeNode,
    }
}

/// Registers the root nodes of the target tree as a collection, or answers
/// empty for a tree with no nodes.
pub(crate) fn get_nodes(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let tree = ctx.control(&[ControlClass::Tree])?;
    let nodes = ctx.desktop.tree_nodes(tree)?;
    if nodes.is_empty() {
        return Ok(Outcome::Empty);
    }
    let collection = nodes.into_iter().map(node_object).collect();
    Ok(Outcome::Handle(
        ctx.registry.put(UiObject::Collection(collection)),
    ))
}

/// Finds a direct node of the target tree or tree node by the text in
/// parameter 1.
pub(crate) fn get_node(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let text = ctx.params().required(1, "node text")?;
    let target = ctx.target()?.clone();
    let node = match target {
        UiObject::Control {
            id,
            class: ControlClass::Tree,
        } => ctx.desktop.tree_node(id, text)?,
        UiObject::Control {
            id,
            class: ControlClass::TreeNode,
        } => ctx.desktop.child_node(id, text)?,
        _ => return Err(CommandError::UnsupportedTarget),
    };
    Ok(Outcome::Handle(ctx.registry.put(node_object(node))))
}

/// Registers the selected node of the target tree, or answers empty when
/// nothing is selected.
pub(crate) fn get_selected_node(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let tree = ctx.control(&[ControlClass::Tree])?;
    match ctx.desktop.selected_node(tree)? {
        Some(node) => Ok(Outcome::Handle(ctx.registry.put(node_object(node)))),
        None => Ok(Outcome::Empty),
    }
}

pub(crate) fn expand(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let node = ctx.control(&[ControlClass::TreeNode])?;
    ctx.desktop.set_expanded(node, true)?;
    Ok(Outcome::Empty)
}

pub(crate) fn collapse(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let node = ctx.control(&[ControlClass::TreeNode])?;
    ctx.desktop.set_expanded(node, false)?;
    Ok(Outcome::Empty)
}

pub(crate) fn is_expanded(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let node = ctx.control(&[ControlClass::TreeNode])?;
    Ok(Outcome::Bool(ctx.desktop.is_expanded(node)?))
}

pub(crate) fn select_tree_node(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let node = ctx.control(&[ControlClass::TreeNode])?;
    ctx.desktop.select_node(node)?;
    Ok(Outcome::Empty)
}

pub(crate) fn deselect_tree_node(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let node = ctx.control(&[ControlClass::TreeNode])?;
    ctx.desktop.deselect_node(node)?;
    Ok(Outcome::Empty)
}
