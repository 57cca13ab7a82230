//! List and collection commands.

use marionette_engine::{ControlClass, EngineError};

use crate::dispatch::context::CommandContext;
use crate::dispatch::errors::CommandError;
use crate::dispatch::outcome::Outcome;
use crate::dispatch::target::UiObject;

const LIST_CONTROLS: &[ControlClass] = &[ControlClass::ListBox, ControlClass::ComboBox];

/// Selects the list entry whose text matches parameter 1.
pub(crate) fn select_text(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let text = ctx.params().required(1, "text to select")?;
    let control = ctx.control(LIST_CONTROLS)?;
    ctx.desktop.select_in_list(control, text)?;
    Ok(Outcome::Empty)
}

/// Registers the selected entry of the target list or item collection, or
/// answers empty when nothing is selected.
pub(crate) fn get_selected_item(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    if let Ok(control) = ctx.control(LIST_CONTROLS) {
        return match ctx.desktop.selected_item(control)? {
            Some(item) => Ok(Outcome::Handle(ctx.registry.put(UiObject::Control {
                id: item,
                class: ControlClass::ListItem,
            }))),
            None => Ok(Outcome::Empty),
        };
    }
    let items = ctx.collection()?.to_vec();
    for entry in items {
        if let UiObject::Control {
            id,
            class: ControlClass::ListItem,
        } = entry
            && ctx.desktop.is_selected(id)?
        {
            return Ok(Outcome::Handle(ctx.registry.put(UiObject::Control {
                id,
                class: ControlClass::ListItem,
            })));
        }
    }
    Ok(Outcome::Empty)
}

/// Registers the entries of the target list as a collection, or answers
/// empty for a list with no entries.
pub(crate) fn get_list_items(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let control = ctx.control(LIST_CONTROLS)?;
    let items = ctx.desktop.list_items(control)?;
    if items.is_empty() {
        return Ok(Outcome::Empty);
    }
    let collection = items
        .into_iter()
        .map(|id| UiObject::Control {
            id,
            class: ControlClass::ListItem,
        })
        .collect();
    Ok(Outcome::Handle(
        ctx.registry.put(UiObject::Collection(collection)),
    ))
}

/// Registers the collection entry at the index in parameter 1.
pub(crate) fn get_item_by_index(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let raw = ctx.params().required(1, "index")?;
    let index: i64 = raw
        .parse()
        .map_err(|_| CommandError::invalid_input("Incorrect value for index"))?;
    let index = usize::try_from(index)
        .map_err(|_| CommandError::invalid_input("Invalid index"))?;
    let items = ctx.collection()?;
    let entry = items
        .get(index)
        .cloned()
        .ok_or_else(|| CommandError::invalid_input("Invalid index"))?;
    Ok(Outcome::Handle(ctx.registry.put(entry)))
}

/// Registers the collection entry whose text matches parameter 1.
pub(crate) fn get_item_by_text(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    let text = ctx.params().required(1, "text")?;
    let items = ctx.collection()?.to_vec();
    for entry in items {
        if let UiObject::Control { id, .. } = &entry
            && ctx.desktop.text_of(*id)? == text
        {
            return Ok(Outcome::Handle(ctx.registry.put(entry)));
        }
    }
    Err(EngineError::ItemNotFound {
        text: text.to_owned(),
    }
    .into())
}

/// Number of entries in the target collection.
pub(crate) fn get_items_count(ctx: &mut CommandContext<'_>) -> Result<Outcome, CommandError> {
    Ok(Outcome::Count(ctx.collection()?.len()))
}
