//! Per-request dispatch context.
//!
//! All state a handler may touch is threaded through this value explicitly:
//! the registry, the engine, the request parameters, and the resolved
//! target. Nothing is ambient, so the context (and everything reachable from
//! it) dies with the request.

use marionette_engine::{
    ApplicationId, ControlClass, ControlId, Desktop, Orientation, SearchCriteria, UiItem, WindowId,
};

use crate::registry::{Handle, ObjectRegistry};

use super::errors::CommandError;
use super::params::RequestParams;
use super::target::{Target, UiObject};

/// State available to a handler for the duration of one request.
pub struct CommandContext<'a> {
    /// The handle registry, for resolving and minting handles.
    pub registry: &'a mut ObjectRegistry<UiObject>,
    /// The automation engine.
    pub desktop: &'a mut Desktop,
    params: &'a RequestParams,
    target: Option<Target>,
}

impl<'a> CommandContext<'a> {
    /// Context for a bootstrap command, which runs without a target.
    pub fn new(
        registry: &'a mut ObjectRegistry<UiObject>,
        desktop: &'a mut Desktop,
        params: &'a RequestParams,
    ) -> Self {
        Self {
            registry,
            desktop,
            params,
            target: None,
        }
    }

    /// Context for a command whose handle has been resolved.
    pub fn with_target(
        registry: &'a mut ObjectRegistry<UiObject>,
        desktop: &'a mut Desktop,
        params: &'a RequestParams,
        target: Target,
    ) -> Self {
        Self {
            registry,
            desktop,
            params,
            target: Some(target),
        }
    }

    /// The request's parameters.
    #[must_use]
    pub fn params(&self) -> &'a RequestParams {
        self.params
    }

    /// The resolved target object.
    ///
    /// # Errors
    ///
    /// Fails internally when called from a bootstrap handler; the command
    /// table guarantees targeted handlers always have a target.
    pub fn target(&self) -> Result<&UiObject, CommandError> {
        self.target
            .as_ref()
            .map(|target| &target.object)
            .ok_or_else(|| CommandError::internal("handler ran without a resolved target"))
    }

    /// The handle the request resolved.
    ///
    /// # Errors
    ///
    /// Fails internally when no target was resolved.
    pub fn current_handle(&self) -> Result<Handle, CommandError> {
        self.target
            .as_ref()
            .map(|target| target.handle)
            .ok_or_else(|| CommandError::internal("handler ran without a resolved target"))
    }

    /// Removes the current handle's registry entry. Used by terminal
    /// lifecycle commands after closing the referent.
    ///
    /// # Errors
    ///
    /// Fails internally when the entry has vanished between resolution and
    /// removal, which indicates a daemon bug.
    pub fn remove_current(&mut self) -> Result<(), CommandError> {
        let handle = self.current_handle()?;
        self.registry
            .remove(handle)
            .map(|_| ())
            .map_err(|error| CommandError::internal(error.to_string()))
    }

    /// Asserts the target is an application.
    ///
    /// # Errors
    ///
    /// Fails with the wrong-target kind otherwise.
    pub fn application(&self) -> Result<ApplicationId, CommandError> {
        match self.target()? {
            UiObject::Application(id) => Ok(*id),
            _ => Err(CommandError::UnsupportedTarget),
        }
    }

    /// Asserts the target is a window.
    ///
    /// # Errors
    ///
    /// Fails with the wrong-target kind otherwise.
    pub fn window(&self) -> Result<WindowId, CommandError> {
        match self.target()? {
            UiObject::Window(id) => Ok(*id),
            _ => Err(CommandError::UnsupportedTarget),
        }
    }

    /// Asserts the target is a window or control.
    ///
    /// # Errors
    ///
    /// Fails with the wrong-target kind otherwise.
    pub fn ui_item(&self) -> Result<UiItem, CommandError> {
        self.target()?
            .as_ui_item()
            .ok_or(CommandError::UnsupportedTarget)
    }

    /// Asserts the target is a control of one of the listed classes.
    ///
    /// # Errors
    ///
    /// Fails with the wrong-target kind otherwise.
    pub fn control(&self, accepted: &[ControlClass]) -> Result<ControlId, CommandError> {
        match self.target()? {
            UiObject::Control { id, class } if accepted.contains(class) => Ok(*id),
            _ => Err(CommandError::UnsupportedTarget),
        }
    }

    /// Asserts the target is a collection.
    ///
    /// # Errors
    ///
    /// Fails with the wrong-target kind otherwise.
    pub fn collection(&self) -> Result<&[UiObject], CommandError> {
        match self.target()? {
            UiObject::Collection(items) => Ok(items),
            _ => Err(CommandError::UnsupportedTarget),
        }
    }

    /// Asserts the target is a scroll bar.
    ///
    /// # Errors
    ///
    /// Fails with the wrong-target kind otherwise.
    pub fn scroll_bar(&self) -> Result<(UiItem, Orientation), CommandError> {
        match self.target()? {
            UiObject::ScrollBar { item, orientation } => Ok((*item, *orientation)),
            _ => Err(CommandError::UnsupportedTarget),
        }
    }

    /// Builds search criteria from the `by` discriminator and positional
    /// parameter 1, the shape shared by every finder command.
    ///
    /// # Errors
    ///
    /// Fails when `by` or the value parameter is missing, or when `by` is
    /// not a recognised discriminator.
    pub fn search_criteria(&self) -> Result<SearchCriteria, CommandError> {
        let by = self.params.required_named("by", "by")?;
        match by {
            "automationid" => {
                let value = self.params.required(1, "automation id")?;
                Ok(SearchCriteria::AutomationId(value.to_owned()))
            }
            "text" => {
                let value = self.params.required(1, "text")?;
                Ok(SearchCriteria::Text(value.to_owned()))
            }
            _ => Err(CommandError::invalid_input("Incorrect value for 'by'")),
        }
    }
}
