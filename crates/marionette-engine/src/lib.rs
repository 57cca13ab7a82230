//! Simulated desktop automation engine.
//!
//! This crate models the collaborator a remote-control daemon drives: a
//! desktop session holding running applications, their windows, menus, and
//! controls, addressed through typed identifiers and manipulated through
//! synchronous operations.
//!
//! The engine is deliberately self-contained. Programs are *installed* from
//! [`ApplicationBlueprint`]s and *launched* by path, which gives callers a
//! fully scriptable object graph: protocol layers and tests exercise real
//! discovery, input, and lifecycle semantics without a windowing system in
//! the loop.
//!
//! Identifiers are never reclaimed. Operations against closed windows or
//! stopped applications fail with a descriptive [`EngineError`] rather than
//! resolving to a newer object.

mod blueprint;
mod desktop;
mod errors;
mod ids;
mod object;

pub use blueprint::{
    ApplicationBlueprint, ControlBlueprint, ControlKind, ListItemBlueprint, MenuBlueprint,
    ScrollAxisBlueprint, ScrollBlueprint, TreeNodeBlueprint, WindowBlueprint,
};
pub use desktop::Desktop;
pub use errors::EngineError;
pub use ids::{ApplicationId, ControlId, MenuId, WindowId};
pub use object::{ControlClass, Orientation, SearchCriteria, UiItem};
