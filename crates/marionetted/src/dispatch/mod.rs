//! Command dispatch for the remote-control protocol.
//!
//! This module implements the request-handling core: the parameter
//! extractor, the command table, the per-request context, and the dispatcher
//! that walks one request through command lookup, target resolution, handler
//! invocation, and response mapping.
//!
//! ## Protocol
//!
//! Clients name a command and, for everything except the bootstrap
//! commands, the handle of the object it targets:
//!
//! ```text
//! GET /?command=click&ref=3
//! GET /?command=getbutton&ref=2&by=automationid&1=ok_button
//! ```
//!
//! A successful command answers 200 with an empty body, a primitive value's
//! textual form, or a freshly minted handle. Caller errors answer 400;
//! anything unclassified answers 500 with the failure's message.

mod context;
mod dispatcher;
mod errors;
mod handlers;
mod outcome;
mod params;
mod table;
mod target;

pub use self::context::CommandContext;
pub use self::dispatcher::Dispatcher;
pub use self::errors::CommandError;
pub use self::outcome::Outcome;
pub use self::params::RequestParams;
pub use self::table::{CommandSpec, HandlerFn, lookup};
pub use self::target::{Target, UiObject};
