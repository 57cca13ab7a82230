//! Remote-control daemon for desktop automation.
//!
//! The daemon exposes a stateful, handle-based protocol over plain HTTP:
//! clients drive an automation engine by issuing named commands against
//! opaque integer handles the server hands out and tracks. The moving parts
//! are the handle registry, the command dispatch core, and the sequential
//! HTTP transport loop; everything around them (configuration, telemetry,
//! the parent-process watchdog) is glue.
//!
//! ## Session shape
//!
//! A session starts with a bootstrap command (`launch` or `attach`), which
//! mints the first handle. Every later command resolves its `ref` parameter
//! from scratch against the registry; there is no cross-request state beyond
//! the handle table itself. The session ends when a client (or the watchdog)
//! sends the reserved `quit` token.
//!
//! Requests are served strictly one at a time. The registry needs no
//! locking because only one handler body ever executes at once; a
//! reimplementation introducing concurrency would have to revisit that
//! along with a policy for racing operations on the same handle.

mod dispatch;
mod registry;
mod telemetry;
mod transport;
mod watchdog;

use thiserror::Error;
use tracing::info;

use marionette_config::{Config, ConfigError};
use marionette_engine::Desktop;

pub use dispatch::{
    CommandContext, CommandError, CommandSpec, Dispatcher, HandlerFn, Outcome, RequestParams,
    Target, UiObject, lookup,
};
pub use registry::{Handle, ObjectRegistry, RegistryError};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{HttpRequest, RequestError, Server, ServerError, WireResponse};
pub use watchdog::watch_parent;

const RUNTIME_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::runtime");

/// Errors surfaced while bringing the daemon up.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Configuration validation failed.
    #[error("invalid configuration: {source}")]
    Configuration {
        /// Underlying validation error.
        #[from]
        source: ConfigError,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[from]
        source: TelemetryError,
    },
    /// The server socket could not be bound.
    #[error("failed to start server: {source}")]
    Server {
        /// Underlying server error.
        #[from]
        source: ServerError,
    },
}

/// Runs the daemon to completion: validates configuration, initialises
/// telemetry, starts the watchdog when a parent is configured, and serves
/// requests until the termination token arrives.
///
/// # Errors
///
/// Fails when configuration is unusable or the endpoint cannot be bound.
pub fn run(config: &Config) -> Result<(), LaunchError> {
    config.validate()?;
    let _telemetry = telemetry::initialise(config)?;
    info!(
        target: RUNTIME_TARGET,
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %config.endpoint(),
        "marionetted starting"
    );

    if let Some(parent) = config.parent {
        watchdog::watch_parent(parent, config.endpoint());
    }

    let server = Server::bind(&config.endpoint(), Desktop::new())?;
    info!(
        target: RUNTIME_TARGET,
        endpoint = %config.endpoint(),
        "started"
    );
    server.run()?;
    Ok(())
}
