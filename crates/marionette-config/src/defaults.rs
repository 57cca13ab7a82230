//! Default values shared by the daemon and its tests.

/// Default TCP port the daemon listens on.
pub const DEFAULT_PORT: u16 = 8082;

/// Default host name the daemon binds to.
pub const DEFAULT_HOST: &str = "localhost";

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the daemon.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}
