//! Structured telemetry initialisation for the daemon.

use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use marionette_config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Name of the log file created inside the configured log directory.
const LOG_FILE_NAME: &str = "marionetted.log";

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to open the log file.
    #[error("failed to open log file '{path}': {source}")]
    LogFile {
        /// The attempted path.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent: the first invocation installs the global
/// subscriber, later ones detect the existing registration and return a
/// fresh [`TelemetryHandle`] without touching global state again.
///
/// # Errors
///
/// Fails when the filter does not parse, the log file cannot be opened, or
/// a conflicting global subscriber is already installed.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| TelemetryHandle)
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let sink = LogSink::from_config(config)?;

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(move || sink.clone())
            // Avoid stray colour codes in log files and non-TTY sinks.
            .with_ansi(config.log_dir.is_none() && io::stderr().is_terminal())
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format {
        LogFormat::Json => {
            let json = builder(filter).json().flatten_event(true).finish();
            Box::new(json)
        }
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

/// Destination for log output: stderr, a log file, both, or nothing.
#[derive(Clone)]
struct LogSink {
    stderr: bool,
    file: Option<Arc<Mutex<File>>>,
}

impl LogSink {
    fn from_config(config: &Config) -> Result<Self, TelemetryError> {
        let file = config
            .log_dir
            .as_ref()
            .map(|dir| {
                let path = dir.join(LOG_FILE_NAME);
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|source| TelemetryError::LogFile {
                        path: path.to_string(),
                        source,
                    })
            })
            .transpose()?
            .map(|file| Arc::new(Mutex::new(file)));
        Ok(Self {
            stderr: config.console_output,
            file,
        })
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = &self.file
            && let Ok(mut guard) = file.lock()
        {
            guard.write_all(buf)?;
        }
        if self.stderr {
            io::stderr().write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = &self.file
            && let Ok(mut guard) = file.lock()
        {
            guard.flush()?;
        }
        if self.stderr {
            io::stderr().flush()?;
        }
        Ok(())
    }
}
