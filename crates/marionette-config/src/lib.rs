//! Command-line configuration for the marionette daemon.
//!
//! The daemon can be started with or without command-line arguments; every
//! option has a working default. Options cover the listen endpoint, logging
//! destinations, and the optional parent process the daemon watches so it can
//! quit itself when its launcher dies.
//!
//! Configuration is parsed with `clap` and validated eagerly: an unusable log
//! directory is reported before the server binds its socket rather than on
//! the first write to the log file.

mod defaults;
mod endpoint;
mod logging;

use std::fs;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;

pub use defaults::{DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, default_log_filter};
pub use endpoint::ServerEndpoint;
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "marionetted", version, about = "HTTP remote-control daemon for desktop automation")]
pub struct Config {
    /// TCP port the daemon listens on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host name or address the daemon binds to.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Directory receiving the daemon log file. Must exist and be writable.
    #[arg(long)]
    pub log_dir: Option<Utf8PathBuf>,

    /// Whether log output is also written to stderr.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub console_output: bool,

    /// Parent process id. The daemon quits itself once this process exits.
    #[arg(long)]
    pub parent: Option<i32>,

    /// Log filter expression (tracing `EnvFilter` syntax).
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_owned(),
            log_dir: None,
            console_output: true,
            parent: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Returns the endpoint the daemon serves on.
    #[must_use]
    pub fn endpoint(&self) -> ServerEndpoint {
        ServerEndpoint::new(self.host.clone(), self.port)
    }

    /// Validates option values that clap cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the log directory does not exist or is
    /// not writable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.log_dir {
            if !dir.is_dir() {
                return Err(ConfigError::LogDirectoryMissing { path: dir.clone() });
            }
            probe_writable(dir)?;
        }
        Ok(())
    }
}

/// Confirms the directory accepts new files by writing and removing a probe.
fn probe_writable(dir: &Utf8PathBuf) -> Result<(), ConfigError> {
    let probe = dir.join(format!(".marionette-probe-{}", std::process::id()));
    let attempt = fs::File::create(&probe).and_then(|mut file| file.write_all(b"probe"));
    let outcome = attempt.map_err(|source| ConfigError::LogDirectoryNotWritable {
        path: dir.clone(),
        source,
    });
    // The probe is best-effort cleanup; a leftover file is harmless.
    let _ = fs::remove_file(&probe);
    outcome
}

/// Errors raised while validating configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The log directory does not exist.
    #[error("log directory '{path}' does not exist")]
    LogDirectoryMissing {
        /// The configured directory.
        path: Utf8PathBuf,
    },
    /// The log directory exists but rejects new files.
    #[error("log directory '{path}' is not writable: {source}")]
    LogDirectoryNotWritable {
        /// The configured directory.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut full = vec!["marionetted"];
        full.extend_from_slice(args);
        match Config::try_parse_from(full) {
            Ok(config) => config,
            Err(error) => panic!("arguments should parse: {error}"),
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = parse(&[]);
        assert_eq!(config.port, 8082);
        assert_eq!(config.host, "localhost");
        assert!(config.log_dir.is_none());
        assert!(config.console_output);
        assert!(config.parent.is_none());
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn parses_explicit_options() {
        let config = parse(&[
            "--port",
            "9000",
            "--host",
            "0.0.0.0",
            "--console-output",
            "false",
            "--parent",
            "4242",
            "--log-format",
            "json",
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(!config.console_output);
        assert_eq!(config.parent, Some(4242));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let result = Config::try_parse_from(["marionetted", "--port", "eighty"]);
        assert!(result.is_err());
    }

    #[test]
    fn endpoint_combines_host_and_port() {
        let config = parse(&["--port", "9001", "--host", "127.0.0.1"]);
        assert_eq!(config.endpoint(), ServerEndpoint::new("127.0.0.1", 9001));
    }

    #[rstest]
    #[case("compact", LogFormat::Compact)]
    #[case("json", LogFormat::Json)]
    fn log_format_round_trips(#[case] text: &str, #[case] expected: LogFormat) {
        let parsed: LogFormat = match text.parse() {
            Ok(format) => format,
            Err(error) => panic!("format should parse: {error}"),
        };
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn validate_accepts_missing_log_dir_option() {
        let config = parse(&[]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_accepts_writable_log_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().display().to_string();
        let config = parse(&["--log-dir", &path]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_log_dir() {
        let config = parse(&["--log-dir", "/nonexistent/marionette-logs"]);
        let error = config.validate().expect_err("validation should fail");
        assert!(matches!(error, ConfigError::LogDirectoryMissing { .. }));
    }
}
