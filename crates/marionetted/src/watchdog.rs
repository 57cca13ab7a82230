//! Parent-process watchdog.
//!
//! When the daemon is launched from inside another program, that program
//! passes its own process id via `--parent`. A background thread polls for
//! the parent's existence and, once it is gone, asks the server to quit by
//! sending the termination token to its own endpoint. The watchdog is just
//! another HTTP client and never touches the registry. The process is only
//! force-exited when the orderly quit request fails.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use tracing::{error, info};

use marionette_config::ServerEndpoint;

pub(crate) const WATCHDOG_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::watchdog");

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Starts the watchdog thread for `parent`. Returns immediately; the thread
/// runs for the remainder of the process lifetime.
pub fn watch_parent(parent: i32, endpoint: ServerEndpoint) {
    thread::Builder::new()
        .name("parent-watchdog".to_owned())
        .spawn(move || watch(parent, &endpoint))
        .map(|_| ())
        .unwrap_or_else(|error| {
            error!(
                target: WATCHDOG_TARGET,
                error = %error,
                "failed to start watchdog thread"
            );
        });
}

fn watch(parent: i32, endpoint: &ServerEndpoint) {
    info!(target: WATCHDOG_TARGET, parent, "watching parent process");
    while parent_alive(parent) {
        thread::sleep(POLL_INTERVAL);
    }
    info!(
        target: WATCHDOG_TARGET,
        parent,
        "parent process exited; requesting quit"
    );
    if let Err(message) = send_quit(endpoint) {
        error!(
            target: WATCHDOG_TARGET,
            message,
            "orderly exit failed; force quitting"
        );
        std::process::exit(1);
    }
}

/// Asks the server loop to stop by sending the termination token.
pub(crate) fn send_quit(endpoint: &ServerEndpoint) -> Result<(), String> {
    let mut stream = TcpStream::connect((endpoint.host(), endpoint.port()))
        .map_err(|error| format!("connect to {endpoint}: {error}"))?;
    let request = format!(
        "GET /?command=quit HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        endpoint.host()
    );
    stream
        .write_all(request.as_bytes())
        .map_err(|error| format!("send quit request: {error}"))?;
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .map_err(|error| format!("read quit response: {error}"))?;
    if response.starts_with("HTTP/1.1 200") {
        Ok(())
    } else {
        Err(format!(
            "server answered '{}'",
            response.lines().next().unwrap_or_default()
        ))
    }
}

#[cfg(unix)]
fn parent_alive(pid: i32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    // Signal 0 probes for existence without delivering anything. EPERM
    // still means the process exists.
    match kill(Pid::from_raw(pid), None) {
        Ok(()) | Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn parent_alive(_pid: i32) -> bool {
    tracing::warn!(
        target: WATCHDOG_TARGET,
        "parent watching is not supported on this platform; watchdog idle"
    );
    // Treat the parent as immortal rather than quitting spuriously.
    true
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn own_process_is_alive() {
        let pid = i32::try_from(std::process::id()).expect("pid fits");
        assert!(parent_alive(pid));
    }

    #[test]
    fn exited_child_is_not_alive() {
        let mut child = std::process::Command::new("true")
            .spawn()
            .expect("spawn child");
        let pid = i32::try_from(child.id()).expect("pid fits");
        child.wait().expect("wait for child");
        assert!(!parent_alive(pid));
    }
}
