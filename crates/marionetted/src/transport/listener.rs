//! The server's accept loop.
//!
//! Strictly sequential: one request is accepted, dispatched, and answered
//! before the next is accepted. Mutual exclusion over the registry and the
//! engine is structural; no locking is involved anywhere in the request
//! path. A handler that blocks therefore blocks the whole service, which is
//! an accepted property of an automation session bounded by its driver.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::ops::ControlFlow;

use marionette_engine::Desktop;
use thiserror::Error;
use tracing::{info, warn};

use marionette_config::ServerEndpoint;

use crate::dispatch::{Dispatcher, UiObject};
use crate::registry::ObjectRegistry;

use super::SERVER_TARGET;
use super::request::{self, RequestError};
use super::response::WireResponse;

/// Reserved liveness token: answered without touching the dispatcher.
const PING_COMMAND: &str = "ping";
/// Reserved termination token: stops the accept loop.
const QUIT_COMMAND: &str = "quit";

/// Errors raised while binding the server socket.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The host name failed to resolve.
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolve {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
        /// Underlying resolver error.
        #[source]
        source: io::Error,
    },

    /// The host name resolved to no usable address.
    #[error("no addresses found for {host}:{port}")]
    ResolveEmpty {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
    },

    /// Binding the listener failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that was attempted.
        addr: SocketAddr,
        /// Underlying bind error.
        #[source]
        source: io::Error,
    },

    /// Accepting a connection failed in a way the loop cannot recover from.
    #[error("failed to accept a connection: {0}")]
    Accept(#[source] io::Error),
}

/// The single-threaded remote-control server.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    registry: ObjectRegistry<UiObject>,
    desktop: Desktop,
    dispatcher: Dispatcher,
}

impl Server {
    /// Binds the endpoint and prepares an empty handle registry over the
    /// given engine.
    ///
    /// # Errors
    ///
    /// Fails when the host does not resolve or the port cannot be bound.
    pub fn bind(endpoint: &ServerEndpoint, desktop: Desktop) -> Result<Self, ServerError> {
        let listener = bind_tcp(endpoint.host(), endpoint.port())?;
        Ok(Self {
            listener,
            registry: ObjectRegistry::new(),
            desktop,
            dispatcher: Dispatcher::new(),
        })
    }

    /// The address actually bound, useful when the configured port was 0.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the socket has no local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until the termination token arrives.
    ///
    /// # Errors
    ///
    /// Fails only on unrecoverable accept errors; per-connection failures
    /// are answered or logged and the loop continues.
    pub fn run(mut self) -> Result<(), ServerError> {
        info!(
            target: SERVER_TARGET,
            addr = %self.local_addr().map_or_else(|_| "unknown".to_owned(), |addr| addr.to_string()),
            "server accepting requests"
        );
        loop {
            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(error) if error.kind() == io::ErrorKind::ConnectionAborted => {
                    warn!(target: SERVER_TARGET, error = %error, "accept failed; retrying");
                    continue;
                }
                Err(error) => return Err(ServerError::Accept(error)),
            };
            tracing::debug!(target: SERVER_TARGET, peer = %peer, "connection accepted");
            if self.serve_connection(stream).is_break() {
                info!(target: SERVER_TARGET, "termination token received; shutting down");
                return Ok(());
            }
        }
    }

    /// Handles one connection end to end. Returns `Break` when the
    /// termination token was served.
    fn serve_connection(&mut self, mut stream: TcpStream) -> ControlFlow<()> {
        let request = match request::read_request(&mut stream) {
            Ok(Some(request)) => request,
            Ok(None) => return ControlFlow::Continue(()),
            Err(error @ (RequestError::MalformedRequestLine | RequestError::HeadTooLarge)) => {
                respond(&mut stream, &WireResponse::bad_request(error.to_string()), true);
                return ControlFlow::Continue(());
            }
            Err(error) => {
                warn!(target: SERVER_TARGET, error = %error, "failed to read request");
                return ControlFlow::Continue(());
            }
        };

        let include_body = request.is_get();
        let params = request.params();

        let Some(command) = params.named("command") else {
            respond(
                &mut stream,
                &WireResponse::bad_request("Expected a command, found none"),
                include_body,
            );
            return ControlFlow::Continue(());
        };

        // The reserved tokens only apply when no handle parameter is
        // present, so an object command that happens to share a name still
        // reaches the dispatcher.
        if command == QUIT_COMMAND && !params.contains("ref") {
            info!(target: SERVER_TARGET, "quit requested");
            respond(&mut stream, &WireResponse::ok("Bye bye!"), include_body);
            return ControlFlow::Break(());
        }
        if command == PING_COMMAND && !params.contains("ref") {
            respond(&mut stream, &WireResponse::ok("pong"), include_body);
            return ControlFlow::Continue(());
        }

        info!(target: SERVER_TARGET, command, "processing command");
        let response =
            self.dispatcher
                .dispatch(command, params, &mut self.registry, &mut self.desktop);
        respond(&mut stream, &response, include_body);
        ControlFlow::Continue(())
    }
}

fn respond(stream: &mut TcpStream, response: &WireResponse, include_body: bool) {
    if let Err(error) = response.write_to(stream, include_body) {
        warn!(target: SERVER_TARGET, error = %error, "failed to write response");
    }
}

fn bind_tcp(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| ServerError::Resolve {
            host: host.to_owned(),
            port,
            source,
        })?;
    let addr = addrs
        .find(|addr| matches!(addr, SocketAddr::V4(_) | SocketAddr::V6(_)))
        .ok_or_else(|| ServerError::ResolveEmpty {
            host: host.to_owned(),
            port,
        })?;
    TcpListener::bind(addr).map_err(|source| ServerError::Bind { addr, source })
}
