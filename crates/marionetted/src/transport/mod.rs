//! HTTP transport for the remote-control protocol.
//!
//! One endpoint, `GET`-style query parameters, one response per request.
//! The listener accepts connections strictly sequentially and hands
//! everything that is not a reserved control token to the dispatcher.

mod listener;
mod request;
mod response;

pub use self::listener::{Server, ServerError};
pub use self::request::{HttpRequest, RequestError};
pub use self::response::WireResponse;

pub(crate) const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");
