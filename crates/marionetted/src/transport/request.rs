//! Bounded HTTP request-head parsing.
//!
//! The protocol only uses the request line: every parameter travels in the
//! query component of the request target. Headers are read so the head can
//! be consumed off the stream, but their contents are ignored, and request
//! bodies are never read.

use std::io::{self, Read};

use thiserror::Error;

use crate::dispatch::RequestParams;

/// Maximum size of a request head in bytes.
pub(crate) const MAX_HEAD_BYTES: usize = 8 * 1024;

/// A parsed request.
#[derive(Debug)]
pub struct HttpRequest {
    method: String,
    params: RequestParams,
}

impl HttpRequest {
    /// The request method, verbatim.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Whether response bodies should be written for this request.
    #[must_use]
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("get")
    }

    /// The decoded query parameters.
    #[must_use]
    pub fn params(&self) -> &RequestParams {
        &self.params
    }
}

/// Errors raised while reading or parsing a request head.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The first line was not an HTTP request line.
    #[error("malformed request line")]
    MalformedRequestLine,

    /// The head exceeded [`MAX_HEAD_BYTES`].
    #[error("request head too large")]
    HeadTooLarge,

    /// Reading from the connection failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Reads one request head off the stream.
///
/// Returns `Ok(None)` when the client disconnects without sending anything.
///
/// # Errors
///
/// Fails when the head is oversized, unparseable, or the read fails.
pub fn read_request(stream: &mut impl Read) -> Result<Option<HttpRequest>, RequestError> {
    let Some(head) = read_head(stream)? else {
        return Ok(None);
    };
    parse_head(&head).map(Some)
}

/// Reads bytes until the blank line ending the head, bounded by
/// [`MAX_HEAD_BYTES`]. A client that closes the connection mid-head yields
/// whatever arrived, so a bare request line without headers still parses.
fn read_head(stream: &mut impl Read) -> Result<Option<Vec<u8>>, RequestError> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        let bytes_read = read_with_retry(stream, &mut chunk)?;

        if bytes_read == 0 {
            return Ok(if buffer.is_empty() {
                None
            } else {
                Some(buffer)
            });
        }

        buffer.extend_from_slice(&chunk[..bytes_read]);
        if buffer.len() > MAX_HEAD_BYTES {
            return Err(RequestError::HeadTooLarge);
        }
        if head_complete(&buffer) {
            return Ok(Some(buffer));
        }
    }
}

fn head_complete(buffer: &[u8]) -> bool {
    buffer.windows(4).any(|window| window == b"\r\n\r\n")
        || buffer.windows(2).any(|window| window == b"\n\n")
}

fn read_with_retry(stream: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

/// Parses the request line out of a head.
fn parse_head(head: &[u8]) -> Result<HttpRequest, RequestError> {
    let text = String::from_utf8_lossy(head);
    let request_line = text
        .lines()
        .next()
        .ok_or(RequestError::MalformedRequestLine)?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().ok_or(RequestError::MalformedRequestLine)?;
    let target = parts.next().ok_or(RequestError::MalformedRequestLine)?;
    let version = parts.next().ok_or(RequestError::MalformedRequestLine)?;
    if !version.starts_with("HTTP/") {
        return Err(RequestError::MalformedRequestLine);
    }

    let query = target.split_once('?').map_or("", |(_, query)| query);
    Ok(HttpRequest {
        method: method.to_owned(),
        params: RequestParams::from_query(query),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8]) -> HttpRequest {
        let mut cursor = io::Cursor::new(bytes.to_vec());
        match read_request(&mut cursor) {
            Ok(Some(request)) => request,
            Ok(None) => panic!("expected a request"),
            Err(error) => panic!("request should parse: {error}"),
        }
    }

    #[test]
    fn parses_query_parameters_from_the_request_line() {
        let request = parse(b"GET /?command=click&ref=3 HTTP/1.1\r\nHost: x\r\n\r\n");
        assert!(request.is_get());
        assert_eq!(request.params().named("command"), Some("click"));
        assert_eq!(request.params().named("ref"), Some("3"));
    }

    #[test]
    fn decodes_percent_encoded_values() {
        let request = parse(b"GET /?command=entertext&1=hello%20world HTTP/1.1\r\n\r\n");
        assert_eq!(request.params().named("1"), Some("hello world"));
    }

    #[test]
    fn non_get_methods_are_recognised() {
        let request = parse(b"POST /?command=click&ref=1 HTTP/1.1\r\n\r\n");
        assert!(!request.is_get());
        assert_eq!(request.method(), "POST");
    }

    #[test]
    fn request_without_query_has_no_parameters() {
        let request = parse(b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(request.params().named("command"), None);
    }

    #[test]
    fn empty_connection_yields_none() {
        let mut cursor = io::Cursor::new(Vec::new());
        let result = read_request(&mut cursor);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn garbage_is_a_malformed_request_line() {
        let mut cursor = io::Cursor::new(b"not an http request\r\n\r\n".to_vec());
        let result = read_request(&mut cursor);
        assert!(matches!(result, Err(RequestError::MalformedRequestLine)));
    }

    #[test]
    fn oversized_heads_are_rejected() {
        let mut head = b"GET /?command=click HTTP/1.1\r\n".to_vec();
        head.extend(std::iter::repeat_n(b'a', MAX_HEAD_BYTES + 1));
        let mut cursor = io::Cursor::new(head);
        let result = read_request(&mut cursor);
        assert!(matches!(result, Err(RequestError::HeadTooLarge)));
    }
}
