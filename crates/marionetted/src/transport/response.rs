//! Wire response representation and serialisation.

use std::io::{self, Write};

/// Status and body of one response.
///
/// Built by the dispatcher (or by the server loop for transport-level
/// failures and the reserved control tokens) and serialised exactly once per
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    status: u16,
    body: String,
}

impl WireResponse {
    /// Builds a response from its parts.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// A 400 response.
    #[must_use]
    pub fn bad_request(body: impl Into<String>) -> Self {
        Self::new(400, body)
    }

    /// The HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Serialises the response as HTTP/1.1 with `Connection: close`.
    ///
    /// The body is omitted for non-GET requests; side effects still applied,
    /// the client only loses the payload.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when writing fails.
    pub fn write_to(&self, writer: &mut impl Write, include_body: bool) -> io::Result<()> {
        let body = if include_body {
            self.body.as_bytes()
        } else {
            &[]
        };
        write!(
            writer,
            "HTTP/1.1 {} {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            reason(self.status),
            body.len(),
        )?;
        writer.write_all(body)?;
        writer.flush()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_status_headers_and_body() {
        let mut output = Vec::new();
        WireResponse::ok("pong")
            .write_to(&mut output, true)
            .expect("write");
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\npong"));
    }

    #[test]
    fn omits_body_for_non_get_requests() {
        let mut output = Vec::new();
        WireResponse::bad_request("Expected ref id, found none")
            .write_to(&mut output, false)
            .expect("write");
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }
}
