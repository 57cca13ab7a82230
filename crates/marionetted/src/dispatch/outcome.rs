//! Success payloads produced by command handlers.

use crate::registry::Handle;

/// What a successful handler hands back to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The command succeeded and has nothing to report.
    Empty,
    /// A freshly minted handle the client should use in later requests.
    Handle(Handle),
    /// A string value.
    Text(String),
    /// A boolean value.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A count of items.
    Count(usize),
}

impl Outcome {
    /// Convenience constructor for text payloads.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The payload's wire form.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Handle(handle) => handle.to_string(),
            Self::Text(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
            Self::Count(value) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_use_plain_textual_forms() {
        assert_eq!(Outcome::Empty.body(), "");
        assert_eq!(Outcome::Handle(crate::registry::Handle::from_wire(7)).body(), "7");
        assert_eq!(Outcome::Bool(true).body(), "true");
        assert_eq!(Outcome::Number(50.0).body(), "50");
        assert_eq!(Outcome::Number(12.5).body(), "12.5");
        assert_eq!(Outcome::Count(3).body(), "3");
        assert_eq!(Outcome::text("hello").body(), "hello");
    }
}
