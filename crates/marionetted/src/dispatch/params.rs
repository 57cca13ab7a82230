//! Request parameter extraction.
//!
//! Commands carry their arguments in the query component of the request
//! target: ordinal keys (`1`, `2`, …) for positional parameters plus a small
//! set of named keys (`command`, `ref`, `by`). Values are percent-decoded
//! with `form_urlencoded` before extraction.
//!
//! An empty value is treated identically to an absent one throughout. The
//! protocol has no way to distinguish "omitted" from "explicitly empty", so
//! a client cannot intentionally pass an empty string.

use std::collections::HashMap;

use super::errors::CommandError;

/// Decoded key/value parameters of one request.
#[derive(Debug, Default)]
pub struct RequestParams {
    values: HashMap<String, String>,
}

impl RequestParams {
    /// Decodes the query component of a request target. Repeated keys keep
    /// the last value.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut values = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            values.insert(key.into_owned(), value.into_owned());
        }
        Self { values }
    }

    /// Looks up a named parameter, treating empty values as absent.
    #[must_use]
    pub fn named(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Whether the key appeared in the query at all, even with an empty
    /// value. Used to disambiguate reserved control tokens from commands
    /// aimed at an object.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Fetches a required positional parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::ParameterMissing`] naming `label` and the
    /// ordinal when the value is absent or empty.
    pub fn required(&self, index: u32, label: &str) -> Result<&str, CommandError> {
        self.named(&index.to_string())
            .ok_or_else(|| CommandError::missing_positional(label, index))
    }

    /// Fetches a required named parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::ParameterMissing`] naming `label` when the
    /// value is absent or empty.
    pub fn required_named(&self, key: &str, label: &str) -> Result<&str, CommandError> {
        self.named(key)
            .ok_or_else(|| CommandError::missing_named(label))
    }

    /// Fetches an optional positional parameter.
    #[must_use]
    pub fn optional(&self, index: u32) -> Option<&str> {
        self.named(&index.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn decodes_percent_encoding_and_plus() {
        let params = RequestParams::from_query("command=entertext&1=hello+big%20world");
        assert_eq!(params.named("1"), Some("hello big world"));
        assert_eq!(params.named("command"), Some("entertext"));
    }

    #[rstest]
    #[case("command=click")]
    #[case("command=click&1=")]
    fn empty_value_is_absent(#[case] query: &str) {
        let params = RequestParams::from_query(query);
        assert_eq!(params.optional(1), None);
        let error = params.required(1, "text").expect_err("should be missing");
        assert!(matches!(
            error,
            CommandError::ParameterMissing { index: Some(1), .. }
        ));
    }

    #[test]
    fn contains_sees_empty_values() {
        let params = RequestParams::from_query("command=quit&ref=");
        assert!(params.contains("ref"));
        assert_eq!(params.named("ref"), None);
    }

    #[test]
    fn required_named_reports_label() {
        let params = RequestParams::from_query("command=getbutton");
        let error = params
            .required_named("by", "by")
            .expect_err("should be missing");
        assert_eq!(error.to_string(), "Expected parameter 'by', found none");
    }

    #[test]
    fn repeated_keys_keep_the_last_value() {
        let params = RequestParams::from_query("1=first&1=second");
        assert_eq!(params.optional(1), Some("second"));
    }
}
