use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for visitor-supplied contact data (emails, phone numbers) that
/// redacts the value in `Debug` and `Display` output so it cannot end up in
/// log lines, while still serializing the real value for persistence.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> AsRef<T> for Sensitive<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: AsRef<str>> Sensitive<T> {
    /// Redacted preview: first character plus length, e.g. `a… (14 chars)`.
    /// Safe to put in log fields when some corroborating detail is needed.
    pub fn preview(&self) -> String {
        let s = self.0.as_ref();
        match s.chars().next() {
            Some(first) => format!("{first}… ({} chars)", s.chars().count()),
            None => "(empty)".to_string(),
        }
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[redacted]")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[redacted]")
    }
}

impl<T: Serialize> Serialize for Sensitive<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Redaction is for logs only; the stored record keeps the real value.
        self.0.serialize(serializer)
    }
}

impl From<String> for Sensitive<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}
