//! Sensitive data marker for automatic redaction
//!
//! Backend API keys, access tokens and passwords travel wrapped in
//! `Sensitive<T>` so they never show up in `Debug` output, log fields or
//! error messages.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use renova_core_types::Sensitive;
///
/// let anon_key = Sensitive::new("eyJhbGciOi...");
/// assert_eq!(format!("{:?}", anon_key), "***REDACTED***");
/// assert_eq!(anon_key.expose(), &"eyJhbGciOi...");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    ///
    /// Only call this at the point where the secret is handed to the wire
    /// (request headers, credential payloads).
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

// Secrets are read from configuration but never written back out, so only
// the deserializing half is provided.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let key = Sensitive::new("anon-key-12345");
        assert_eq!(format!("{:?}", key), "***REDACTED***");
        assert_eq!(format!("{}", key), "***REDACTED***");
    }

    #[test]
    fn test_expose_and_into_inner() {
        let password = Sensitive::new(String::from("hunter2"));
        assert_eq!(password.expose(), "hunter2");
        assert_eq!(password.into_inner(), "hunter2");
    }

    #[test]
    fn test_redacted_inside_struct_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Credentials {
            email: String,
            password: Sensitive<String>,
        }

        let creds = Credentials {
            email: "admin@renova.com".to_string(),
            password: Sensitive::new("secret123".to_string()),
        };

        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("admin@renova.com"));
        assert!(debug_str.contains("***REDACTED***"));
        assert!(!debug_str.contains("secret123"));
    }

    #[test]
    fn test_deserializes_from_plain_value() {
        #[derive(Deserialize)]
        struct RemoteKeys {
            anon_key: Sensitive<String>,
        }

        let keys: RemoteKeys = serde_json::from_str(r#"{"anon_key":"abc"}"#).unwrap();
        assert_eq!(keys.anon_key.expose(), "abc");
    }
}
