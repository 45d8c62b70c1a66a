//! Newtype IDs for type-safe identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check if the ID is the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a catalog item, and of the cart line holding it.
    ///
    /// Not guaranteed unique: items without an explicit id fall back to
    /// their normalized title.
    ItemId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ItemId::new("sku-123");
        assert_eq!(id.as_str(), "sku-123");
        assert!(!id.is_empty());
        assert!(ItemId::default().is_empty());
    }

    #[test]
    fn test_id_display() {
        let id: ItemId = "sku-789".into();
        assert_eq!(format!("{}", id), "sku-789");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ItemId::new("a");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a\"");
        let back: ItemId = serde_json::from_str("\"b\"").unwrap();
        assert_eq!(back, ItemId::new("b"));
    }

    #[test]
    fn test_borrow_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(ItemId::new("a"), 1);
        assert_eq!(map.get("a"), Some(&1));
    }
}
