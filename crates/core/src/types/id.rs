//! Newtype IDs for type-safe entity references.
//!
//! The Constructo API assigns UUID strings to every entity. Use the
//! `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use constructo_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("6f1c9c1e-6a76-4e24-9f0a-2a6b8f6f6d41");
/// let order_id = OrderId::new("0f2b3a9c-7d4e-4a3a-8b2f-b1e6a59c2a10");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(CategoryId);
define_id!(ProductId);
define_id!(ReviewId);
define_id!(OrderId);

// Payment gateway identifiers live in the gateway's namespace, not ours,
// but mixing them with internal IDs is the same class of bug.
define_id!(GatewayOrderId);
define_id!(GatewayPaymentId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let id = OrderId::new("abc-123");
        assert_eq!(id.to_string(), "abc-123");
    }

    #[test]
    fn test_from_str_and_back() {
        let id = ProductId::from("prod-1");
        assert_eq!(id.as_str(), "prod-1");
        let s: String = id.into();
        assert_eq!(s, "prod-1");
    }

    #[test]
    fn test_serde_transparent() {
        let id = GatewayOrderId::new("order_N5YBKol0zG2qXk");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"order_N5YBKol0zG2qXk\"");

        let parsed: GatewayOrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
