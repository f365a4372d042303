//! Newtype IDs for type-safe entity references.
//!
//! The backend assigns opaque string identifiers (serialized as `_id`), so
//! every id wraps a `String`. The `define_id!` macro keeps a property id
//! from being passed where a gig id is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()`, `as_str()`, `Display`, `AsRef<str>`
/// - `From<&str>` and `From<String>` implementations
///
/// # Example
///
/// ```rust
/// # use crew_lounge_core::define_id;
/// define_id!(HangarId);
/// define_id!(RunwayId);
///
/// let hangar = HangarId::new("64f0c2");
/// assert_eq!(hangar.as_str(), "64f0c2");
///
/// // Different types, so this won't compile:
/// // let _: RunwayId = hangar;
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
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the raw identifier.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(UserId);
define_id!(PropertyId);
define_id!(LayoverId);
define_id!(RecommendationId);
define_id!(TravelTipId);
define_id!(ReviewId);
define_id!(GigId);
define_id!(MessageId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = PropertyId::new("65a1f3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65a1f3\"");

        let parsed: GigId = serde_json::from_str("\"g-42\"").unwrap();
        assert_eq!(parsed.as_str(), "g-42");
    }

    #[test]
    fn test_display_matches_inner() {
        let id = UserId::from("u1");
        assert_eq!(id.to_string(), "u1");
        assert_eq!(id.into_inner(), "u1");
    }
}
