//! Status and classification enums.
//!
//! Wire values are the lowercase strings the backend uses.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Generates `as_str`, `Display` and `FromStr` from one wire-name table.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Wire representation of this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular crew member (browse, message, review).
    #[default]
    User,
    /// Lists crashpads and vacation rentals.
    Host,
    /// Moderates members and content.
    Admin,
    /// Posts gigs.
    Employer,
}

wire_enum!(UserRole, "user role", {
    User => "user",
    Host => "host",
    Admin => "admin",
    Employer => "employer",
});

impl UserRole {
    /// Roles that may publish property listings once approved.
    #[must_use]
    pub const fn lists_properties(self) -> bool {
        matches!(self, Self::Host | Self::Admin)
    }
}

/// Membership approval status.
///
/// Every account starts `Pending`; only an admin moves it to `Approved`
/// or `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

wire_enum!(ApprovalStatus, "approval status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

/// Property listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    /// Shared crew housing near an airport.
    Crashpad,
    /// Short-stay vacation rental.
    Vacation,
}

wire_enum!(PropertyCategory, "property category", {
    Crashpad => "crashpad",
    Vacation => "vacation",
});

/// Mood attached to a layover travel tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipMood {
    Happy,
    Neutral,
    Sad,
}

wire_enum!(TipMood, "tip mood", {
    Happy => "happy",
    Neutral => "neutral",
    Sad => "sad",
});
