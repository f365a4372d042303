//! Observable session state.

use crew_lounge_core::{Permissions, User};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Nothing has been checked yet.
    #[default]
    Unknown,
    /// An auth operation is in flight.
    Loading,
    /// A member is signed in.
    Authenticated,
    /// Nobody is signed in.
    Anonymous,
}

/// Point-in-time view of a [`Session`](super::Session).
///
/// Authorization flags are methods over `user` rather than stored fields,
/// so they always agree with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub user: Option<User>,
    /// True while bootstrap, login, register, logout or a profile change
    /// is in flight.
    pub loading: bool,
    /// Human-readable failure of the last operation. Cleared when the next
    /// operation starts.
    pub last_error: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn permissions(&self) -> Permissions {
        Permissions::for_user(self.user.as_ref())
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.permissions().is_approved
    }

    #[must_use]
    pub fn can_add_listings(&self) -> bool {
        self.permissions().can_add_listings
    }

    /// Phase to settle in once an operation finishes.
    pub(super) const fn settled_phase(&self) -> SessionPhase {
        if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }
}
