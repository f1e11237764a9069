//! Type-safe identifiers for remote entities.
//!
//! The remote end hands out opaque strings for sessions, windows and
//! elements. Each kind gets its own newtype so they cannot be mixed up.
//!
//! | Type | Assigned by |
//! |------|-------------|
//! | [`SessionId`] | `POST /session` |
//! | [`WindowHandle`] | `GET /session/{id}/window` and friends |
//! | [`ElementId`] | element discovery endpoints |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::Location;

use serde::{Deserialize, Serialize};

// ============================================================================
// Opaque Ids
// ============================================================================

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a server-assigned id.
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as sent on the wire.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id! {
    /// Session id returned by the new session command.
    SessionId
}

opaque_id! {
    /// Handle of a top-level browsing context.
    WindowHandle
}

opaque_id! {
    /// Web element reference.
    ElementId
}

// ============================================================================
// Provenance
// ============================================================================

/// The place in caller code where an entity or request originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// A source location captured with `#[track_caller]`.
    CallSite(&'static Location<'static>),
    /// No call site was recorded.
    Unavailable,
}

impl Provenance {
    /// Captures the location of the nearest caller not marked `#[track_caller]`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn here() -> Self {
        Self::CallSite(Location::caller())
    }

    /// Provenance for values whose origin was not recorded.
    #[inline]
    #[must_use]
    pub const fn unavailable() -> Self {
        Self::Unavailable
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CallSite(location) => write!(
                f,
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            ),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Server-assigned id plus the provenance of the value holding it.
///
/// Two identities are equal when their ids are equal; provenance is
/// diagnostic metadata only.
#[derive(Debug, Clone)]
pub struct Identity<I> {
    id: I,
    creation: Provenance,
}

impl<I> Identity<I> {
    /// Binds an id to where it was obtained.
    #[inline]
    pub fn new(id: I, creation: Provenance) -> Self {
        Self { id, creation }
    }

    /// Returns the server-assigned id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &I {
        &self.id
    }

    /// Returns where this identity was created.
    #[inline]
    #[must_use]
    pub fn creation(&self) -> Provenance {
        self.creation
    }
}

impl<I: PartialEq> PartialEq for Identity<I> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<I: Eq> Eq for Identity<I> {}

impl<I: Hash> Hash for Identity<I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = ElementId::new("c9f3-11");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c9f3-11\"");
        assert_eq!(id.to_string(), "c9f3-11");
    }

    #[test]
    fn test_identity_equality_ignores_provenance() {
        let a = Identity::new(WindowHandle::new("w1"), Provenance::here());
        let b = Identity::new(WindowHandle::new("w1"), Provenance::unavailable());
        let c = Identity::new(WindowHandle::new("w2"), Provenance::unavailable());

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_provenance_points_at_caller() {
        let here = Provenance::here();
        let text = here.to_string();
        assert!(text.starts_with(file!()), "{text}");
        assert_eq!(Provenance::unavailable().to_string(), "unavailable");
    }
}
