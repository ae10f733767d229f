//! Strongly-typed identifiers.
//!
//! Every identifier wraps a ULID: a 48-bit millisecond timestamp followed by
//! 80 random bits, so two identifiers generated in the same run never
//! collide.

use std::fmt;
use ulid::Ulid;

/// Generates a ULID-backed identifier displayed as `<prefix>-<ulid>`.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a new identifier from the current time and fresh randomness.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// Identifies one conversation towards the chat backend.
    ///
    /// Regenerated every time a new conversation starts.
    SessionId,
    "web-session"
);

define_id!(
    /// Identifies one ticket-status poll.
    PollId,
    "poll"
);

define_id!(
    /// Identifies one entry on the display surface.
    EntryId,
    "entry"
);

define_id!(
    /// Identifies one task in a delay queue.
    TaskId,
    "task"
);
