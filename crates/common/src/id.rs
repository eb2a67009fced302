//! Entity ID generation.
//!
//! All rows use lowercase ULID strings as primary keys: sortable by
//! creation time, URL-safe, and cheap to generate without a database
//! round-trip.

use ulid::Ulid;

/// Generator for row identifiers.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Produce a fresh 26-character lowercase ULID.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}
