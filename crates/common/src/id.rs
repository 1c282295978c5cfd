//! ID generation.

use ulid::Ulid;

/// Generator for entity primary keys.
///
/// Keys are lowercase ULIDs: time-ordered, so `ORDER BY id` on the friend
/// request ledger doubles as creation order.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ID.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}
