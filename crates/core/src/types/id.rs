//! Record identifiers.
//!
//! Stored records carry a numeric `id` derived from the wall clock in
//! milliseconds. Plain timestamps collide when two records are created in the
//! same millisecond, so [`RecordId::generate`] hands out strictly increasing
//! values within a process: if the clock has not moved past the last issued
//! id, the next id is the last one plus one.

use core::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Last id issued by [`RecordId::generate`] in this process.
static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Identifier of a stored record (customer, order or reservation).
///
/// Serialized as a bare JSON number so existing collection files stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Create an ID from a raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Generate a new time-ordered id.
    ///
    /// The value is the current Unix time in milliseconds, unless that would
    /// not be greater than the previously issued id.
    #[must_use]
    pub fn generate() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let next = now.max(last.saturating_add(1));
            match LAST_ISSUED.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return Self(next),
                Err(current) => last = current,
            }
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}
