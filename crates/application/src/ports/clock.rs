//! Clock port for report timestamps

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Spec reports are stamped through this port so tests can pin the time.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
