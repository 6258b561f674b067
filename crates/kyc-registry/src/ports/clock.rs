//! # Clock Port
//!
//! Time is supplied by a collaborator, never read ad hoc inside the domain,
//! so expiry can be simulated deterministically in tests and replays.

use kyc_types::Timestamp;

/// Injectable source of the current time.
///
/// The registry assumes the supplied time is monotonically non-decreasing
/// across its lifetime and tolerates second-level skew: expiry windows are
/// day-granular and the result is only ever a boolean expired/not-expired
/// determination, never an ordering decision.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn now(&self) -> Timestamp;
}
