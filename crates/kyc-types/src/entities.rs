//! # Core Domain Primitives
//!
//! Defines the identifier and timestamp types used by every record in the
//! registry.
//!
//! ## Type Decisions
//!
//! - `Address` is `[u8; 20]` - an Ethereum-style account identifier. The
//!   boundary layer establishes who the caller is before any core operation
//!   runs; the core only compares addresses for equality.
//! - `Timestamp` is `u64` Unix seconds. Expiry windows are day-granular, so
//!   second resolution is more than sufficient.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A 32-byte content fingerprint (SHA-256 of externally stored ciphertext).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style account address.
///
/// Opaque to the core: never derived, never dereferenced, only compared.
pub type Address = [u8; 20];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Sentinel expiry meaning "never expires".
pub const NEVER_EXPIRES: Timestamp = 0;

/// Seconds per validity day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Compute the 32-byte fingerprint of externally stored ciphertext.
///
/// The registry stores only this digest and an opaque locator; the ciphertext
/// itself never enters the core. Boundary layers call this over the encrypted
/// blob (or its content identifier) before registration.
#[must_use]
pub fn fingerprint_bytes(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Render an address as a `0x`-prefixed hex string.
#[must_use]
pub fn address_to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a `0x`-prefixed (or bare) hex string into an address.
///
/// Returns `None` if the input is not exactly 20 bytes of hex.
#[must_use]
pub fn address_from_hex(input: &str) -> Option<Address> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(stripped).ok()?;
    let mut address = [0u8; 20];
    if bytes.len() != address.len() {
        return None;
    }
    address.copy_from_slice(&bytes);
    Some(address)
}

/// Validity window for a registration, in whole days.
///
/// `0` means the registration never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidityDays(pub u64);

impl ValidityDays {
    /// A registration that never expires.
    pub const NEVER: Self = Self(0);

    /// Compute the expiry timestamp relative to `now`.
    ///
    /// Returns [`NEVER_EXPIRES`] when the window is zero days.
    #[must_use]
    pub fn expires_at(self, now: Timestamp) -> Timestamp {
        if self.0 == 0 {
            NEVER_EXPIRES
        } else {
            now + self.0 * SECONDS_PER_DAY
        }
    }
}
