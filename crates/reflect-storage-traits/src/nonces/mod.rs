//! Nonces module
//!
//! This module is responsible for remembering one-time nonces so that replayed
//! messages can be recognized.
//!
//! Nonces are grouped by [`NonceScope`](types::NonceScope). Within a scope every nonce
//! value is recorded at most once.

pub mod error;
pub mod types;

use self::error::NonceError;
use self::types::*;

/// Storage traits for the nonces module
///
/// Implementations must tolerate concurrent `nonce_exists` / `store_nonce` pairs for
/// the same nonce: a duplicate insert has to be reported as `Ok(false)`, never as
/// corruption of the stored set.
pub trait NonceStorage {
    /// Check whether a nonce has already been recorded in the given scope
    fn nonce_exists(&self, scope: NonceScope, nonce: &Nonce) -> Result<bool, NonceError>;

    /// Record a nonce in the given scope
    ///
    /// Returns `Ok(true)` if the nonce was persisted and `Ok(false)` if it could not be
    /// persisted (for example because it already exists or the store is full).
    fn store_nonce(&self, scope: NonceScope, nonce: &Nonce) -> Result<bool, NonceError>;

    /// Number of nonces recorded in the given scope
    fn count_nonces(&self, scope: NonceScope) -> Result<usize, NonceError>;
}
