//! Best-effort anti-replay bookkeeping for reflected outgoing messages

use reflect_storage_traits::nonces::NonceStorage;
use reflect_storage_traits::nonces::types::{Nonce, NonceScope};

/// What happened to the nonces of one envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonceGuardOutcome {
    /// Nonces recorded by this envelope
    pub stored: usize,
    /// Nonces that were already recorded
    pub skipped: usize,
    /// Nonces that could not be recorded
    pub failed: usize,
    /// Nonces ignored because the message type does not record nonces
    pub not_stored_by_policy: usize,
}

/// Record every nonce of an envelope that is not yet known in `scope`.
///
/// Never fails: an already known nonce is skipped and a failed insert is logged.
pub fn store_nonces<N>(storage: &N, scope: NonceScope, nonces: &[Nonce]) -> NonceGuardOutcome
where
    N: NonceStorage + ?Sized,
{
    let mut outcome = NonceGuardOutcome::default();

    for nonce in nonces {
        match storage.nonce_exists(scope, nonce) {
            Ok(true) => {
                tracing::info!(
                    target: "reflect_core::tasks::nonce_guard",
                    "Skip adding preexisting {} nonce {}",
                    scope,
                    nonce
                );
                outcome.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    target: "reflect_core::tasks::nonce_guard",
                    "Could not check existence of {} nonce {}: {}",
                    scope,
                    nonce,
                    e
                );
            }
        }

        match storage.store_nonce(scope, nonce) {
            Ok(true) => outcome.stored += 1,
            Ok(false) => {
                tracing::warn!(
                    target: "reflect_core::tasks::nonce_guard",
                    "{} nonce {} of outgoing message could not be stored",
                    scope,
                    nonce
                );
                outcome.failed += 1;
            }
            Err(e) => {
                tracing::warn!(
                    target: "reflect_core::tasks::nonce_guard",
                    "{} nonce {} of outgoing message could not be stored: {}",
                    scope,
                    nonce,
                    e
                );
                outcome.failed += 1;
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use reflect_memory_storage::{ReflectMemoryStorage, ValidationLimits};
    use reflect_storage_traits::nonces::error::NonceError;

    use super::*;

    /// Nonce storage that counts calls and can be told to fail
    #[derive(Default)]
    struct CountingNonceStorage {
        inner: ReflectMemoryStorage,
        exists_calls: Cell<usize>,
        store_calls: Cell<usize>,
        fail_exists: bool,
        fail_store: bool,
    }

    impl NonceStorage for CountingNonceStorage {
        fn nonce_exists(&self, scope: NonceScope, nonce: &Nonce) -> Result<bool, NonceError> {
            self.exists_calls.set(self.exists_calls.get() + 1);
            if self.fail_exists {
                return Err(NonceError::DatabaseError("unavailable".to_string()));
            }
            self.inner.nonce_exists(scope, nonce)
        }

        fn store_nonce(&self, scope: NonceScope, nonce: &Nonce) -> Result<bool, NonceError> {
            self.store_calls.set(self.store_calls.get() + 1);
            if self.fail_store {
                return Err(NonceError::DatabaseError("disk full".to_string()));
            }
            self.inner.store_nonce(scope, nonce)
        }

        fn count_nonces(&self, scope: NonceScope) -> Result<usize, NonceError> {
            self.inner.count_nonces(scope)
        }
    }

    fn nonces() -> Vec<Nonce> {
        vec![Nonce::new(vec![1u8; 24]), Nonce::new(vec![2u8; 24])]
    }

    #[test]
    fn test_stores_new_nonces() {
        let storage = CountingNonceStorage::default();

        let outcome = store_nonces(&storage, NonceScope::Csp, &nonces());
        assert_eq!(outcome.stored, 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.failed, 0);
        assert_eq!(storage.count_nonces(NonceScope::Csp).unwrap(), 2);
    }

    #[test]
    fn test_known_nonces_are_not_inserted_again() {
        let storage = CountingNonceStorage::default();
        store_nonces(&storage, NonceScope::Csp, &nonces());
        assert_eq!(storage.store_calls.get(), 2);

        let outcome = store_nonces(&storage, NonceScope::Csp, &nonces());
        assert_eq!(outcome.skipped, 2);
        assert_eq!(outcome.stored, 0);
        // Only the existence checks ran for the replay
        assert_eq!(storage.exists_calls.get(), 4);
        assert_eq!(storage.store_calls.get(), 2);
    }

    #[test]
    fn test_store_failures_are_absorbed() {
        let storage = CountingNonceStorage {
            fail_store: true,
            ..Default::default()
        };

        let outcome = store_nonces(&storage, NonceScope::Csp, &nonces());
        assert_eq!(outcome.failed, 2);
        assert_eq!(outcome.stored, 0);
    }

    #[test]
    fn test_full_store_reports_failure() {
        let storage = CountingNonceStorage {
            inner: ReflectMemoryStorage::with_limits(
                ValidationLimits::default().with_max_nonces_per_scope(1),
            ),
            ..Default::default()
        };

        let outcome = store_nonces(&storage, NonceScope::Csp, &nonces());
        assert_eq!(outcome.stored, 1);
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn test_failed_existence_check_still_attempts_store() {
        let storage = CountingNonceStorage {
            fail_exists: true,
            ..Default::default()
        };

        let outcome = store_nonces(&storage, NonceScope::Csp, &nonces());
        assert_eq!(outcome.stored, 2);
        assert_eq!(storage.store_calls.get(), 2);
    }

    #[test]
    fn test_scopes_are_separate() {
        let storage = CountingNonceStorage::default();
        store_nonces(&storage, NonceScope::Csp, &nonces());

        let outcome = store_nonces(&storage, NonceScope::D2d, &nonces());
        assert_eq!(outcome.stored, 2);
    }
}
