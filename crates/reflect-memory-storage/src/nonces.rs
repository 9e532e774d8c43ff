//! Memory-based storage implementation of the NonceStorage trait

use reflect_storage_traits::nonces::NonceStorage;
use reflect_storage_traits::nonces::error::NonceError;
use reflect_storage_traits::nonces::types::{Nonce, NonceScope};

use crate::ReflectMemoryStorage;

impl NonceStorage for ReflectMemoryStorage {
    fn nonce_exists(&self, scope: NonceScope, nonce: &Nonce) -> Result<bool, NonceError> {
        let inner = self.inner.read();
        Ok(inner
            .nonces
            .get(&scope)
            .is_some_and(|nonces| nonces.contains(nonce)))
    }

    fn store_nonce(&self, scope: NonceScope, nonce: &Nonce) -> Result<bool, NonceError> {
        if nonce.is_empty() {
            return Err(NonceError::InvalidParameters(
                "Nonce must not be empty".to_string(),
            ));
        }

        let mut inner = self.inner.write();
        let nonces = inner.nonces.entry(scope).or_default();

        if nonces.len() >= self.limits.max_nonces_per_scope {
            return Ok(false);
        }

        // `insert` returns false for a nonce that is already present
        Ok(nonces.insert(nonce.clone()))
    }

    fn count_nonces(&self, scope: NonceScope) -> Result<usize, NonceError> {
        let inner = self.inner.read();
        Ok(inner.nonces.get(&scope).map_or(0, |nonces| nonces.len()))
    }
}
