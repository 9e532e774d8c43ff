//! Nonce storage test functions

use reflect_storage_traits::nonces::NonceStorage;
use reflect_storage_traits::nonces::types::{Nonce, NonceScope};

/// A stored nonce is reported as existing
pub fn test_store_and_check_nonce<S>(storage: S)
where
    S: NonceStorage,
{
    let nonce = Nonce::new(vec![1u8; 24]);

    assert!(!storage.nonce_exists(NonceScope::Csp, &nonce).unwrap());
    assert!(storage.store_nonce(NonceScope::Csp, &nonce).unwrap());
    assert!(storage.nonce_exists(NonceScope::Csp, &nonce).unwrap());
    assert_eq!(storage.count_nonces(NonceScope::Csp).unwrap(), 1);
}

/// Storing the same nonce twice never fails, the second store is not persisted
pub fn test_duplicate_nonce<S>(storage: S)
where
    S: NonceStorage,
{
    let nonce = Nonce::new(vec![2u8; 24]);

    assert!(storage.store_nonce(NonceScope::Csp, &nonce).unwrap());
    assert!(!storage.store_nonce(NonceScope::Csp, &nonce).unwrap());
    assert_eq!(storage.count_nonces(NonceScope::Csp).unwrap(), 1);
}

/// Scopes are independent of each other
pub fn test_nonce_scopes_are_isolated<S>(storage: S)
where
    S: NonceStorage,
{
    let nonce = Nonce::new(vec![3u8; 24]);

    storage.store_nonce(NonceScope::Csp, &nonce).unwrap();
    assert!(storage.nonce_exists(NonceScope::Csp, &nonce).unwrap());
    assert!(!storage.nonce_exists(NonceScope::D2d, &nonce).unwrap());
    assert_eq!(storage.count_nonces(NonceScope::D2d).unwrap(), 0);
}
