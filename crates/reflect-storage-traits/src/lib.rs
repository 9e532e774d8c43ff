//! Reflect storage - A set of storage provider traits and types used when replaying
//! reflected outgoing messages into local conversation state.
//!
//! The traits in this crate are the only way `reflect-core` touches durable state.
//! Every concern (nonces, contacts, groups, messages, group calls) has its own trait
//! so that a host can back each one with whatever engine it already uses.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

pub mod contacts;
pub mod conversation;
pub mod error;
pub mod group_calls;
pub mod group_id;
pub mod groups;
pub mod identity;
pub mod message_id;
pub mod messages;
pub mod nonces;
#[cfg(feature = "test-utils")]
pub mod test_utils;
pub mod timestamp;

// Re-export the identifiers for convenience
pub use conversation::ConversationKey;
pub use error::IdError;
pub use group_id::{GroupId, GroupIdentity};
pub use identity::IdentityString;
pub use message_id::MessageId;
pub use timestamp::Timestamp;

use self::contacts::ContactStorage;
use self::group_calls::GroupCallStorage;
use self::groups::GroupStorage;
use self::messages::MessageStorage;
use self::nonces::NonceStorage;

/// Storage provider for reflected outgoing message processing.
///
/// This trait combines all storage requirements of the reflection engine:
/// - Nonce storage for anti-replay bookkeeping
/// - Contact storage for resolving one-to-one conversations
/// - Group storage for resolving group conversations
/// - Message storage for materializing and updating message models
/// - Group call storage for recording group call starts
///
/// It is implemented automatically for every type that implements all of them.
pub trait ReflectStorageProvider:
    NonceStorage + ContactStorage + GroupStorage + MessageStorage + GroupCallStorage
{
}

impl<T> ReflectStorageProvider for T where
    T: NonceStorage + ContactStorage + GroupStorage + MessageStorage + GroupCallStorage
{
}
