//! Reflect Public Prelude
//!
//! The types needed to feed reflected outgoing messages into a [`ReflectEngine`].
//!
//! ```rust
//! use reflect_core::prelude::*;
//! use reflect_memory_storage::ReflectMemoryStorage;
//!
//! let engine = ReflectEngine::new(
//!     ReflectMemoryStorage::default(),
//!     IdentityString::new("OWNIDENT").unwrap(),
//! );
//! ```

// === Core Types ===
/// Reflect error type and its classification
pub use crate::{Error, ErrorKind};
/// Engine, builder and configuration
pub use crate::{ReflectConfig, ReflectEngine, ReflectEngineBuilder};

// === Envelopes ===
pub use crate::envelope::{ConversationId, CspE2eMessageType, OutgoingMessage};

// === Results and callbacks ===
pub use crate::callback::{GroupCallStartInfo, ReflectCallback};
pub use crate::edit::{EditEnvelope, EditMessage, EditMessageData, GroupEditMessage};
pub use crate::receiver::MessageReceiver;
pub use crate::tasks::nonce_guard::NonceGuardOutcome;
pub use crate::tasks::{ReflectedOutgoingMessageTask, ReflectedOutgoingReport};

// === Storage ===
pub use reflect_storage_traits::nonces::types::{Nonce, NonceScope};
pub use reflect_storage_traits::{
    ConversationKey, GroupId, GroupIdentity, IdentityString, MessageId, ReflectStorageProvider,
    Timestamp,
};
pub use reflect_storage_traits::messages::types as message_types;
