//! Memory-based storage implementation for Reflect.
//!
//! This crate provides a memory-based implementation of every storage trait in
//! `reflect-storage-traits`, so it can be used wherever a `ReflectStorageProvider`
//! is expected.
//!
//! Memory-based storage is non-persistent and will be cleared when the application terminates.
//! It's useful for testing or ephemeral applications where persistence isn't required.
//!
//! ## Memory Exhaustion Protection
//!
//! The following limits are enforced (with configurable defaults via [`ValidationLimits`]):
//!
//! - [`DEFAULT_MAX_MESSAGES_PER_CONVERSATION`]: Maximum messages stored per conversation
//! - [`DEFAULT_MAX_NONCES_PER_SCOPE`]: Maximum nonces recorded per nonce scope
//! - [`DEFAULT_MAX_GROUP_MEMBERS`]: Maximum members of a single group
//!
//! ```rust
//! use reflect_memory_storage::{ReflectMemoryStorage, ValidationLimits};
//!
//! let limits = ValidationLimits::default()
//!     .with_max_group_members(64)
//!     .with_max_messages_per_conversation(5000);
//!
//! let storage = ReflectMemoryStorage::with_limits(limits);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

use std::collections::{HashMap, HashSet};
use std::fmt;

use parking_lot::RwLock;
use reflect_storage_traits::contacts::types::Contact;
use reflect_storage_traits::group_calls::types::GroupCallStart;
use reflect_storage_traits::groups::types::Group;
use reflect_storage_traits::messages::types::Message;
use reflect_storage_traits::nonces::types::{Nonce, NonceScope};
use reflect_storage_traits::{ConversationKey, GroupIdentity, IdentityString, MessageId};

mod contacts;
mod group_calls;
mod groups;
mod messages;
mod nonces;

/// Default maximum number of messages stored per conversation.
/// When this limit is reached, the oldest message of the conversation is evicted.
pub const DEFAULT_MAX_MESSAGES_PER_CONVERSATION: usize = 10000;

/// Default maximum number of nonces recorded per scope.
/// Once reached, further nonces are reported as not stored.
pub const DEFAULT_MAX_NONCES_PER_SCOPE: usize = 1_000_000;

/// Default maximum number of members in a single group.
pub const DEFAULT_MAX_GROUP_MEMBERS: usize = 256;

/// Configurable validation limits for memory storage.
///
/// # Example
///
/// ```rust
/// use reflect_memory_storage::ValidationLimits;
///
/// let limits = ValidationLimits::default()
///     .with_max_nonces_per_scope(10)
///     .with_max_group_members(32);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValidationLimits {
    /// Maximum number of messages stored per conversation
    pub max_messages_per_conversation: usize,
    /// Maximum number of nonces recorded per scope
    pub max_nonces_per_scope: usize,
    /// Maximum number of members per group
    pub max_group_members: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_messages_per_conversation: DEFAULT_MAX_MESSAGES_PER_CONVERSATION,
            max_nonces_per_scope: DEFAULT_MAX_NONCES_PER_SCOPE,
            max_group_members: DEFAULT_MAX_GROUP_MEMBERS,
        }
    }
}

impl ValidationLimits {
    /// Creates a new `ValidationLimits` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of messages stored per conversation.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0.
    pub fn with_max_messages_per_conversation(mut self, limit: usize) -> Self {
        assert!(
            limit > 0,
            "max_messages_per_conversation must be greater than 0"
        );
        self.max_messages_per_conversation = limit;
        self
    }

    /// Sets the maximum number of nonces recorded per scope.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0.
    pub fn with_max_nonces_per_scope(mut self, limit: usize) -> Self {
        assert!(limit > 0, "max_nonces_per_scope must be greater than 0");
        self.max_nonces_per_scope = limit;
        self
    }

    /// Sets the maximum number of members per group.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0.
    pub fn with_max_group_members(mut self, limit: usize) -> Self {
        assert!(limit > 0, "max_group_members must be greater than 0");
        self.max_group_members = limit;
        self
    }
}

/// A memory-based storage implementation for Reflect.
///
/// ## Retention
///
/// This is the only copy of the data, so contacts, groups, group calls and nonces are
/// never evicted. Messages are bounded per conversation by
/// [`ValidationLimits::max_messages_per_conversation`]; the oldest one goes first.
///
/// ## Thread Safety
///
/// All state sits behind a single `RwLock`, which allows:
/// - Multiple concurrent readers (for find/exists operations)
/// - Exclusive writers (for save/store operations)
///
/// A nonce existence check followed by a store from two threads therefore never
/// corrupts the set; the losing insert is reported as `Ok(false)`.
pub struct ReflectMemoryStorage {
    /// Configurable validation limits
    limits: ValidationLimits,
    /// Thread-safe inner storage
    inner: RwLock<ReflectMemoryStorageInner>,
}

struct ReflectMemoryStorageInner {
    nonces: HashMap<NonceScope, HashSet<Nonce>>,
    contacts: HashMap<IdentityString, Contact>,
    groups: HashMap<GroupIdentity, Group>,
    messages_by_conversation: HashMap<ConversationKey, HashMap<MessageId, Message>>,
    group_calls: HashMap<GroupIdentity, Vec<GroupCallStart>>,
}

impl fmt::Debug for ReflectMemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectMemoryStorage")
            .field("limits", &self.limits)
            .field("inner", &"RwLock<ReflectMemoryStorageInner>")
            .finish()
    }
}

impl Default for ReflectMemoryStorage {
    /// Creates a new `ReflectMemoryStorage` with default configuration.
    fn default() -> Self {
        Self::new()
    }
}

impl ReflectMemoryStorage {
    /// Creates a new `ReflectMemoryStorage` with the default configuration.
    pub fn new() -> Self {
        Self::with_limits(ValidationLimits::default())
    }

    /// Creates a new `ReflectMemoryStorage` with the provided validation limits.
    pub fn with_limits(limits: ValidationLimits) -> Self {
        let inner = ReflectMemoryStorageInner {
            nonces: HashMap::new(),
            contacts: HashMap::new(),
            groups: HashMap::new(),
            messages_by_conversation: HashMap::new(),
            group_calls: HashMap::new(),
        };

        Self {
            limits,
            inner: RwLock::new(inner),
        }
    }

    /// Returns the current validation limits.
    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Whether the conversation a message belongs to is known
    fn conversation_exists(&self, conversation: &ConversationKey) -> bool {
        let inner = self.inner.read();
        match conversation {
            ConversationKey::Contact(identity) => inner.contacts.contains_key(identity),
            ConversationKey::Group(group_identity) => inner.groups.contains_key(group_identity),
        }
    }
}
