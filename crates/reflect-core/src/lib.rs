//! Replay of reflected outgoing messages
//!
//! When a user runs several linked devices, every message one device sends is
//! reflected to the others through the device-to-device sync channel. This crate
//! applies such reflected outgoing messages to local state: it records the one-time
//! nonces of the message, routes it to the right contact or group conversation and
//! materializes or updates the local message models, all through the storage traits
//! of `reflect-storage-traits`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]
#![doc = include_str!("../README.md")]

use std::sync::Arc;

use reflect_storage_traits::messages::types::Message;
use reflect_storage_traits::nonces::types::NonceScope;
use reflect_storage_traits::{IdentityString, ReflectStorageProvider};

pub mod callback;
pub mod codec;
pub mod edit;
pub mod envelope;
pub mod error;
pub mod prelude;
pub mod receiver;
pub mod tasks;
#[cfg(test)]
pub mod test_util;

use self::callback::ReflectCallback;
use self::edit::EditEnvelope;
use self::envelope::OutgoingMessage;
pub use self::error::{Error, ErrorKind};
use self::receiver::MessageReceiver;
use self::tasks::{ReflectedOutgoingMessageTask, ReflectedOutgoingReport, TaskContext};

/// Configuration for Reflect behavior
///
/// # Examples
///
/// ```rust
/// use reflect_core::ReflectConfig;
/// use reflect_storage_traits::nonces::types::NonceScope;
///
/// // Use defaults
/// let config = ReflectConfig::default();
/// assert_eq!(config.nonce_scope, NonceScope::Csp);
///
/// // Custom configuration
/// let config = ReflectConfig {
///     nonce_scope: NonceScope::D2d,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectConfig {
    /// Scope the nonces of reflected outgoing messages are recorded in.
    ///
    /// Reflected outgoing messages carry the nonces that were used to send the
    /// message to its recipients, so they belong to the chat server protocol scope.
    ///
    /// Default: [`NonceScope::Csp`]
    pub nonce_scope: NonceScope,
}

impl Default for ReflectConfig {
    fn default() -> Self {
        Self {
            nonce_scope: NonceScope::Csp,
        }
    }
}

impl ReflectConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for constructing [`ReflectEngine`] instances
///
/// # Examples
///
/// ```rust
/// use reflect_core::{ReflectConfig, ReflectEngine};
/// use reflect_memory_storage::ReflectMemoryStorage;
/// use reflect_storage_traits::IdentityString;
///
/// let own_identity = IdentityString::new("OWNIDENT").unwrap();
///
/// // Simple usage with defaults
/// let engine = ReflectEngine::new(ReflectMemoryStorage::default(), own_identity.clone());
///
/// // With custom configuration
/// let engine = ReflectEngine::builder(ReflectMemoryStorage::default(), own_identity)
///     .with_config(ReflectConfig::new())
///     .build();
/// ```
#[derive(Debug)]
pub struct ReflectEngineBuilder<Storage> {
    storage: Storage,
    own_identity: IdentityString,
    config: ReflectConfig,
    callback: Option<Arc<dyn ReflectCallback>>,
}

impl<Storage> ReflectEngineBuilder<Storage>
where
    Storage: ReflectStorageProvider,
{
    /// Create a new builder with the given storage and own identity
    pub fn new(storage: Storage, own_identity: IdentityString) -> Self {
        Self {
            storage,
            own_identity,
            config: ReflectConfig::default(),
            callback: None,
        }
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: ReflectConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a callback for Reflect events
    pub fn with_callback(mut self, callback: Arc<dyn ReflectCallback>) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Build the engine with the configured settings
    pub fn build(self) -> ReflectEngine<Storage> {
        ReflectEngine {
            storage: self.storage,
            own_identity: self.own_identity,
            config: self.config,
            callback: self.callback,
        }
    }
}

/// The entry point for processing reflected outgoing messages.
///
/// Envelopes are processed synchronously, one call at a time. When a host processes
/// envelopes of the same conversation from several threads, it has to serialize
/// them itself.
#[derive(Debug)]
pub struct ReflectEngine<Storage>
where
    Storage: ReflectStorageProvider,
{
    storage: Storage,
    own_identity: IdentityString,
    /// Engine configuration
    pub config: ReflectConfig,
    callback: Option<Arc<dyn ReflectCallback>>,
}

impl<Storage> ReflectEngine<Storage>
where
    Storage: ReflectStorageProvider,
{
    /// Create a builder for constructing an engine
    pub fn builder(storage: Storage, own_identity: IdentityString) -> ReflectEngineBuilder<Storage> {
        ReflectEngineBuilder::new(storage, own_identity)
    }

    /// Construct a new engine with default configuration
    pub fn new(storage: Storage, own_identity: IdentityString) -> Self {
        Self::builder(storage, own_identity).build()
    }

    /// Get the storage provider
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Identity of this device's user
    pub fn own_identity(&self) -> &IdentityString {
        &self.own_identity
    }

    fn task_context(&self) -> TaskContext<'_, Storage> {
        TaskContext {
            storage: &self.storage,
            own_identity: &self.own_identity,
            config: &self.config,
            callback: self.callback.as_deref(),
        }
    }

    /// Select the task for a reflected outgoing message without running it
    pub fn reflected_outgoing_task<'a>(
        &'a self,
        message: &'a OutgoingMessage,
    ) -> Result<Box<dyn ReflectedOutgoingMessageTask + 'a>, Error> {
        tasks::get_reflected_outgoing_message_task(self.task_context(), message)
    }

    /// Process a reflected outgoing message.
    ///
    /// # Returns
    ///
    /// * `Ok(ReflectedOutgoingReport)` - What was done, including absorbed nonce problems
    /// * `Err(Error)` - If the envelope cannot be processed; see [`Error::kind`]
    pub fn process_reflected_outgoing(
        &self,
        message: &OutgoingMessage,
    ) -> Result<ReflectedOutgoingReport, Error> {
        tracing::debug!(
            target: "reflect_core::process_reflected_outgoing",
            "Processing reflected outgoing message {} of type {:#04x}",
            message.message_id.to_api_string(),
            message.message_type
        );

        let task = self.reflected_outgoing_task(message)?;
        task.execute().inspect_err(|e| {
            tracing::error!(
                target: "reflect_core::process_reflected_outgoing",
                "Failed to process reflected outgoing {} message {}: {}",
                task.message_type(),
                message.message_id.to_api_string(),
                e
            );
        })
    }

    /// Look up the message an edit refers to and apply the edit time.
    ///
    /// Returns `Ok(None)` if the message is unknown or the editor is not its author.
    /// The returned message is not saved.
    pub fn apply_edit<E>(
        &self,
        edit: &E,
        receiver: &MessageReceiver,
    ) -> Result<Option<Message>, Error>
    where
        E: EditEnvelope + ?Sized,
    {
        edit::apply_edit(&self.storage, edit, receiver)
    }
}
