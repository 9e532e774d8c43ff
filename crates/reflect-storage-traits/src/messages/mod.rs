//! Messages module
//!
//! This module is responsible for storing and retrieving message models.
//!
//! Messages are addressed by their application-level message id within a conversation:
//! the same protocol message id may legitimately exist in two different conversations.

use crate::{ConversationKey, MessageId};

pub mod error;
pub mod types;

use self::error::MessageError;
use self::types::*;

/// Storage traits for the messages module
pub trait MessageStorage {
    /// Save a message, replacing a stored message with the same id in the same conversation
    fn save_message(&self, message: Message) -> Result<(), MessageError>;

    /// Find a message by its application-level id within a specific conversation
    fn find_message_by_api_id(
        &self,
        conversation: &ConversationKey,
        message_id: &MessageId,
    ) -> Result<Option<Message>, MessageError>;

    /// All messages of a conversation, newest first
    fn messages(&self, conversation: &ConversationKey) -> Result<Vec<Message>, MessageError>;
}
