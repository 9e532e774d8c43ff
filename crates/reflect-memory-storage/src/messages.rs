//! Memory-based storage implementation of the MessageStorage trait

use reflect_storage_traits::messages::MessageStorage;
use reflect_storage_traits::messages::error::MessageError;
use reflect_storage_traits::messages::types::Message;
use reflect_storage_traits::{ConversationKey, MessageId};

use crate::ReflectMemoryStorage;

impl MessageStorage for ReflectMemoryStorage {
    fn save_message(&self, message: Message) -> Result<(), MessageError> {
        // Verify that the conversation exists before saving the message
        if !self.conversation_exists(&message.conversation) {
            return Err(MessageError::InvalidParameters(format!(
                "Conversation not found: {}",
                message.conversation
            )));
        }

        let mut inner = self.inner.write();
        let conversation_messages = inner
            .messages_by_conversation
            .entry(message.conversation.clone())
            .or_default();

        let is_update = conversation_messages.contains_key(&message.api_message_id);
        if !is_update && conversation_messages.len() >= self.limits.max_messages_per_conversation
        {
            // Evict the oldest message to make room for the new one
            if let Some(oldest_id) = conversation_messages
                .iter()
                .min_by_key(|(_, msg)| msg.created_at)
                .map(|(id, _)| *id)
            {
                conversation_messages.remove(&oldest_id);
            }
        }

        conversation_messages.insert(message.api_message_id, message);

        Ok(())
    }

    fn find_message_by_api_id(
        &self,
        conversation: &ConversationKey,
        message_id: &MessageId,
    ) -> Result<Option<Message>, MessageError> {
        let inner = self.inner.read();
        match inner.messages_by_conversation.get(conversation) {
            Some(conversation_messages) => Ok(conversation_messages.get(message_id).cloned()),
            None => Ok(None),
        }
    }

    fn messages(&self, conversation: &ConversationKey) -> Result<Vec<Message>, MessageError> {
        let inner = self.inner.read();
        let mut messages: Vec<Message> = inner
            .messages_by_conversation
            .get(conversation)
            .map(|conversation_messages| conversation_messages.values().cloned().collect())
            .unwrap_or_default();
        messages.sort_by(|a, b| b.display_order_cmp(a));
        Ok(messages)
    }
}
