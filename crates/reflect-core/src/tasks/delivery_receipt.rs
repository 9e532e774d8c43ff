//! Reflected outgoing delivery receipts
//!
//! A delivery receipt sent by another device of the own identity acknowledges
//! messages in the conversation; the referenced messages are updated in place.

use reflect_storage_traits::ReflectStorageProvider;
use reflect_storage_traits::messages::MessageStorage;
use reflect_storage_traits::messages::types::MessageState;

use super::{OutgoingMessageHandler, Result, TaskBase};
use crate::codec;

/// Handles `DELIVERY_RECEIPT` and `GROUP_DELIVERY_RECEIPT` messages
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryReceiptHandler;

impl<S> OutgoingMessageHandler<S> for DeliveryReceiptHandler
where
    S: ReflectStorageProvider,
{
    fn should_bump_last_update(&self) -> bool {
        false
    }

    fn process_outgoing_message(&self, task: &TaskBase<'_, S>) -> Result<()> {
        let conversation = task.receiver()?.conversation_key();
        let receipt = codec::decode_delivery_receipt(task.message_type(), &task.message().body)?;
        let state = receipt.status.message_state();

        for message_id in receipt.message_ids {
            let Some(mut message) = task
                .storage()
                .find_message_by_api_id(&conversation, &message_id)?
            else {
                tracing::warn!(
                    target: "reflect_core::tasks::delivery_receipt",
                    "Message {} referenced by delivery receipt not found in {}",
                    message_id.to_api_string(),
                    conversation
                );
                continue;
            };

            message.state = state;
            if state == MessageState::Read {
                message.read_at = Some(task.message().created_at);
            }
            task.storage().save_message(message)?;
        }

        Ok(())
    }
}
