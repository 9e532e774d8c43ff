//! Reflected outgoing text messages

use reflect_storage_traits::ReflectStorageProvider;
use reflect_storage_traits::messages::types::MessageBody;

use super::{OutgoingMessageHandler, Result, TaskBase};
use crate::codec;

/// Handles `TEXT` and `GROUP_TEXT` messages
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMessageHandler;

impl<S> OutgoingMessageHandler<S> for TextMessageHandler
where
    S: ReflectStorageProvider,
{
    fn should_bump_last_update(&self) -> bool {
        true
    }

    fn process_outgoing_message(&self, task: &TaskBase<'_, S>) -> Result<()> {
        // Unknown conversations fail before the body is looked at
        task.receiver()?;

        let text = codec::decode_text(task.message_type(), &task.message().body)?;
        task.save_outgoing_message(MessageBody::Text { text })?;
        Ok(())
    }
}
