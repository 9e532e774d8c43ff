//! Reflected outgoing file messages

use reflect_storage_traits::ReflectStorageProvider;
use reflect_storage_traits::messages::types::MessageBody;

use super::{OutgoingMessageHandler, Result, TaskBase};
use crate::codec;

/// Handles `FILE` and `GROUP_FILE` messages
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMessageHandler;

impl<S> OutgoingMessageHandler<S> for FileMessageHandler
where
    S: ReflectStorageProvider,
{
    fn should_bump_last_update(&self) -> bool {
        true
    }

    fn process_outgoing_message(&self, task: &TaskBase<'_, S>) -> Result<()> {
        task.receiver()?;

        let file = codec::decode_file(task.message_type(), &task.message().body)?;
        tracing::debug!(
            target: "reflect_core::tasks::file",
            "Reflected outgoing file of type {} ({} bytes)",
            file.media_type,
            file.file_size
        );
        task.save_outgoing_message(MessageBody::File(file))?;
        Ok(())
    }
}
