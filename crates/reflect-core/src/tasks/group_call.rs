//! Reflected outgoing group call starts

use reflect_storage_traits::ReflectStorageProvider;
use reflect_storage_traits::group_calls::GroupCallStorage;
use reflect_storage_traits::group_calls::types::GroupCallStart;

use super::{OutgoingMessageHandler, Result, TaskBase};
use crate::callback::GroupCallStartInfo;
use crate::codec;
use crate::error::Error;

/// Handles `GROUP_CALL_START` messages
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupCallStartHandler;

impl<S> OutgoingMessageHandler<S> for GroupCallStartHandler
where
    S: ReflectStorageProvider,
{
    fn should_bump_last_update(&self) -> bool {
        true
    }

    fn process_outgoing_message(&self, task: &TaskBase<'_, S>) -> Result<()> {
        let group = task
            .receiver()?
            .as_group()
            .ok_or_else(|| Error::ConversationMismatch {
                message_type: task.message_type(),
                conversation: task.message().conversation.kind(),
            })?;
        let data = codec::decode_group_call_start(task.message_type(), &task.message().body)?;

        let call = GroupCallStart {
            group: group.group_identity.clone(),
            message_id: task.message().message_id,
            started_by: task.own_identity().clone(),
            started_at: task.message().created_at,
            protocol_version: data.protocol_version,
            gck: data.gck,
            sfu_base_url: data.sfu_base_url,
        };

        let info = GroupCallStartInfo {
            group: call.group.clone(),
            message_id: call.message_id,
            started_by: call.started_by.clone(),
            started_at: call.started_at,
            protocol_version: call.protocol_version,
            sfu_base_url: call.sfu_base_url.clone(),
        };

        tracing::debug!(
            target: "reflect_core::tasks::group_call",
            "Group call started in {}",
            call.group
        );
        task.storage().save_group_call_start(call)?;

        if let Some(callback) = task.callback() {
            callback.on_group_call_started(&info);
        }

        Ok(())
    }
}
