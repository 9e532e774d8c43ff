//! Memory-based storage implementation of the GroupCallStorage trait

use reflect_storage_traits::GroupIdentity;
use reflect_storage_traits::group_calls::GroupCallStorage;
use reflect_storage_traits::group_calls::error::GroupCallError;
use reflect_storage_traits::group_calls::types::GroupCallStart;

use crate::ReflectMemoryStorage;

impl GroupCallStorage for ReflectMemoryStorage {
    fn save_group_call_start(&self, call: GroupCallStart) -> Result<(), GroupCallError> {
        if !self.conversation_exists(&reflect_storage_traits::ConversationKey::Group(
            call.group.clone(),
        )) {
            return Err(GroupCallError::InvalidParameters(format!(
                "Group not found: {}",
                call.group
            )));
        }

        let mut inner = self.inner.write();
        let calls = inner.group_calls.entry(call.group.clone()).or_default();
        // Re-delivery of the same call start replaces the earlier record
        calls.retain(|c| c.message_id != call.message_id);
        calls.push(call);
        Ok(())
    }

    fn group_call_starts(
        &self,
        group_identity: &GroupIdentity,
    ) -> Result<Vec<GroupCallStart>, GroupCallError> {
        let inner = self.inner.read();
        let mut calls = inner
            .group_calls
            .get(group_identity)
            .cloned()
            .unwrap_or_default();
        calls.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(calls)
    }
}
