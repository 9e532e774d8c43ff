//! Callback interface for Reflect events.
//!
//! This module provides the [`ReflectCallback`] trait that applications can implement
//! to be notified about effects of reflected messages that need more than a storage
//! update, such as a group call that was started from another device.

use std::fmt::Debug;

use reflect_storage_traits::{GroupIdentity, IdentityString, MessageId, Timestamp};

/// Information about a group call started by another device of the own identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCallStartInfo {
    /// The group the call runs in
    pub group: GroupIdentity,
    /// Id of the message that announced the call
    pub message_id: MessageId,
    /// Who started the call
    pub started_by: IdentityString,
    /// When the call was started
    pub started_at: Timestamp,
    /// Group call protocol version
    pub protocol_version: u32,
    /// Base URL of the selective forwarding unit
    pub sfu_base_url: String,
}

/// Callback interface for Reflect events.
pub trait ReflectCallback: Send + Sync + Debug {
    /// Notifies that a group call start was reflected and recorded.
    ///
    /// Applications can use this to re-evaluate which group calls the user may join.
    fn on_group_call_started(&self, info: &GroupCallStartInfo);
}
