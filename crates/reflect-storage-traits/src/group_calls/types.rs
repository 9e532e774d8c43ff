//! Types for the group calls module

use serde::{Deserialize, Serialize};

use crate::{GroupIdentity, IdentityString, MessageId, Timestamp};

/// Length of a group call key in bytes
pub const GCK_LENGTH: usize = 32;

/// The start of a group call in a group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupCallStart {
    /// Group the call runs in
    pub group: GroupIdentity,
    /// Id of the message that announced the call
    pub message_id: MessageId,
    /// Who started the call
    pub started_by: IdentityString,
    /// When the call was started
    pub started_at: Timestamp,
    /// Group call protocol version
    pub protocol_version: u32,
    /// Group call key
    pub gck: [u8; GCK_LENGTH],
    /// Base URL of the selective forwarding unit
    pub sfu_base_url: String,
}
