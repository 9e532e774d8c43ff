//! Group calls module
//!
//! Records group call starts so that the host can decide whether a running call may
//! still be joined.

use crate::GroupIdentity;

pub mod error;
pub mod types;

use self::error::GroupCallError;
use self::types::*;

/// Storage traits for the group calls module
pub trait GroupCallStorage {
    /// Record the start of a group call
    fn save_group_call_start(&self, call: GroupCallStart) -> Result<(), GroupCallError>;

    /// All recorded group call starts of a group, most recent first
    fn group_call_starts(
        &self,
        group_identity: &GroupIdentity,
    ) -> Result<Vec<GroupCallStart>, GroupCallError>;
}
