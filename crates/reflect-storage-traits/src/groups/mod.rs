//! Groups module
//!
//! This module is responsible for storing and retrieving groups.
//! Groups are addressed by their [`GroupIdentity`] (group id plus creator identity).

use crate::GroupIdentity;

pub mod error;
pub mod types;

use self::error::GroupError;
use self::types::*;

/// Storage traits for the groups module
pub trait GroupStorage {
    /// Get all groups
    fn all_groups(&self) -> Result<Vec<Group>, GroupError>;

    /// Find a group by group id and creator identity
    fn find_group(&self, group_identity: &GroupIdentity) -> Result<Option<Group>, GroupError>;

    /// Save (create or update) a group
    fn save_group(&self, group: Group) -> Result<(), GroupError>;
}
