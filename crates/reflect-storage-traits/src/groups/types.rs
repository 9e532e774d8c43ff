//! Types for the groups module

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{GroupIdentity, IdentityString, Timestamp};

/// A group conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    /// Group id and creator identity
    pub group_identity: GroupIdentity,
    /// Group name
    pub name: Option<String>,
    /// Members of the group, not including the creator
    pub members: BTreeSet<IdentityString>,
    /// When the group conversation was last updated
    pub last_update: Option<Timestamp>,
}

impl Group {
    /// Create a group without members
    pub fn new(group_identity: GroupIdentity) -> Self {
        Self {
            group_identity,
            name: None,
            members: BTreeSet::new(),
            last_update: None,
        }
    }

    /// Whether the identity is the creator or a member of this group
    pub fn is_member(&self, identity: &IdentityString) -> bool {
        &self.group_identity.creator_identity == identity || self.members.contains(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GroupId;

    #[test]
    fn test_is_member_includes_creator() {
        let creator = IdentityString::new("CREATOR1").unwrap();
        let member = IdentityString::new("MEMBER01").unwrap();
        let stranger = IdentityString::new("STRANGER").unwrap();

        let mut group = Group::new(GroupIdentity::new(GroupId::from(1u64), creator.clone()));
        group.members.insert(member.clone());

        assert!(group.is_member(&creator));
        assert!(group.is_member(&member));
        assert!(!group.is_member(&stranger));
    }
}
