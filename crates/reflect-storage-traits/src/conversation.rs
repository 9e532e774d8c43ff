//! Conversation keys

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GroupIdentity, IdentityString};

/// Identifies a local conversation: a one-to-one chat with a contact or a group chat.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationKey {
    /// One-to-one conversation with a contact
    Contact(IdentityString),
    /// Group conversation
    Group(GroupIdentity),
}

impl ConversationKey {
    /// Whether this is a one-to-one conversation
    pub fn is_contact(&self) -> bool {
        matches!(self, Self::Contact(_))
    }

    /// Whether this is a group conversation
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contact(identity) => write!(f, "contact:{}", identity),
            Self::Group(group) => write!(f, "group:{}", group),
        }
    }
}
