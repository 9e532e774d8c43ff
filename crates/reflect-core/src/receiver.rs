//! Resolution of the conversation a reflected message applies to

use reflect_storage_traits::contacts::ContactStorage;
use reflect_storage_traits::contacts::types::Contact;
use reflect_storage_traits::groups::GroupStorage;
use reflect_storage_traits::groups::types::Group;
use reflect_storage_traits::{ConversationKey, GroupIdentity, Timestamp};

use crate::envelope::ConversationId;
use crate::error::Error;

/// A locally known conversation a reflected message is routed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageReceiver {
    /// One-to-one conversation
    Contact(Contact),
    /// Group conversation
    Group(Group),
}

impl MessageReceiver {
    /// Resolve the conversation addressed by an envelope.
    ///
    /// Reflected messages are only sent for conversations that exist on every linked
    /// device, so an unknown contact or group is an error.
    pub fn resolve<S>(storage: &S, conversation: &ConversationId) -> Result<Self, Error>
    where
        S: ContactStorage + GroupStorage + ?Sized,
    {
        match conversation {
            ConversationId::Contact(identity) => storage
                .find_contact_by_identity(identity)?
                .map(Self::Contact)
                .ok_or_else(|| Error::ContactNotFound(identity.clone())),
            ConversationId::Group {
                group_id,
                creator_identity,
            } => {
                let group_identity = GroupIdentity::new(*group_id, creator_identity.clone());
                match storage.find_group(&group_identity)? {
                    Some(group) => Ok(Self::Group(group)),
                    None => Err(Error::GroupNotFound(group_identity)),
                }
            }
        }
    }

    /// Storage key of the conversation
    pub fn conversation_key(&self) -> ConversationKey {
        match self {
            Self::Contact(contact) => ConversationKey::Contact(contact.identity.clone()),
            Self::Group(group) => ConversationKey::Group(group.group_identity.clone()),
        }
    }

    /// The contact, if this is a one-to-one conversation
    pub fn as_contact(&self) -> Option<&Contact> {
        match self {
            Self::Contact(contact) => Some(contact),
            Self::Group(_) => None,
        }
    }

    /// The group, if this is a group conversation
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Contact(_) => None,
            Self::Group(group) => Some(group),
        }
    }

    /// Mark the conversation as updated at `now`.
    ///
    /// The record is reloaded first so that changes made while processing the
    /// message are not overwritten.
    pub fn bump_last_update<S>(&self, storage: &S, now: Timestamp) -> Result<(), Error>
    where
        S: ContactStorage + GroupStorage + ?Sized,
    {
        match self {
            Self::Contact(contact) => {
                let mut contact = storage
                    .find_contact_by_identity(&contact.identity)?
                    .ok_or_else(|| Error::ContactNotFound(contact.identity.clone()))?;
                contact.last_update = Some(now);
                storage.save_contact(contact)?;
            }
            Self::Group(group) => {
                let mut group = storage
                    .find_group(&group.group_identity)?
                    .ok_or_else(|| Error::GroupNotFound(group.group_identity.clone()))?;
                group.last_update = Some(now);
                storage.save_group(group)?;
            }
        }

        tracing::debug!(
            target: "reflect_core::receiver::bump_last_update",
            "Bumped last update of {}",
            self.conversation_key()
        );

        Ok(())
    }
}
