//! Applying edits to previously stored messages
//!
//! One-to-one and group edit messages only differ in where they come from; both
//! reference the edited message by its protocol message id and are applied the
//! same way through [`EditEnvelope`].

use reflect_storage_traits::messages::MessageStorage;
use reflect_storage_traits::messages::types::Message;
use reflect_storage_traits::{GroupIdentity, IdentityString, MessageId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::receiver::MessageReceiver;

/// An edit of a previously sent message
pub trait EditEnvelope {
    /// Identity that sent the edit
    fn from_identity(&self) -> &IdentityString;

    /// When the message was edited
    fn edited_at(&self) -> Timestamp;

    /// Protocol id of the edited message
    fn referenced_message_id(&self) -> MessageId;

    /// New text of the edited message
    fn text(&self) -> &str;
}

/// Content of an edit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditMessageData {
    /// Protocol id of the edited message
    pub message_id: MessageId,
    /// New text
    pub text: String,
}

/// An edit in a one-to-one conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditMessage {
    /// Identity that sent the edit
    pub from_identity: IdentityString,
    /// When the message was edited
    pub date: Timestamp,
    /// Edit content
    pub data: EditMessageData,
}

/// An edit in a group conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEditMessage {
    /// Identity that sent the edit
    pub from_identity: IdentityString,
    /// When the message was edited
    pub date: Timestamp,
    /// Group the edited message belongs to
    pub group: GroupIdentity,
    /// Edit content
    pub data: EditMessageData,
}

impl EditEnvelope for EditMessage {
    fn from_identity(&self) -> &IdentityString {
        &self.from_identity
    }

    fn edited_at(&self) -> Timestamp {
        self.date
    }

    fn referenced_message_id(&self) -> MessageId {
        self.data.message_id
    }

    fn text(&self) -> &str {
        &self.data.text
    }
}

impl EditEnvelope for GroupEditMessage {
    fn from_identity(&self) -> &IdentityString {
        &self.from_identity
    }

    fn edited_at(&self) -> Timestamp {
        self.date
    }

    fn referenced_message_id(&self) -> MessageId {
        self.data.message_id
    }

    fn text(&self) -> &str {
        &self.data.text
    }
}

/// Find the message an edit refers to and stamp its edit time.
///
/// Returns `None` if the message is unknown or was sent by someone other than the
/// editor. The returned model is not persisted.
pub fn apply_edit<S, E>(
    storage: &S,
    edit: &E,
    receiver: &MessageReceiver,
) -> Result<Option<Message>, Error>
where
    S: MessageStorage + ?Sized,
    E: EditEnvelope + ?Sized,
{
    let message_id = edit.referenced_message_id();
    let conversation = receiver.conversation_key();

    let Some(mut message) = storage.find_message_by_api_id(&conversation, &message_id)? else {
        tracing::warn!(
            target: "reflect_core::edit::apply_edit",
            "Edit message: No message found for id: {}",
            message_id.to_api_string()
        );
        return Ok(None);
    };

    if edit.from_identity() != &message.identity {
        tracing::error!(
            target: "reflect_core::edit::apply_edit",
            "Edit message: original message's sender {} does not equal edited message's sender {}",
            message.identity,
            edit.from_identity()
        );
        return Ok(None);
    }

    message.edited_at = Some(edit.edited_at());
    Ok(Some(message))
}
