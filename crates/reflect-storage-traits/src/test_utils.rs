//! Test utilities for building storage records

use std::collections::BTreeSet;

use crate::contacts::types::Contact;
use crate::groups::types::Group;
use crate::messages::types::{Message, MessageBody, MessageState};
use crate::{ConversationKey, GroupId, GroupIdentity, IdentityString, MessageId, Timestamp};

/// Parse an identity, panicking on invalid input
pub fn identity(identity: &str) -> IdentityString {
    IdentityString::new(identity).expect("valid test identity")
}

/// Creates a contact without any activity
pub fn create_test_contact(id: &str) -> Contact {
    Contact::new(identity(id))
}

/// Creates a group identity from a numeric group id and a creator
pub fn create_test_group_identity(group_id: u64, creator: &str) -> GroupIdentity {
    GroupIdentity::new(GroupId::from(group_id), identity(creator))
}

/// Creates a group with the given members
pub fn create_test_group(group_identity: GroupIdentity, members: &[&str]) -> Group {
    let mut group = Group::new(group_identity);
    group.name = Some("Test Group".to_string());
    group.members = members.iter().map(|m| identity(m)).collect::<BTreeSet<_>>();
    group
}

/// Creates an incoming text message in the given conversation
pub fn create_test_message(
    conversation: ConversationKey,
    message_id: u64,
    author: &str,
    text: &str,
) -> Message {
    Message {
        api_message_id: MessageId::new(message_id),
        conversation,
        identity: identity(author),
        body: MessageBody::Text {
            text: text.to_string(),
        },
        is_saved: true,
        is_outbox: false,
        state: MessageState::Delivered,
        created_at: Timestamp::from_millis(1_700_000_000_000 + message_id),
        edited_at: None,
        read_at: None,
    }
}
