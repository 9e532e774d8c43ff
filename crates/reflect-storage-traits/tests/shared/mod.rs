//! Shared storage contract tests, run against every storage implementation

#![allow(dead_code)]

use reflect_storage_traits::contacts::types::Contact;
use reflect_storage_traits::groups::types::Group;
use reflect_storage_traits::messages::types::{Message, MessageBody, MessageState};
use reflect_storage_traits::{
    ConversationKey, GroupId, GroupIdentity, IdentityString, MessageId, Timestamp,
};

pub mod contact_tests;
pub mod group_call_tests;
pub mod group_tests;
pub mod message_tests;
pub mod nonce_tests;

pub fn identity(value: &str) -> IdentityString {
    IdentityString::new(value).unwrap()
}

pub fn create_test_contact(value: &str) -> Contact {
    Contact::new(identity(value))
}

pub fn create_test_group(group_id: u64, creator: &str, members: &[&str]) -> Group {
    let mut group = Group::new(GroupIdentity::new(GroupId::from(group_id), identity(creator)));
    group.name = Some(format!("Group {}", group_id));
    group.members = members.iter().map(|m| identity(m)).collect();
    group
}

pub fn create_test_message(conversation: ConversationKey, id: u64, created_at: u64) -> Message {
    Message {
        api_message_id: MessageId::new(id),
        conversation,
        identity: identity("OWNIDENT"),
        body: MessageBody::Text {
            text: format!("message {}", id),
        },
        is_saved: true,
        is_outbox: true,
        state: MessageState::Sending,
        created_at: Timestamp::from_millis(created_at),
        edited_at: None,
        read_at: None,
    }
}
