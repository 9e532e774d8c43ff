//! Message storage test functions

use reflect_storage_traits::contacts::ContactStorage;
use reflect_storage_traits::groups::GroupStorage;
use reflect_storage_traits::messages::MessageStorage;
use reflect_storage_traits::messages::types::MessageState;
use reflect_storage_traits::{ConversationKey, MessageId, Timestamp};

use super::{create_test_contact, create_test_group, create_test_message, identity};

/// Test basic message save and find functionality
pub fn test_save_and_find_message<S>(storage: S)
where
    S: ContactStorage + MessageStorage,
{
    storage.save_contact(create_test_contact("ECHOECHO")).unwrap();
    let conversation = ConversationKey::Contact(identity("ECHOECHO"));

    let message = create_test_message(conversation.clone(), 1, 1000);
    storage.save_message(message.clone()).unwrap();

    let found = storage
        .find_message_by_api_id(&conversation, &MessageId::new(1))
        .unwrap();
    assert_eq!(found, Some(message));

    // Same id in another conversation is not found
    let other = ConversationKey::Contact(identity("NOBODY00"));
    assert!(
        storage
            .find_message_by_api_id(&other, &MessageId::new(1))
            .unwrap()
            .is_none()
    );
}

/// Saving a message with a known id replaces it
pub fn test_update_message<S>(storage: S)
where
    S: ContactStorage + MessageStorage,
{
    storage.save_contact(create_test_contact("ECHOECHO")).unwrap();
    let conversation = ConversationKey::Contact(identity("ECHOECHO"));

    let mut message = create_test_message(conversation.clone(), 1, 1000);
    storage.save_message(message.clone()).unwrap();

    message.state = MessageState::Read;
    message.read_at = Some(Timestamp::from_millis(2000));
    storage.save_message(message.clone()).unwrap();

    let found = storage
        .find_message_by_api_id(&conversation, &MessageId::new(1))
        .unwrap()
        .unwrap();
    assert_eq!(found.state, MessageState::Read);
    assert_eq!(found.read_at, Some(Timestamp::from_millis(2000)));
    assert_eq!(storage.messages(&conversation).unwrap().len(), 1);
}

/// Messages are listed newest first
pub fn test_messages_ordering<S>(storage: S)
where
    S: GroupStorage + MessageStorage,
{
    let group = create_test_group(1, "CREATOR1", &["OWNIDENT"]);
    storage.save_group(group.clone()).unwrap();
    let conversation = ConversationKey::Group(group.group_identity);

    storage
        .save_message(create_test_message(conversation.clone(), 1, 3000))
        .unwrap();
    storage
        .save_message(create_test_message(conversation.clone(), 2, 1000))
        .unwrap();
    storage
        .save_message(create_test_message(conversation.clone(), 3, 2000))
        .unwrap();

    let ids: Vec<u64> = storage
        .messages(&conversation)
        .unwrap()
        .iter()
        .map(|m| m.api_message_id.as_u64())
        .collect();
    assert_eq!(ids, vec![1, 3, 2]);
}
