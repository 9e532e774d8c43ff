//! Group call storage test functions

use reflect_storage_traits::group_calls::GroupCallStorage;
use reflect_storage_traits::group_calls::types::{GCK_LENGTH, GroupCallStart};
use reflect_storage_traits::groups::GroupStorage;
use reflect_storage_traits::{GroupIdentity, MessageId, Timestamp};

use super::{create_test_group, identity};

fn create_test_call(group: GroupIdentity, message_id: u64, started_at: u64) -> GroupCallStart {
    GroupCallStart {
        group,
        message_id: MessageId::new(message_id),
        started_by: identity("CREATOR1"),
        started_at: Timestamp::from_millis(started_at),
        protocol_version: 1,
        gck: [1u8; GCK_LENGTH],
        sfu_base_url: "https://sfu.example.org".to_string(),
    }
}

/// Call starts are listed most recent first
pub fn test_group_call_starts_most_recent_first<S>(storage: S)
where
    S: GroupStorage + GroupCallStorage,
{
    let group = create_test_group(1, "CREATOR1", &["MEMBER01"]);
    let group_identity = group.group_identity.clone();
    storage.save_group(group).unwrap();

    assert!(storage.group_call_starts(&group_identity).unwrap().is_empty());

    storage
        .save_group_call_start(create_test_call(group_identity.clone(), 1, 100))
        .unwrap();
    storage
        .save_group_call_start(create_test_call(group_identity.clone(), 3, 300))
        .unwrap();
    storage
        .save_group_call_start(create_test_call(group_identity.clone(), 2, 200))
        .unwrap();

    let ids: Vec<MessageId> = storage
        .group_call_starts(&group_identity)
        .unwrap()
        .into_iter()
        .map(|call| call.message_id)
        .collect();
    assert_eq!(
        ids,
        vec![MessageId::new(3), MessageId::new(2), MessageId::new(1)]
    );
}

/// Saving the same call start twice keeps a single record
pub fn test_group_call_start_deduplicated<S>(storage: S)
where
    S: GroupStorage + GroupCallStorage,
{
    let group = create_test_group(1, "CREATOR1", &[]);
    let group_identity = group.group_identity.clone();
    storage.save_group(group).unwrap();

    let call = create_test_call(group_identity.clone(), 7, 700);
    storage.save_group_call_start(call.clone()).unwrap();
    storage.save_group_call_start(call.clone()).unwrap();

    assert_eq!(storage.group_call_starts(&group_identity).unwrap(), vec![call]);
}

/// Call starts of one group are not visible in another
pub fn test_group_calls_are_per_group<S>(storage: S)
where
    S: GroupStorage + GroupCallStorage,
{
    let first = create_test_group(1, "CREATOR1", &[]);
    let second = create_test_group(2, "CREATOR1", &[]);
    let first_identity = first.group_identity.clone();
    let second_identity = second.group_identity.clone();
    storage.save_group(first).unwrap();
    storage.save_group(second).unwrap();

    storage
        .save_group_call_start(create_test_call(first_identity.clone(), 1, 100))
        .unwrap();

    assert_eq!(storage.group_call_starts(&first_identity).unwrap().len(), 1);
    assert!(storage.group_call_starts(&second_identity).unwrap().is_empty());
}
