//! Group storage test functions

use reflect_storage_traits::groups::GroupStorage;
use reflect_storage_traits::{GroupId, GroupIdentity, Timestamp};

use super::{create_test_group, identity};

/// Test basic group save and find functionality
pub fn test_save_and_find_group<S>(storage: S)
where
    S: GroupStorage,
{
    let group = create_test_group(1, "CREATOR1", &["MEMBER01", "MEMBER02"]);
    storage.save_group(group.clone()).unwrap();

    let found = storage.find_group(&group.group_identity).unwrap();
    assert_eq!(found, Some(group));

    // Same group id, different creator is a different group
    let other_creator = GroupIdentity::new(GroupId::from(1u64), identity("CREATOR2"));
    assert!(storage.find_group(&other_creator).unwrap().is_none());
}

/// Saving a group again replaces the stored one
pub fn test_update_group<S>(storage: S)
where
    S: GroupStorage,
{
    let mut group = create_test_group(1, "CREATOR1", &[]);
    storage.save_group(group.clone()).unwrap();

    group.last_update = Some(Timestamp::from_millis(7));
    storage.save_group(group.clone()).unwrap();

    let found = storage.find_group(&group.group_identity).unwrap().unwrap();
    assert_eq!(found.last_update, Some(Timestamp::from_millis(7)));
    assert_eq!(storage.all_groups().unwrap().len(), 1);
}

/// Test all groups functionality
pub fn test_all_groups<S>(storage: S)
where
    S: GroupStorage,
{
    assert!(storage.all_groups().unwrap().is_empty());

    storage
        .save_group(create_test_group(1, "CREATOR1", &[]))
        .unwrap();
    storage
        .save_group(create_test_group(2, "CREATOR1", &[]))
        .unwrap();

    assert_eq!(storage.all_groups().unwrap().len(), 2);
}
