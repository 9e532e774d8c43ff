//! Contact storage test functions

use reflect_storage_traits::Timestamp;
use reflect_storage_traits::contacts::ContactStorage;
use reflect_storage_traits::contacts::types::ProfilePictureDistribution;

use super::{create_test_contact, identity};

/// Test basic contact save and find functionality
pub fn test_save_and_find_contact<S>(storage: S)
where
    S: ContactStorage,
{
    let contact = create_test_contact("ECHOECHO");
    storage.save_contact(contact.clone()).unwrap();

    let found = storage
        .find_contact_by_identity(&identity("ECHOECHO"))
        .unwrap();
    assert_eq!(found, Some(contact));

    let missing = storage
        .find_contact_by_identity(&identity("NOBODY00"))
        .unwrap();
    assert!(missing.is_none());
}

/// Saving a contact again replaces the stored one
pub fn test_update_contact<S>(storage: S)
where
    S: ContactStorage,
{
    let mut contact = create_test_contact("ECHOECHO");
    storage.save_contact(contact.clone()).unwrap();

    contact.last_update = Some(Timestamp::from_millis(42));
    contact.profile_picture = ProfilePictureDistribution::Deleted {
        deleted_at: Timestamp::from_millis(42),
    };
    storage.save_contact(contact.clone()).unwrap();

    let found = storage
        .find_contact_by_identity(&identity("ECHOECHO"))
        .unwrap()
        .unwrap();
    assert_eq!(found.last_update, Some(Timestamp::from_millis(42)));
    assert_eq!(found.profile_picture, contact.profile_picture);
    assert_eq!(storage.all_contacts().unwrap().len(), 1);
}

/// Test all contacts functionality
pub fn test_all_contacts<S>(storage: S)
where
    S: ContactStorage,
{
    assert!(storage.all_contacts().unwrap().is_empty());

    storage.save_contact(create_test_contact("BBBBBBBB")).unwrap();
    storage.save_contact(create_test_contact("AAAAAAAA")).unwrap();

    let contacts = storage.all_contacts().unwrap();
    assert_eq!(contacts.len(), 2);
}
