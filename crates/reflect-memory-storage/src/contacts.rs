//! Memory-based storage implementation of the ContactStorage trait

use reflect_storage_traits::IdentityString;
use reflect_storage_traits::contacts::ContactStorage;
use reflect_storage_traits::contacts::error::ContactError;
use reflect_storage_traits::contacts::types::Contact;

use crate::ReflectMemoryStorage;

impl ContactStorage for ReflectMemoryStorage {
    fn all_contacts(&self) -> Result<Vec<Contact>, ContactError> {
        let inner = self.inner.read();
        let mut contacts: Vec<Contact> = inner
            .contacts
            .values()
            .cloned()
            .collect();
        contacts.sort_by(|a, b| a.identity.cmp(&b.identity));
        Ok(contacts)
    }

    fn find_contact_by_identity(
        &self,
        identity: &IdentityString,
    ) -> Result<Option<Contact>, ContactError> {
        let inner = self.inner.read();
        Ok(inner.contacts.get(identity).cloned())
    }

    fn save_contact(&self, contact: Contact) -> Result<(), ContactError> {
        let mut inner = self.inner.write();
        inner.contacts.insert(contact.identity.clone(), contact);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reflect_storage_traits::Timestamp;
    use reflect_storage_traits::test_utils::{create_test_contact, identity};

    use super::*;

    #[test]
    fn test_save_and_find_contact() {
        let storage = ReflectMemoryStorage::default();
        let contact = create_test_contact("ECHOECHO");

        storage.save_contact(contact.clone()).unwrap();

        let found = storage
            .find_contact_by_identity(&identity("ECHOECHO"))
            .unwrap();
        assert_eq!(found, Some(contact));

        let missing = storage
            .find_contact_by_identity(&identity("UNKNOWN1"))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_save_contact_updates_existing() {
        let storage = ReflectMemoryStorage::default();
        let mut contact = create_test_contact("ECHOECHO");
        storage.save_contact(contact.clone()).unwrap();

        contact.last_update = Some(Timestamp::from_millis(42));
        storage.save_contact(contact).unwrap();

        let all = storage.all_contacts().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].last_update, Some(Timestamp::from_millis(42)));
    }

    #[test]
    fn test_contacts_are_never_evicted() {
        let storage = ReflectMemoryStorage::default();
        storage.save_contact(create_test_contact("AAAAAAAA")).unwrap();

        for i in 0..1500 {
            storage
                .save_contact(create_test_contact(&format!("C{i:07}")))
                .unwrap();
        }

        let first = storage
            .find_contact_by_identity(&identity("AAAAAAAA"))
            .unwrap();
        assert!(first.is_some());
        assert_eq!(storage.all_contacts().unwrap().len(), 1501);
    }
}
