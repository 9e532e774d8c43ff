//! Contacts module
//!
//! This module is responsible for storing and retrieving contacts.
//! A contact is the counterpart of a one-to-one conversation.

use crate::IdentityString;

pub mod error;
pub mod types;

use self::error::ContactError;
use self::types::*;

/// Storage traits for the contacts module
pub trait ContactStorage {
    /// Get all contacts
    fn all_contacts(&self) -> Result<Vec<Contact>, ContactError>;

    /// Find a contact by its identity
    fn find_contact_by_identity(
        &self,
        identity: &IdentityString,
    ) -> Result<Option<Contact>, ContactError>;

    /// Save (create or update) a contact
    fn save_contact(&self, contact: Contact) -> Result<(), ContactError>;
}
