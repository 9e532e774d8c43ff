//! Types for the contacts module

use serde::{Deserialize, Serialize};

use crate::{IdentityString, Timestamp};

/// Length of a blob id in bytes
pub const BLOB_ID_LENGTH: usize = 16;

/// Id of an uploaded blob on the blob server
pub type BlobId = [u8; BLOB_ID_LENGTH];

/// A contact, i.e. the counterpart of a one-to-one conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    /// The contact's identity
    pub identity: IdentityString,
    /// Optional display name
    pub display_name: Option<String>,
    /// When the conversation with this contact was last updated
    pub last_update: Option<Timestamp>,
    /// What we last distributed of our own profile picture to this contact
    pub profile_picture: ProfilePictureDistribution,
    /// When we last asked this contact for their profile picture
    pub profile_picture_requested_at: Option<Timestamp>,
}

impl Contact {
    /// Create a contact that has not seen any activity yet
    pub fn new(identity: IdentityString) -> Self {
        Self {
            identity,
            display_name: None,
            last_update: None,
            profile_picture: ProfilePictureDistribution::NotSent,
            profile_picture_requested_at: None,
        }
    }
}

/// Distribution state of our own profile picture towards a contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProfilePictureDistribution {
    /// Nothing was sent so far
    #[default]
    NotSent,
    /// A profile picture was sent
    Sent {
        /// Blob id of the uploaded picture
        blob_id: BlobId,
        /// Size of the encrypted blob in bytes
        size: u32,
        /// When the picture was sent
        sent_at: Timestamp,
    },
    /// The contact was told that we have no profile picture
    Deleted {
        /// When the deletion was sent
        deleted_at: Timestamp,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_contact_defaults() {
        let contact = Contact::new(IdentityString::new("ECHOECHO").unwrap());
        assert_eq!(contact.profile_picture, ProfilePictureDistribution::NotSent);
        assert!(contact.last_update.is_none());
        assert!(contact.profile_picture_requested_at.is_none());
    }

    #[test]
    fn test_profile_picture_distribution_serialization() {
        let state = ProfilePictureDistribution::Deleted {
            deleted_at: Timestamp::from_millis(5),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "deleted");
        let back: ProfilePictureDistribution = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
