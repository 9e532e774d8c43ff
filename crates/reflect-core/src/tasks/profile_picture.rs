//! Reflected outgoing contact profile picture messages

use reflect_storage_traits::ReflectStorageProvider;
use reflect_storage_traits::contacts::ContactStorage;
use reflect_storage_traits::contacts::types::{Contact, ProfilePictureDistribution};

use super::{OutgoingMessageHandler, Result, TaskBase};
use crate::codec;
use crate::error::Error;

/// Handles `CONTACT_SET_PROFILE_PICTURE` messages
#[derive(Debug, Clone, Copy, Default)]
pub struct SetProfilePictureHandler;

/// Handles `CONTACT_DELETE_PROFILE_PICTURE` messages
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteProfilePictureHandler;

/// Handles `CONTACT_REQUEST_PROFILE_PICTURE` messages
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestProfilePictureHandler;

/// The addressed contact, as stored now
fn current_contact<S>(task: &TaskBase<'_, S>) -> Result<Contact>
where
    S: ReflectStorageProvider,
{
    let contact = task
        .receiver()?
        .as_contact()
        .ok_or_else(|| Error::ConversationMismatch {
            message_type: task.message_type(),
            conversation: task.message().conversation.kind(),
        })?;

    task.storage()
        .find_contact_by_identity(&contact.identity)?
        .ok_or_else(|| Error::ContactNotFound(contact.identity.clone()))
}

impl<S> OutgoingMessageHandler<S> for SetProfilePictureHandler
where
    S: ReflectStorageProvider,
{
    fn should_bump_last_update(&self) -> bool {
        false
    }

    fn process_outgoing_message(&self, task: &TaskBase<'_, S>) -> Result<()> {
        let mut contact = current_contact(task)?;
        let picture =
            codec::decode_set_profile_picture(task.message_type(), &task.message().body)?;

        contact.profile_picture = ProfilePictureDistribution::Sent {
            blob_id: picture.blob_id,
            size: picture.size,
            sent_at: task.message().created_at,
        };
        tracing::debug!(
            target: "reflect_core::tasks::profile_picture",
            "Profile picture was sent to {}",
            contact.identity
        );
        task.storage().save_contact(contact)?;
        Ok(())
    }
}

impl<S> OutgoingMessageHandler<S> for DeleteProfilePictureHandler
where
    S: ReflectStorageProvider,
{
    fn should_bump_last_update(&self) -> bool {
        false
    }

    fn process_outgoing_message(&self, task: &TaskBase<'_, S>) -> Result<()> {
        let mut contact = current_contact(task)?;
        contact.profile_picture = ProfilePictureDistribution::Deleted {
            deleted_at: task.message().created_at,
        };
        tracing::debug!(
            target: "reflect_core::tasks::profile_picture",
            "Profile picture deletion was sent to {}",
            contact.identity
        );
        task.storage().save_contact(contact)?;
        Ok(())
    }
}

impl<S> OutgoingMessageHandler<S> for RequestProfilePictureHandler
where
    S: ReflectStorageProvider,
{
    fn should_bump_last_update(&self) -> bool {
        false
    }

    fn process_outgoing_message(&self, task: &TaskBase<'_, S>) -> Result<()> {
        let mut contact = current_contact(task)?;
        contact.profile_picture_requested_at = Some(task.message().created_at);
        task.storage().save_contact(contact)?;
        Ok(())
    }
}
