//! Reflect errors

use reflect_storage_traits::contacts::error::ContactError;
use reflect_storage_traits::group_calls::error::GroupCallError;
use reflect_storage_traits::groups::error::GroupError;
use reflect_storage_traits::messages::error::MessageError;
use reflect_storage_traits::{GroupIdentity, IdentityString};

use crate::envelope::CspE2eMessageType;

/// Coarse classification of an [`Error`]
///
/// Hosts use this to decide whether a failed envelope is worth retrying later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The envelope violates the reflection protocol and will never succeed
    ProtocolViolation,
    /// The contact or group the envelope refers to is not known locally
    UnresolvedTarget,
    /// The message type is reserved for future support
    NotYetImplemented,
    /// The type-specific body could not be decoded
    MalformedPayload,
    /// A storage backend failed
    Storage,
}

impl ErrorKind {
    /// Whether processing the same envelope again could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage)
    }
}

/// Reflect error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The envelope's type does not match the type the task was built for
    #[error("Incompatible types: {actual:#04x} - {expected}")]
    TypeMismatch {
        /// Type the task was built for
        expected: CspE2eMessageType,
        /// Raw type of the envelope
        actual: u32,
    },
    /// The envelope addresses a conversation kind the message type cannot be sent to
    #[error("Message of type {message_type} cannot be reflected to a {conversation} conversation")]
    ConversationMismatch {
        /// Type of the envelope
        message_type: CspE2eMessageType,
        /// Kind of the addressed conversation
        conversation: &'static str,
    },
    /// The wire tag is not part of the protocol
    #[error("Unknown message type {0:#04x}")]
    UnknownMessageType(u32),
    /// The message type exists but is not handled as a reflected outgoing message
    #[error("Unknown message type {0}")]
    UnsupportedOutgoingType(CspE2eMessageType),
    /// The message type must never be reflected as outgoing
    #[error("Reflected message of type {0} should never be received as outgoing")]
    ForbiddenOutgoingType(CspE2eMessageType),
    /// The message type is reserved for future support
    #[error("Message type {0} for reflected outgoing messages is not implemented yet")]
    NotYetImplemented(CspE2eMessageType),
    /// Contact of the envelope is unknown
    #[error("The contact of a reflected outgoing message must be known: {0}")]
    ContactNotFound(IdentityString),
    /// Group of the envelope is unknown
    #[error("The group of a reflected outgoing message must be known: {0}")]
    GroupNotFound(GroupIdentity),
    /// The type-specific body could not be decoded
    #[error("Malformed {message_type} body: {reason}")]
    MalformedBody {
        /// Type of the envelope
        message_type: CspE2eMessageType,
        /// What is wrong with the body
        reason: String,
    },
    /// Contact storage error
    #[error(transparent)]
    Contact(#[from] ContactError),
    /// Group storage error
    #[error(transparent)]
    Group(#[from] GroupError),
    /// Message storage error
    #[error(transparent)]
    Message(#[from] MessageError),
    /// Group call storage error
    #[error(transparent)]
    GroupCall(#[from] GroupCallError),
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. }
            | Self::ConversationMismatch { .. }
            | Self::UnknownMessageType(_)
            | Self::UnsupportedOutgoingType(_)
            | Self::ForbiddenOutgoingType(_) => ErrorKind::ProtocolViolation,
            Self::ContactNotFound(_) | Self::GroupNotFound(_) => ErrorKind::UnresolvedTarget,
            Self::NotYetImplemented(_) => ErrorKind::NotYetImplemented,
            Self::MalformedBody { .. } => ErrorKind::MalformedPayload,
            Self::Contact(_) | Self::Group(_) | Self::Message(_) | Self::GroupCall(_) => {
                ErrorKind::Storage
            }
        }
    }

    pub(crate) fn malformed<R>(message_type: CspE2eMessageType, reason: R) -> Self
    where
        R: Into<String>,
    {
        Self::MalformedBody {
            message_type,
            reason: reason.into(),
        }
    }
}
