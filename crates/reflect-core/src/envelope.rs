//! Reflected outgoing message envelopes
//!
//! An [`OutgoingMessage`] is what the device-to-device sync channel delivers when
//! another device of the same identity sent a message. The wire type is kept as a
//! raw `u32` and interpreted through [`CspE2eMessageType`].

use std::fmt;

use reflect_storage_traits::nonces::types::Nonce;
use reflect_storage_traits::{
    ConversationKey, GroupId, GroupIdentity, IdentityString, MessageId, Timestamp,
};
use serde::{Deserialize, Serialize};

use crate::error::Error;

macro_rules! csp_e2e_message_types {
    ($($variant:ident = $code:literal => $name:literal,)+) => {
        /// Every end-to-end message type of the chat server protocol
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[allow(missing_docs)]
        pub enum CspE2eMessageType {
            $($variant,)+
        }

        impl CspE2eMessageType {
            /// All known message types, in wire code order
            pub const ALL: &'static [CspE2eMessageType] = &[$(Self::$variant,)+];

            /// Wire code of the message type
            pub fn code(&self) -> u32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Protocol name of the message type
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl TryFrom<u32> for CspE2eMessageType {
            type Error = Error;

            fn try_from(code: u32) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(Error::UnknownMessageType(code)),
                }
            }
        }
    };
}

csp_e2e_message_types! {
    Text = 0x01 => "TEXT",
    DeprecatedImage = 0x02 => "DEPRECATED_IMAGE",
    Location = 0x10 => "LOCATION",
    DeprecatedVideo = 0x13 => "DEPRECATED_VIDEO",
    DeprecatedAudio = 0x14 => "DEPRECATED_AUDIO",
    PollSetup = 0x15 => "POLL_SETUP",
    PollVote = 0x16 => "POLL_VOTE",
    File = 0x17 => "FILE",
    ContactSetProfilePicture = 0x18 => "CONTACT_SET_PROFILE_PICTURE",
    ContactDeleteProfilePicture = 0x19 => "CONTACT_DELETE_PROFILE_PICTURE",
    ContactRequestProfilePicture = 0x1a => "CONTACT_REQUEST_PROFILE_PICTURE",
    GroupText = 0x41 => "GROUP_TEXT",
    GroupLocation = 0x42 => "GROUP_LOCATION",
    GroupImage = 0x43 => "GROUP_IMAGE",
    GroupVideo = 0x44 => "GROUP_VIDEO",
    GroupAudio = 0x45 => "GROUP_AUDIO",
    GroupFile = 0x46 => "GROUP_FILE",
    GroupSetup = 0x4a => "GROUP_SETUP",
    GroupName = 0x4b => "GROUP_NAME",
    GroupLeave = 0x4c => "GROUP_LEAVE",
    GroupJoinRequest = 0x4d => "GROUP_JOIN_REQUEST",
    GroupJoinResponse = 0x4e => "GROUP_JOIN_RESPONSE",
    GroupCallStart = 0x4f => "GROUP_CALL_START",
    GroupSetProfilePicture = 0x50 => "GROUP_SET_PROFILE_PICTURE",
    GroupSyncRequest = 0x51 => "GROUP_SYNC_REQUEST",
    GroupPollSetup = 0x52 => "GROUP_POLL_SETUP",
    GroupPollVote = 0x53 => "GROUP_POLL_VOTE",
    GroupDeleteProfilePicture = 0x54 => "GROUP_DELETE_PROFILE_PICTURE",
    CallOffer = 0x60 => "CALL_OFFER",
    CallAnswer = 0x61 => "CALL_ANSWER",
    CallIceCandidate = 0x62 => "CALL_ICE_CANDIDATE",
    CallHangup = 0x63 => "CALL_HANGUP",
    CallRinging = 0x64 => "CALL_RINGING",
    DeliveryReceipt = 0x80 => "DELIVERY_RECEIPT",
    GroupDeliveryReceipt = 0x81 => "GROUP_DELIVERY_RECEIPT",
    TypingIndicator = 0x90 => "TYPING_INDICATOR",
    EditMessage = 0x91 => "EDIT_MESSAGE",
    DeleteMessage = 0x92 => "DELETE_MESSAGE",
    GroupEditMessage = 0x93 => "GROUP_EDIT_MESSAGE",
    GroupDeleteMessage = 0x94 => "GROUP_DELETE_MESSAGE",
    ForwardSecurityEnvelope = 0xa0 => "FORWARD_SECURITY_ENVELOPE",
    Empty = 0xfc => "EMPTY",
    WebSessionResume = 0xfe => "WEB_SESSION_RESUME",
}

impl CspE2eMessageType {
    /// Whether messages of this type are addressed to a group conversation
    pub fn is_group_message(&self) -> bool {
        matches!(
            self,
            Self::GroupText
                | Self::GroupLocation
                | Self::GroupImage
                | Self::GroupVideo
                | Self::GroupAudio
                | Self::GroupFile
                | Self::GroupSetup
                | Self::GroupName
                | Self::GroupLeave
                | Self::GroupJoinRequest
                | Self::GroupJoinResponse
                | Self::GroupCallStart
                | Self::GroupSetProfilePicture
                | Self::GroupSyncRequest
                | Self::GroupPollSetup
                | Self::GroupPollVote
                | Self::GroupDeleteProfilePicture
                | Self::GroupDeliveryReceipt
                | Self::GroupEditMessage
                | Self::GroupDeleteMessage
        )
    }
}

impl fmt::Display for CspE2eMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversation an outgoing message was sent to, as carried by the envelope
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationId {
    /// One-to-one conversation with the given contact
    Contact(IdentityString),
    /// Group conversation
    Group {
        /// Group id chosen by the creator
        group_id: GroupId,
        /// Identity of the group creator
        creator_identity: IdentityString,
    },
}

impl ConversationId {
    /// Human readable kind of the conversation
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Contact(_) => "contact",
            Self::Group { .. } => "group",
        }
    }

    /// Storage key of the addressed conversation
    pub fn to_key(&self) -> ConversationKey {
        match self {
            Self::Contact(identity) => ConversationKey::Contact(identity.clone()),
            Self::Group {
                group_id,
                creator_identity,
            } => ConversationKey::Group(GroupIdentity::new(*group_id, creator_identity.clone())),
        }
    }
}

impl From<GroupIdentity> for ConversationId {
    fn from(group: GroupIdentity) -> Self {
        Self::Group {
            group_id: group.group_id,
            creator_identity: group.creator_identity,
        }
    }
}

/// A message sent by another device of the own identity, reflected to this device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Raw end-to-end message type
    pub message_type: u32,
    /// Protocol message id
    pub message_id: MessageId,
    /// When the message was created on the sending device
    pub created_at: Timestamp,
    /// One-time nonces used when the message was sent to its recipients
    pub nonces: Vec<Nonce>,
    /// Conversation the message was sent to
    pub conversation: ConversationId,
    /// Type-specific body
    pub body: Vec<u8>,
}

impl OutgoingMessage {
    /// Interpret the raw message type
    pub fn csp_message_type(&self) -> Result<CspE2eMessageType, Error> {
        CspE2eMessageType::try_from(self.message_type)
    }
}
