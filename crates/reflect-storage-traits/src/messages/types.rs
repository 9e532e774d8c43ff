//! Types for the messages module

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::MessageError;
use crate::contacts::types::BlobId;
use crate::{ConversationKey, IdentityString, MessageId, Timestamp};

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Application-level message id
    pub api_message_id: MessageId,
    /// Conversation the message belongs to
    pub conversation: ConversationKey,
    /// Identity of the author
    pub identity: IdentityString,
    /// Content of the message
    pub body: MessageBody,
    /// Whether the message has been fully persisted
    pub is_saved: bool,
    /// Whether the message was sent by us
    pub is_outbox: bool,
    /// Delivery state
    pub state: MessageState,
    /// When the message was created by its author
    pub created_at: Timestamp,
    /// When the message was last edited
    pub edited_at: Option<Timestamp>,
    /// When the message was read
    pub read_at: Option<Timestamp>,
}

impl Message {
    /// Compares two messages for display ordering (newest first).
    ///
    /// Messages are sorted by `created_at`, then by `api_message_id` for a
    /// deterministic order. Returns [`Ordering::Greater`] if `self` should appear
    /// **before** `other` in a newest-first list.
    pub fn display_order_cmp(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.api_message_id.cmp(&other.api_message_id))
    }
}

/// Content of a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    /// A text message
    Text {
        /// The text
        text: String,
    },
    /// A file message
    File(FileMessageData),
}

impl MessageBody {
    /// Text of a text message
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::File(_) => None,
        }
    }
}

/// How a file message should be rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRenderingType {
    /// Render as a generic file
    #[default]
    File,
    /// Render as media (image, video, audio)
    Media,
    /// Render as a sticker
    Sticker,
}

/// Metadata and blob reference of a file message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileMessageData {
    /// Blob id of the encrypted file
    pub blob_id: BlobId,
    /// Symmetric key of the file blob
    pub encryption_key: [u8; 32],
    /// Media type of the file
    pub media_type: String,
    /// Original file name
    pub file_name: Option<String>,
    /// Size of the file in bytes
    pub file_size: u64,
    /// Blob id of the thumbnail
    pub thumbnail_blob_id: Option<BlobId>,
    /// Media type of the thumbnail
    pub thumbnail_media_type: Option<String>,
    /// Caption
    pub caption: Option<String>,
    /// Rendering hint
    pub rendering_type: FileRenderingType,
}

/// The delivery state of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageState {
    /// The message is queued locally
    Pending,
    /// The message is being sent
    Sending,
    /// The message was accepted by the server
    Sent,
    /// The message was delivered to the recipient
    Delivered,
    /// The message was read by the recipient
    Read,
    /// The recipient acknowledged the message
    UserAck,
    /// The recipient declined the message
    UserDec,
    /// Sending failed
    Failed,
}

impl fmt::Display for MessageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MessageState {
    /// Get as `&str`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
            Self::UserAck => "user_ack",
            Self::UserDec => "user_dec",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for MessageState {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sending" => Ok(Self::Sending),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "read" => Ok(Self::Read),
            "user_ack" => Ok(Self::UserAck),
            "user_dec" => Ok(Self::UserDec),
            "failed" => Ok(Self::Failed),
            _ => Err(MessageError::InvalidParameters(format!(
                "Invalid message state: {}",
                s
            ))),
        }
    }
}

impl Serialize for MessageState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
