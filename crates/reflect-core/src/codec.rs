//! Decoding of type-specific message bodies

use reflect_storage_traits::MessageId;
use reflect_storage_traits::contacts::types::{BLOB_ID_LENGTH, BlobId};
use reflect_storage_traits::group_calls::types::GCK_LENGTH;
use reflect_storage_traits::messages::types::{FileMessageData, FileRenderingType, MessageState};
use serde::Deserialize;

use crate::envelope::CspE2eMessageType;
use crate::error::Error;

/// Length of a symmetric blob key in bytes
pub const BLOB_KEY_LENGTH: usize = 32;

const MESSAGE_ID_LENGTH: usize = 8;
const SET_PROFILE_PICTURE_LENGTH: usize = BLOB_ID_LENGTH + 4 + BLOB_KEY_LENGTH;

/// Decode the body of a text message
pub fn decode_text(message_type: CspE2eMessageType, body: &[u8]) -> Result<String, Error> {
    String::from_utf8(body.to_vec()).map_err(|e| Error::malformed(message_type, e.to_string()))
}

/// Wire representation of a file message
#[derive(Debug, Deserialize)]
struct FileMessageJson {
    #[serde(rename = "b")]
    blob_id: String,
    #[serde(rename = "k")]
    encryption_key: String,
    #[serde(rename = "m")]
    media_type: String,
    #[serde(rename = "n", default)]
    file_name: Option<String>,
    #[serde(rename = "s")]
    file_size: u64,
    #[serde(rename = "t", default)]
    thumbnail_blob_id: Option<String>,
    #[serde(rename = "p", default)]
    thumbnail_media_type: Option<String>,
    #[serde(rename = "d", default)]
    caption: Option<String>,
    #[serde(rename = "j", default)]
    rendering_type: u8,
}

/// Decode the JSON body of a file message
pub fn decode_file(
    message_type: CspE2eMessageType,
    body: &[u8],
) -> Result<FileMessageData, Error> {
    let json: FileMessageJson =
        serde_json::from_slice(body).map_err(|e| Error::malformed(message_type, e.to_string()))?;

    let rendering_type = match json.rendering_type {
        0 => FileRenderingType::File,
        1 => FileRenderingType::Media,
        2 => FileRenderingType::Sticker,
        other => {
            return Err(Error::malformed(
                message_type,
                format!("unknown rendering type {}", other),
            ));
        }
    };

    let thumbnail_blob_id = json
        .thumbnail_blob_id
        .as_deref()
        .map(|t| decode_hex_array::<BLOB_ID_LENGTH>(message_type, "thumbnail blob id", t))
        .transpose()?;

    Ok(FileMessageData {
        blob_id: decode_hex_array(message_type, "blob id", &json.blob_id)?,
        encryption_key: decode_hex_array(message_type, "encryption key", &json.encryption_key)?,
        media_type: json.media_type,
        file_name: json.file_name,
        file_size: json.file_size,
        thumbnail_blob_id,
        thumbnail_media_type: json.thumbnail_media_type,
        caption: json.caption,
        rendering_type,
    })
}

/// Status carried by a delivery receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryReceiptStatus {
    /// The message was received
    Received,
    /// The message was read
    Read,
    /// The message was acknowledged
    UserAcknowledge,
    /// The message was declined
    UserDecline,
}

impl DeliveryReceiptStatus {
    /// Message state the referenced messages move to
    pub fn message_state(&self) -> MessageState {
        match self {
            Self::Received => MessageState::Delivered,
            Self::Read => MessageState::Read,
            Self::UserAcknowledge => MessageState::UserAck,
            Self::UserDecline => MessageState::UserDec,
        }
    }
}

impl TryFrom<u8> for DeliveryReceiptStatus {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Received),
            0x02 => Ok(Self::Read),
            0x03 => Ok(Self::UserAcknowledge),
            0x04 => Ok(Self::UserDecline),
            other => Err(other),
        }
    }
}

/// A decoded delivery receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Receipt status
    pub status: DeliveryReceiptStatus,
    /// Messages the receipt refers to
    pub message_ids: Vec<MessageId>,
}

/// Decode a delivery receipt: a status byte followed by little-endian message ids
pub fn decode_delivery_receipt(
    message_type: CspE2eMessageType,
    body: &[u8],
) -> Result<DeliveryReceipt, Error> {
    let Some((status, ids)) = body.split_first() else {
        return Err(Error::malformed(message_type, "empty body"));
    };

    let status = DeliveryReceiptStatus::try_from(*status)
        .map_err(|s| Error::malformed(message_type, format!("unknown status {:#04x}", s)))?;

    if ids.is_empty() || ids.len() % MESSAGE_ID_LENGTH != 0 {
        return Err(Error::malformed(
            message_type,
            format!("invalid message id list length {}", ids.len()),
        ));
    }

    let mut message_ids = Vec::with_capacity(ids.len() / MESSAGE_ID_LENGTH);
    for chunk in ids.chunks_exact(MESSAGE_ID_LENGTH) {
        let mut bytes = [0u8; MESSAGE_ID_LENGTH];
        bytes.copy_from_slice(chunk);
        message_ids.push(MessageId::from_le_bytes(bytes));
    }

    Ok(DeliveryReceipt {
        status,
        message_ids,
    })
}

/// A decoded set-profile-picture message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetProfilePicture {
    /// Blob id of the uploaded picture
    pub blob_id: BlobId,
    /// Size of the encrypted blob in bytes
    pub size: u32,
    /// Symmetric key of the blob
    pub encryption_key: [u8; BLOB_KEY_LENGTH],
}

/// Decode a set-profile-picture body: blob id, little-endian size, key
pub fn decode_set_profile_picture(
    message_type: CspE2eMessageType,
    body: &[u8],
) -> Result<SetProfilePicture, Error> {
    if body.len() != SET_PROFILE_PICTURE_LENGTH {
        return Err(Error::malformed(
            message_type,
            format!(
                "expected {} bytes, got {}",
                SET_PROFILE_PICTURE_LENGTH,
                body.len()
            ),
        ));
    }

    let (blob_id, rest) = body.split_at(BLOB_ID_LENGTH);
    let (size, key) = rest.split_at(4);

    let mut picture = SetProfilePicture {
        blob_id: [0u8; BLOB_ID_LENGTH],
        size: 0,
        encryption_key: [0u8; BLOB_KEY_LENGTH],
    };
    picture.blob_id.copy_from_slice(blob_id);
    let mut size_bytes = [0u8; 4];
    size_bytes.copy_from_slice(size);
    picture.size = u32::from_le_bytes(size_bytes);
    picture.encryption_key.copy_from_slice(key);
    Ok(picture)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupCallStartJson {
    protocol_version: u32,
    gck: String,
    sfu_base_url: String,
}

/// A decoded group call start message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCallStartData {
    /// Group call protocol version
    pub protocol_version: u32,
    /// Group call key
    pub gck: [u8; GCK_LENGTH],
    /// Base URL of the selective forwarding unit
    pub sfu_base_url: String,
}

/// Decode the JSON body of a group call start message
pub fn decode_group_call_start(
    message_type: CspE2eMessageType,
    body: &[u8],
) -> Result<GroupCallStartData, Error> {
    let json: GroupCallStartJson =
        serde_json::from_slice(body).map_err(|e| Error::malformed(message_type, e.to_string()))?;

    if !json.sfu_base_url.starts_with("https://") {
        return Err(Error::malformed(
            message_type,
            format!("SFU base URL must use https: {}", json.sfu_base_url),
        ));
    }

    Ok(GroupCallStartData {
        protocol_version: json.protocol_version,
        gck: decode_hex_array(message_type, "gck", &json.gck)?,
        sfu_base_url: json.sfu_base_url,
    })
}

fn decode_hex_array<const N: usize>(
    message_type: CspE2eMessageType,
    field: &str,
    value: &str,
) -> Result<[u8; N], Error> {
    let bytes = hex::decode(value)
        .map_err(|e| Error::malformed(message_type, format!("invalid {}: {}", field, e)))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        Error::malformed(
            message_type,
            format!("invalid {} length: expected {}, got {}", field, N, bytes.len()),
        )
    })
}
