//! Protocol message ids

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdError;

/// Length of a message id in bytes
pub const MESSAGE_ID_LENGTH: usize = 8;

/// A 64-bit protocol message id.
///
/// The application-level ("API") form of a message id is the lowercase hex encoding of its
/// 8 little-endian bytes, which is what [`fmt::Display`] produces and [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    /// Create a message id from its numeric value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Numeric value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Wire representation (little-endian)
    pub fn to_le_bytes(&self) -> [u8; MESSAGE_ID_LENGTH] {
        self.0.to_le_bytes()
    }

    /// Parse from the wire representation (little-endian)
    pub fn from_le_bytes(bytes: [u8; MESSAGE_ID_LENGTH]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Application-level message id
    pub fn to_api_string(&self) -> String {
        hex::encode(self.to_le_bytes())
    }
}

impl From<u64> for MessageId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_api_string())
    }
}

impl FromStr for MessageId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; MESSAGE_ID_LENGTH] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| IdError::InvalidLength {
                    expected: MESSAGE_ID_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self::from_le_bytes(bytes))
    }
}

impl Serialize for MessageId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_api_string())
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
