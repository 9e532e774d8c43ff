//! Types for the nonces module

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::NonceError;

/// Namespace for nonce anti-replay tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NonceScope {
    /// Nonces of the chat server protocol (end-to-end encrypted messages)
    Csp,
    /// Nonces of the device-to-device protocol
    D2d,
}

impl fmt::Display for NonceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl NonceScope {
    /// Get as `&str`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Csp => "csp",
            Self::D2d => "d2d",
        }
    }
}

impl FromStr for NonceScope {
    type Err = NonceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csp" => Ok(Self::Csp),
            "d2d" => Ok(Self::D2d),
            _ => Err(NonceError::InvalidParameters(format!(
                "Invalid nonce scope: {}",
                s
            ))),
        }
    }
}

impl Serialize for NonceScope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NonceScope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// An opaque one-time nonce
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Nonce(Vec<u8>);

impl Nonce {
    /// Wrap raw nonce bytes
    pub fn new<B>(bytes: B) -> Self
    where
        B: Into<Vec<u8>>,
    {
        Self(bytes.into())
    }

    /// Raw nonce bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hex encoding used for logging
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Whether the nonce has no bytes at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Nonce {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Nonce {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", self.to_hex())
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
