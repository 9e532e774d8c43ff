//! Identity strings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdError;

/// Length of an identity string in characters
pub const IDENTITY_LENGTH: usize = 8;

/// An 8 character identity (`[A-Z0-9*]`), e.g. `ECHOECHO` or `*GATEWAY`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityString(String);

impl IdentityString {
    /// Parse and validate an identity
    pub fn new<S>(identity: S) -> Result<Self, IdError>
    where
        S: Into<String>,
    {
        let identity: String = identity.into();
        let len = identity.chars().count();
        if len != IDENTITY_LENGTH {
            return Err(IdError::InvalidIdentityLength(len));
        }
        if let Some(c) = identity
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '*'))
        {
            return Err(IdError::InvalidIdentityCharacter(c));
        }
        Ok(Self(identity))
    }

    /// Get as `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the identity as raw ASCII bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether this is a gateway identity (starts with `*`)
    pub fn is_gateway(&self) -> bool {
        self.0.starts_with('*')
    }
}

impl fmt::Display for IdentityString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for IdentityString {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for IdentityString {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for IdentityString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IdentityString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
