//! Group identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::IdentityString;
use crate::error::IdError;

/// Length of a group id in bytes
pub const GROUP_ID_LENGTH: usize = 8;

/// Group ID as chosen by the group creator (8 opaque bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId([u8; GROUP_ID_LENGTH]);

impl GroupId {
    /// Create a new GroupId from raw bytes
    pub fn new(bytes: [u8; GROUP_ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create a new GroupId from a byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IdError> {
        let bytes: [u8; GROUP_ID_LENGTH] =
            bytes.try_into().map_err(|_| IdError::InvalidLength {
                expected: GROUP_ID_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Convert the GroupId to a byte slice
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Convert the GroupId to a byte vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Numeric representation (little-endian), as carried by the wire protocol
    pub fn to_u64(&self) -> u64 {
        u64::from_le_bytes(self.0)
    }
}

impl From<u64> for GroupId {
    fn from(id: u64) -> Self {
        Self(id.to_le_bytes())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for GroupId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&hex::decode(s)?)
    }
}

/// Globally unique group identity: the group id together with the creator's identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupIdentity {
    /// Group id chosen by the creator
    pub group_id: GroupId,
    /// Identity of the group creator
    pub creator_identity: IdentityString,
}

impl GroupIdentity {
    /// Create a new group identity
    pub fn new(group_id: GroupId, creator_identity: IdentityString) -> Self {
        Self {
            group_id,
            creator_identity,
        }
    }
}

impl fmt::Display for GroupIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.creator_identity, self.group_id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_group_id_from_slice() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let group_id = GroupId::from_slice(&bytes).unwrap();
        assert_eq!(group_id.as_slice(), &bytes);
        assert_eq!(group_id.to_vec(), bytes.to_vec());
    }

    #[test]
    fn test_group_id_from_slice_wrong_length() {
        let result = GroupId::from_slice(&[1u8, 2, 3]);
        assert_eq!(
            result,
            Err(IdError::InvalidLength {
                expected: 8,
                actual: 3
            })
        );
    }

    #[test]
    fn test_group_id_from_u64_is_little_endian() {
        let group_id = GroupId::from(7u64);
        assert_eq!(group_id.as_slice(), &[7, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(group_id.to_u64(), 7);
        assert_eq!(group_id.to_string(), "0700000000000000");
    }

    #[test]
    fn test_group_id_parse_hex() {
        let group_id: GroupId = "0102030405060708".parse().unwrap();
        assert_eq!(group_id.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!("0102".parse::<GroupId>().is_err());
        assert!("not hex".parse::<GroupId>().is_err());
    }

    #[test]
    fn test_group_id_hash() {
        let id1 = GroupId::from(1u64);
        let id2 = GroupId::from(2u64);
        let id1_dup = GroupId::from(1u64);

        let mut set = HashSet::new();
        set.insert(id1);
        set.insert(id2);

        assert!(set.contains(&id1_dup));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_group_identity_display() {
        let identity = GroupIdentity::new(
            GroupId::from(1u64),
            IdentityString::new("CREATOR1").unwrap(),
        );
        assert_eq!(identity.to_string(), "CREATOR1/0100000000000000");
    }

    #[test]
    fn test_group_identity_serialization() {
        let identity = GroupIdentity::new(
            GroupId::from(42u64),
            IdentityString::new("CREATOR1").unwrap(),
        );
        let json = serde_json::to_string(&identity).expect("Failed to serialize");
        let deserialized: GroupIdentity =
            serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(identity, deserialized);
    }
}
