//! Memory-based storage implementation of the GroupStorage trait

use reflect_storage_traits::GroupIdentity;
use reflect_storage_traits::groups::GroupStorage;
use reflect_storage_traits::groups::error::GroupError;
use reflect_storage_traits::groups::types::Group;

use crate::ReflectMemoryStorage;

impl ReflectMemoryStorage {
    fn validate_group(&self, group: &Group) -> Result<(), GroupError> {
        if group.members.len() > self.limits.max_group_members {
            return Err(GroupError::InvalidParameters(format!(
                "Group has {} members, at most {} are allowed",
                group.members.len(),
                self.limits.max_group_members
            )));
        }
        Ok(())
    }
}

impl GroupStorage for ReflectMemoryStorage {
    fn all_groups(&self) -> Result<Vec<Group>, GroupError> {
        let inner = self.inner.read();
        let mut groups: Vec<Group> = inner
            .groups
            .values()
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.group_identity.cmp(&b.group_identity));
        Ok(groups)
    }

    fn find_group(&self, group_identity: &GroupIdentity) -> Result<Option<Group>, GroupError> {
        let inner = self.inner.read();
        Ok(inner.groups.get(group_identity).cloned())
    }

    fn save_group(&self, group: Group) -> Result<(), GroupError> {
        self.validate_group(&group)?;

        let mut inner = self.inner.write();
        inner.groups.insert(group.group_identity.clone(), group);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reflect_storage_traits::test_utils::{create_test_group, create_test_group_identity};

    use super::*;
    use crate::ValidationLimits;

    #[test]
    fn test_find_group_requires_matching_creator() {
        let storage = ReflectMemoryStorage::default();
        let group_identity = create_test_group_identity(7, "CREATOR1");
        storage
            .save_group(create_test_group(group_identity.clone(), &["MEMBER01"]))
            .unwrap();

        assert!(storage.find_group(&group_identity).unwrap().is_some());

        // Same group id, different creator: a different group
        let other = create_test_group_identity(7, "CREATOR2");
        assert!(storage.find_group(&other).unwrap().is_none());
    }

    #[test]
    fn test_member_limit() {
        let storage =
            ReflectMemoryStorage::with_limits(ValidationLimits::new().with_max_group_members(1));
        let group = create_test_group(
            create_test_group_identity(1, "CREATOR1"),
            &["MEMBER01", "MEMBER02"],
        );

        let result = storage.save_group(group);
        assert!(matches!(result, Err(GroupError::InvalidParameters(_))));
        assert!(storage.all_groups().unwrap().is_empty());
    }
}
