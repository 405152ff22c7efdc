//! Group membership index.

use crate::getent::{GroupEntry, PasswdEntry};
use std::collections::{BTreeSet, HashMap};

/// Read-only index over the group and passwd tables.
///
/// Maps gid -> group name and user -> every group the user belongs to,
/// counting both supplementary membership and the passwd primary gid.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    names_by_gid: HashMap<u32, String>,
    groups_by_user: HashMap<String, BTreeSet<String>>,
}

impl GroupIndex {
    pub fn build(groups: &[GroupEntry], users: &[PasswdEntry]) -> Self {
        let mut index = Self::default();

        for group in groups {
            index.names_by_gid.insert(group.gid, group.name.clone());
            for member in &group.members {
                index
                    .groups_by_user
                    .entry(member.clone())
                    .or_default()
                    .insert(group.name.clone());
            }
        }

        for user in users {
            if let Some(group) = index.names_by_gid.get(&user.gid) {
                index
                    .groups_by_user
                    .entry(user.name.clone())
                    .or_default()
                    .insert(group.clone());
            }
        }

        index
    }

    pub fn group_name(&self, gid: u32) -> Option<&str> {
        self.names_by_gid.get(&gid).map(String::as_str)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.names_by_gid.values().any(|g| g == name)
    }

    /// True when `user` belongs to `group` by either kind of membership.
    pub fn is_member(&self, user: &str, group: &str) -> bool {
        self.groups_by_user
            .get(user)
            .is_some_and(|groups| groups.contains(group))
    }

    /// Every user that belongs to `group`, sorted.
    pub fn members_of(&self, group: &str) -> BTreeSet<String> {
        self.groups_by_user
            .iter()
            .filter(|(_, groups)| groups.contains(group))
            .map(|(user, _)| user.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::getent::{parse_group, parse_passwd};

    fn index() -> GroupIndex {
        let groups = parse_group("lab:x:500:alice,bob\nops:x:600:carol\nempty:x:700:\n");
        let users = parse_passwd(
            "alice:x:1:100::/:/bin/sh\n\
             dave:x:4:500::/:/bin/sh\n\
             erin:x:5:999::/:/bin/sh\n",
        );
        GroupIndex::build(&groups, &users)
    }

    #[test]
    fn test_supplementary_membership() {
        let index = index();
        assert!(index.is_member("alice", "lab"));
        assert!(index.is_member("bob", "lab"));
        assert!(index.is_member("carol", "ops"));
        assert!(!index.is_member("carol", "lab"));
    }

    #[test]
    fn test_primary_group_membership() {
        let index = index();
        assert!(index.is_member("dave", "lab"));
        // gid 999 has no group entry
        assert!(!index.is_member("erin", "lab"));
    }

    #[test]
    fn test_members_of() {
        let index = index();
        let members: Vec<_> = index.members_of("lab").into_iter().collect();
        assert_eq!(members, vec!["alice", "bob", "dave"]);
        assert!(index.members_of("empty").is_empty());
        assert!(index.has_group("empty"));
        assert!(!index.has_group("nosuchgroup"));
    }

    #[test]
    fn test_group_name_by_gid() {
        let index = index();
        assert_eq!(index.group_name(600), Some("ops"));
        assert_eq!(index.group_name(1), None);
    }
}
