//! Role entity.
//!
//! Maps to the `roles` table in the database schema.

use serde::{Deserialize, Serialize};

/// Administrator role name.
pub const ADMIN: &str = "ADMIN";
/// Regular member role name.
pub const USER: &str = "USER";
/// Sentinel role carried by suspended accounts.
pub const BANNED: &str = "BANNED";

/// Represents a named role assignable to users.
///
/// Maps to the `roles` table:
/// - id: BIGINT PRIMARY KEY
/// - name: VARCHAR(20) NOT NULL UNIQUE
///
/// Users and roles are joined through `user_roles` (many-to-many).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Check whether a role set carries the BANNED sentinel.
pub fn is_banned(roles: &[Role]) -> bool {
    roles.iter().any(|r| r.name == BANNED)
}

/// Check whether a role set carries ADMIN.
pub fn is_admin(roles: &[Role]) -> bool {
    roles.iter().any(|r| r.name == ADMIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_banned_detects_sentinel() {
        let roles = vec![Role::new(2, USER), Role::new(3, BANNED)];
        assert!(is_banned(&roles));
    }

    #[test]
    fn test_is_banned_false_without_sentinel() {
        let roles = vec![Role::new(2, USER)];
        assert!(!is_banned(&roles));
        assert!(!is_banned(&[]));
    }

    #[test]
    fn test_is_admin() {
        assert!(is_admin(&[Role::new(1, ADMIN)]));
        assert!(!is_admin(&[Role::new(2, USER)]));
    }
}
