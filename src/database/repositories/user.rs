//! User repository implementation

use crate::database::store::Store;
use crate::models::{Role, User};

impl Store {
    /// Find user by username (exact match)
    pub fn find_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }

    /// List users in id order
    pub fn list_users(&self) -> Vec<&User> {
        self.users.values().collect()
    }

    /// Users holding the given role
    pub fn users_with_role(&self, role: Role) -> Vec<&User> {
        self.users.values().filter(|user| user.role == role).collect()
    }
}
