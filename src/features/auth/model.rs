use serde::{Deserialize, Serialize};

/// Capability required to edit another owner's product description.
pub const PERM_EDIT_DESCRIPTION: &str = "products.edit_description";
/// Capability required to edit another owner's product category.
pub const PERM_EDIT_CATEGORY: &str = "products.edit_category";
/// Capability required to cancel a product publication.
pub const PERM_CANCEL_PUBLICATION: &str = "products.cancel_publication";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub permissions: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if the user holds a specific capability
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Moderator access to products requires the full capability set;
    /// holding a strict subset grants nothing.
    pub fn can_moderate_products(&self) -> bool {
        self.has_permission(PERM_EDIT_DESCRIPTION)
            && self.has_permission(PERM_EDIT_CATEGORY)
            && self.has_permission(PERM_CANCEL_PUBLICATION)
    }
}
