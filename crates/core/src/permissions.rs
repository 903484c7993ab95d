//! Well-known permission strings.
//!
//! Roles map to permission strings via the `role_permissions` table; the
//! wildcard [`PERM_ALL`] grants everything. These must match the seed data in
//! the roles migration.

pub const PERM_ALL: &str = "all";

pub const PERM_CARS_MANAGE: &str = "cars.manage";
pub const PERM_TAGS_MANAGE: &str = "tags.manage";
pub const PERM_PROMOS_MANAGE: &str = "promos.manage";
pub const PERM_CAROUSELS_MANAGE: &str = "carousels.manage";
pub const PERM_COMMENTS_MANAGE: &str = "comments.manage";
pub const PERM_CERTIFICATES_MANAGE: &str = "certificates.manage";

/// Whether a permission set grants `required`, honouring the wildcard.
pub fn grants(permissions: &[String], required: &str) -> bool {
    permissions
        .iter()
        .any(|p| p == PERM_ALL || p == required)
}
