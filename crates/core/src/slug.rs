//! Slug lifecycle helpers.
//!
//! Slugs are unique per entity type. Soft-deleting a slug-bearing row rewrites
//! its slug with a deletion marker so the original value becomes available for
//! reuse while the unique constraint stays intact.

/// Marker inserted between the original slug and the deletion timestamp.
pub const DELETION_MARKER: &str = "--deleted-";

/// Suffix appended to a slug on soft deletion, e.g. appending to `suv` gives
/// `suv--deleted-1712345678901`.
///
/// `deleted_at_millis` should be the deletion time as Unix milliseconds so
/// repeated delete/create cycles of the same slug never collide.
pub fn deletion_suffix(deleted_at_millis: i64) -> String {
    format!("{DELETION_MARKER}{deleted_at_millis}")
}

/// Whether a slug carries the deletion marker.
pub fn is_deleted_slug(slug: &str) -> bool {
    slug.contains(DELETION_MARKER)
}
