//! Reconciliation planning for related-entity updates.
//!
//! Updates are replace-style: the caller supplies the complete target state
//! and the plan describes how to get there. Two shapes exist:
//!
//! - [`IdDiff`] for many-to-many join tables (car↔tag, car↔promo): ids present
//!   in both sets are left untouched, the rest are created or deleted.
//! - [`VariantSyncPlan`] for owned children with an optional id (variants):
//!   items without an id are inserts, items with an id are in-place updates,
//!   and existing ids absent from the incoming list are deletes. Matched items
//!   are always written, even when no field changed.

use std::collections::HashSet;

use crate::types::DbId;

/// Create/delete plan for a join table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdDiff {
    pub to_create: Vec<DbId>,
    pub to_delete: Vec<DbId>,
}

impl IdDiff {
    /// Diff the existing linked ids against the caller-supplied target list.
    pub fn between(existing: &[DbId], target: &[DbId]) -> Self {
        let existing_set: HashSet<DbId> = existing.iter().copied().collect();
        let target_set: HashSet<DbId> = target.iter().copied().collect();

        // Preserve the caller's ordering for inserts.
        let to_create = target
            .iter()
            .copied()
            .filter(|id| !existing_set.contains(id))
            .collect();
        let to_delete = existing
            .iter()
            .copied()
            .filter(|id| !target_set.contains(id))
            .collect();

        IdDiff {
            to_create,
            to_delete,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }
}

/// An incoming child row: no id means "insert me".
#[derive(Debug, Clone)]
pub struct ChildItem<T> {
    pub id: Option<DbId>,
    pub value: T,
}

/// Reconciliation plan for owned one-to-many children.
#[derive(Debug, Clone)]
pub struct VariantSyncPlan<T> {
    /// Items to insert (no id supplied).
    pub create: Vec<T>,
    /// `(id, value)` pairs to update in place.
    pub update: Vec<(DbId, T)>,
    /// Existing ids absent from the incoming list.
    pub delete: Vec<DbId>,
}

impl<T> VariantSyncPlan<T> {
    /// Plan the sync of `existing_ids` against the incoming item list.
    ///
    /// Incoming ids that do not exist on the parent are still routed to
    /// `update`; the repository treats a zero-row update as a no-op.
    pub fn plan(existing_ids: &[DbId], incoming: Vec<ChildItem<T>>) -> Self {
        let incoming_ids: HashSet<DbId> = incoming.iter().filter_map(|item| item.id).collect();

        let delete = existing_ids
            .iter()
            .copied()
            .filter(|id| !incoming_ids.contains(id))
            .collect();

        let mut create = Vec::new();
        let mut update = Vec::new();
        for item in incoming {
            match item.id {
                Some(id) => update.push((id, item.value)),
                None => create.push(item.value),
            }
        }

        VariantSyncPlan {
            create,
            update,
            delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_diff_creates_and_deletes() {
        let diff = IdDiff::between(&[1, 2, 3], &[2, 3, 4, 5]);
        assert_eq!(diff.to_create, vec![4, 5]);
        assert_eq!(diff.to_delete, vec![1]);
    }

    #[test]
    fn test_id_diff_matched_ids_are_untouched() {
        let diff = IdDiff::between(&[7, 8], &[8, 7]);
        assert!(diff.is_noop());
    }

    #[test]
    fn test_id_diff_empty_target_deletes_everything() {
        let diff = IdDiff::between(&[1, 2], &[]);
        assert_eq!(diff.to_create, Vec::<i64>::new());
        assert_eq!(diff.to_delete, vec![1, 2]);
    }

    #[test]
    fn test_variant_plan_splits_create_update_delete() {
        // Existing variants {A=1, B=2}; incoming keeps A and adds one new.
        let incoming = vec![
            ChildItem {
                id: Some(1),
                value: "updated-a",
            },
            ChildItem {
                id: None,
                value: "new",
            },
        ];

        let plan = VariantSyncPlan::plan(&[1, 2], incoming);
        assert_eq!(plan.create, vec!["new"]);
        assert_eq!(plan.update, vec![(1, "updated-a")]);
        assert_eq!(plan.delete, vec![2]);
    }

    #[test]
    fn test_variant_plan_matched_item_is_always_written() {
        // Even an identical payload lands in `update`; this is a full-replace
        // reconciliation, not a field-level diff.
        let incoming = vec![ChildItem {
            id: Some(9),
            value: "same",
        }];
        let plan = VariantSyncPlan::plan(&[9], incoming);
        assert!(plan.create.is_empty());
        assert!(plan.delete.is_empty());
        assert_eq!(plan.update, vec![(9, "same")]);
    }
}
