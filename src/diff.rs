//! Set reconciliation between two registry snapshots.
//!
//! Produces the minimal review surface for a proposed change: sets that were
//! added or modified, and sets that were genuinely removed. A primary that
//! disappears as a key but is now a member of another set (including as a
//! ccTLD alias) has been absorbed, not removed.

use log::debug;

use crate::models::SetRegistry;

/// Compares `old` and `new`, returning `(changed_or_added, removed)`.
///
/// # Arguments
///
/// * `old` - Previous snapshot
/// * `new` - Proposed snapshot
///
/// # Returns
///
/// - `changed_or_added` holds the `new` value of every key that is absent from
///   `old` or whose set differs from the old one.
/// - `removed` holds the `old` value of every key absent from `new` that no set
///   in `new` includes.
///
/// Unchanged keys appear in neither. Both maps keep the order of their source
/// snapshot.
pub fn diff(old: &SetRegistry, new: &SetRegistry) -> (SetRegistry, SetRegistry) {
    let mut changed_or_added = SetRegistry::new();
    for (primary, site_set) in new {
        match old.get(primary) {
            Some(previous) if previous == site_set => {}
            Some(_) => {
                debug!("Set {primary} was modified");
                changed_or_added.insert(primary.clone(), site_set.clone());
            }
            None => {
                debug!("Set {primary} was added");
                changed_or_added.insert(primary.clone(), site_set.clone());
            }
        }
    }

    let mut removed = SetRegistry::new();
    for (primary, site_set) in old {
        if new.contains_key(primary) {
            continue;
        }
        let absorbed_by = new
            .values()
            .find(|candidate| candidate.includes(primary, true));
        match absorbed_by {
            Some(owner) => debug!("Set {primary} was absorbed into {}", owner.primary),
            None => {
                debug!("Set {primary} was removed");
                removed.insert(primary.clone(), site_set.clone());
            }
        }
    }

    (changed_or_added, removed)
}

/// Keeps only the sets whose primary is listed in `primaries`.
///
/// Listed primaries with no matching set are ignored.
pub fn filter_primaries(sets: SetRegistry, primaries: &[String]) -> SetRegistry {
    sets.into_iter()
        .filter(|(primary, _)| primaries.iter().any(|wanted| wanted == primary))
        .collect()
}
