//! Structural tree-to-tree diffing.
//!
//! Walks two trees in parallel, sorted by git's tree entry order, producing
//! a flat list of [`TreeChange`] records. Mirrors the teacher line-diff
//! walk in shape (merge the two sorted entry lists, recurse into matching
//! subtrees) but reports structural changes rather than line hunks, since
//! line-level diffing of blob content is [`git-diff`]'s concern.

use std::cmp::Ordering;

use bstr::BString;
use git_hash::ObjectId;
#[cfg(test)]
use git_object::FileMode;
use git_object::TreeEntry;

use crate::OdbError;

/// The kind of structural change a [`TreeChange`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Copy,
    Delete,
    Modify,
    Rename,
    Unchanged,
}

/// A single structural difference between two trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeChange {
    pub kind: ChangeKind,
    pub old: Option<TreeEntry>,
    pub new: Option<TreeEntry>,
}

impl TreeChange {
    fn add(entry: TreeEntry) -> Self {
        Self {
            kind: ChangeKind::Add,
            old: None,
            new: Some(entry),
        }
    }

    fn delete(entry: TreeEntry) -> Self {
        Self {
            kind: ChangeKind::Delete,
            old: Some(entry),
            new: None,
        }
    }

    fn modify(old: TreeEntry, new: TreeEntry) -> Self {
        Self {
            kind: ChangeKind::Modify,
            old: Some(old),
            new: Some(new),
        }
    }

    fn rename(old: TreeEntry, new: TreeEntry) -> Self {
        Self {
            kind: ChangeKind::Rename,
            old: Some(old),
            new: Some(new),
        }
    }
}

/// Detects renames and copies from a diff's raw deletes and adds.
///
/// Passed through to [`crate::ObjectStore::tree_changes`]; when absent, no
/// Rename or Copy change is ever produced.
pub trait RenameDetector {
    /// Given the leaf entries that were deleted and added by a tree diff,
    /// return the pairs that should be reported as renames instead.
    fn detect_renames(&self, deleted: &[TreeEntry], added: &[TreeEntry]) -> Vec<(usize, usize)>;
}

/// Matches deletions and additions that point at byte-identical blob content.
///
/// Grounded on the exact-OID phase of the teacher's rename detector: a
/// delete and an add with the same blob id are the same content under a
/// new path, with no need to look at similarity scoring.
pub struct ExactOidRenameDetector;

impl RenameDetector for ExactOidRenameDetector {
    fn detect_renames(&self, deleted: &[TreeEntry], added: &[TreeEntry]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let mut used_added = vec![false; added.len()];
        for (di, del) in deleted.iter().enumerate() {
            if del.mode.is_tree() {
                continue;
            }
            for (ai, add) in added.iter().enumerate() {
                if used_added[ai] || add.mode.is_tree() {
                    continue;
                }
                if del.oid == add.oid {
                    pairs.push((di, ai));
                    used_added[ai] = true;
                    break;
                }
            }
        }
        pairs
    }
}

/// Walk two (possibly absent) trees, producing structural changes.
///
/// `lookup` resolves a tree id to its parsed entries; it is expected to be
/// backed by the same store the changes will eventually be applied to.
pub fn diff_trees(
    lookup: &dyn Fn(&ObjectId) -> Result<Vec<TreeEntry>, OdbError>,
    old_entries: &[TreeEntry],
    new_entries: &[TreeEntry],
    renames: Option<&dyn RenameDetector>,
) -> Result<Vec<TreeChange>, OdbError> {
    let mut changes = Vec::new();
    walk(lookup, old_entries, new_entries, &BString::from(""), &mut changes)?;

    if let Some(detector) = renames {
        apply_renames(&mut changes, detector);
    }

    Ok(changes)
}

fn walk(
    lookup: &dyn Fn(&ObjectId) -> Result<Vec<TreeEntry>, OdbError>,
    old_entries: &[TreeEntry],
    new_entries: &[TreeEntry],
    prefix: &BString,
    out: &mut Vec<TreeChange>,
) -> Result<(), OdbError> {
    let mut oi = 0;
    let mut ni = 0;

    while oi < old_entries.len() || ni < new_entries.len() {
        match (old_entries.get(oi), new_entries.get(ni)) {
            (Some(old), Some(new)) => match TreeEntry::cmp_entries(old, new) {
                Ordering::Less => {
                    collect_deleted(lookup, old, prefix, out)?;
                    oi += 1;
                }
                Ordering::Greater => {
                    collect_added(lookup, new, prefix, out)?;
                    ni += 1;
                }
                Ordering::Equal => {
                    collect_matched(lookup, old, new, prefix, out)?;
                    oi += 1;
                    ni += 1;
                }
            },
            (Some(old), None) => {
                collect_deleted(lookup, old, prefix, out)?;
                oi += 1;
            }
            (None, Some(new)) => {
                collect_added(lookup, new, prefix, out)?;
                ni += 1;
            }
            (None, None) => break,
        }
    }

    Ok(())
}

fn full_path(prefix: &BString, path: &BString) -> BString {
    if prefix.is_empty() {
        path.clone()
    } else {
        let mut p = prefix.clone();
        p.push(b'/');
        p.extend_from_slice(path);
        p
    }
}

fn joined(entry: &TreeEntry, prefix: &BString) -> TreeEntry {
    TreeEntry {
        mode: entry.mode,
        path: full_path(prefix, &entry.path),
        oid: entry.oid,
    }
}

fn collect_deleted(
    lookup: &dyn Fn(&ObjectId) -> Result<Vec<TreeEntry>, OdbError>,
    entry: &TreeEntry,
    prefix: &BString,
    out: &mut Vec<TreeChange>,
) -> Result<(), OdbError> {
    let entry = joined(entry, prefix);
    if entry.mode.is_tree() {
        let children = lookup(&entry.oid)?;
        walk(lookup, &children, &[], &entry.path, out)?;
    } else {
        out.push(TreeChange::delete(entry));
    }
    Ok(())
}

fn collect_added(
    lookup: &dyn Fn(&ObjectId) -> Result<Vec<TreeEntry>, OdbError>,
    entry: &TreeEntry,
    prefix: &BString,
    out: &mut Vec<TreeChange>,
) -> Result<(), OdbError> {
    let entry = joined(entry, prefix);
    if entry.mode.is_tree() {
        let children = lookup(&entry.oid)?;
        walk(lookup, &[], &children, &entry.path, out)?;
    } else {
        out.push(TreeChange::add(entry));
    }
    Ok(())
}

fn collect_matched(
    lookup: &dyn Fn(&ObjectId) -> Result<Vec<TreeEntry>, OdbError>,
    old: &TreeEntry,
    new: &TreeEntry,
    prefix: &BString,
    out: &mut Vec<TreeChange>,
) -> Result<(), OdbError> {
    let old_is_tree = old.mode.is_tree();
    let new_is_tree = new.mode.is_tree();
    let old = joined(old, prefix);
    let new = joined(new, prefix);

    match (old_is_tree, new_is_tree) {
        (true, true) => {
            if old.oid != new.oid {
                let old_children = lookup(&old.oid)?;
                let new_children = lookup(&new.oid)?;
                walk(lookup, &old_children, &new_children, &old.path, out)?;
            }
        }
        (true, false) => {
            let old_children = lookup(&old.oid)?;
            walk(lookup, &old_children, &[], &old.path, out)?;
            out.push(TreeChange::add(new));
        }
        (false, true) => {
            out.push(TreeChange::delete(old));
            let new_children = lookup(&new.oid)?;
            walk(lookup, &[], &new_children, &new.path, out)?;
        }
        (false, false) => {
            if old.oid != new.oid || old.mode.raw() != new.mode.raw() {
                out.push(TreeChange::modify(old, new));
            }
        }
    }

    Ok(())
}

fn apply_renames(changes: &mut Vec<TreeChange>, detector: &dyn RenameDetector) {
    let delete_idxs: Vec<usize> = changes
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind == ChangeKind::Delete)
        .map(|(i, _)| i)
        .collect();
    let add_idxs: Vec<usize> = changes
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind == ChangeKind::Add)
        .map(|(i, _)| i)
        .collect();

    let deleted: Vec<TreeEntry> = delete_idxs
        .iter()
        .map(|&i| changes[i].old.clone().expect("delete change always has old"))
        .collect();
    let added: Vec<TreeEntry> = add_idxs
        .iter()
        .map(|&i| changes[i].new.clone().expect("add change always has new"))
        .collect();

    let pairs = detector.detect_renames(&deleted, &added);
    if pairs.is_empty() {
        return;
    }

    let mut renamed = vec![false; changes.len()];
    for (di, ai) in pairs {
        let delete_change_idx = delete_idxs[di];
        let add_change_idx = add_idxs[ai];
        let old = changes[delete_change_idx].old.clone().unwrap();
        let new = changes[add_change_idx].new.clone().unwrap();
        changes[delete_change_idx] = TreeChange::rename(old, new);
        renamed[add_change_idx] = true;
    }

    let mut i = 0;
    changes.retain(|_| {
        let keep = !renamed[i];
        i += 1;
        keep
    });
}
