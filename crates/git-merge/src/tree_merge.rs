//! Path-level three-way tree merge.
//!
//! Walks the structural changes on each side (`git-odb`'s `tree_changes`)
//! and, for every change the other side made, decides whether this side
//! made the identical change, no change, or a conflicting one. Ported from
//! the reference `merge_tree`/`_merge_entry` pair: same dispatch table, same
//! conflict messages, same fallback when no file merger is configured.

use std::collections::HashMap;

use bstr::BString;
use git_hash::ObjectId;
use git_object::TreeEntry;
use git_odb::{ChangeKind, ObjectStore, TreeChange};

use crate::{MergeConflict, MergeError, MergeOptions, MergeOutput};

pub struct TreeMerger;

impl TreeMerger {
    /// Merge `this_tree` and `other_tree` against their common `base_tree`.
    ///
    /// Any of the three may be absent, representing an empty tree (this is
    /// how [`crate::MergeDriver`] handles the no-common-ancestor case).
    /// Output order follows `tree_changes(base, other)`, per this crate's
    /// ordering guarantee.
    pub fn merge_trees(
        store: &mut dyn ObjectStore,
        this_tree: Option<ObjectId>,
        other_tree: Option<ObjectId>,
        base_tree: Option<ObjectId>,
        options: &MergeOptions,
    ) -> Result<Vec<MergeOutput>, MergeError> {
        let changes_this = store.tree_changes(base_tree, this_tree, options.renames)?;
        let changes_other = store.tree_changes(base_tree, other_tree, options.renames)?;

        let mut by_base_path: HashMap<BString, &TreeChange> = HashMap::new();
        let mut by_this_path: HashMap<BString, &TreeChange> = HashMap::new();
        for change in &changes_this {
            if !matches!(change.kind, ChangeKind::Add | ChangeKind::Copy) {
                if let Some(old) = &change.old {
                    by_base_path.insert(old.path.clone(), change);
                }
            }
            if let Some(new) = &change.new {
                by_this_path.insert(new.path.clone(), change);
            }
        }

        let mut out = Vec::new();
        for other_change in &changes_other {
            let this_change = match other_change.kind {
                ChangeKind::Add | ChangeKind::Copy => other_change
                    .new
                    .as_ref()
                    .and_then(|e| by_this_path.get(&e.path))
                    .copied(),
                _ => other_change
                    .old
                    .as_ref()
                    .and_then(|e| by_base_path.get(&e.path))
                    .copied(),
            };

            if this_change == Some(other_change) {
                continue;
            }

            Self::dispatch(store, this_change, other_change, options, &mut out)?;
        }

        Ok(out)
    }

    fn dispatch(
        store: &mut dyn ObjectStore,
        this_change: Option<&TreeChange>,
        other_change: &TreeChange,
        options: &MergeOptions,
        out: &mut Vec<MergeOutput>,
    ) -> Result<(), MergeError> {
        match other_change.kind {
            ChangeKind::Add | ChangeKind::Copy => {
                let other_new = other_change.new.as_ref().expect("add/copy change always has new");
                match this_change {
                    Some(tc) if tc.new.as_ref() != Some(other_new) => {
                        out.push(MergeOutput::Conflict(MergeConflict {
                            this_entry: tc.new.clone(),
                            other_entry: Some(other_new.clone()),
                            base_entry: other_change.old.clone(),
                            message: format!("Both this and other add new file {}", other_new.path),
                            content_ranges: Vec::new(),
                        }));
                    }
                    Some(_) => {}
                    None => out.push(MergeOutput::Entry(other_new.clone())),
                }
            }

            ChangeKind::Delete => {
                let old = other_change.old.as_ref().expect("delete change always has old");
                match this_change {
                    Some(tc) if !matches!(tc.kind, ChangeKind::Delete | ChangeKind::Unchanged) => {
                        out.push(MergeOutput::Conflict(MergeConflict {
                            this_entry: tc.new.clone(),
                            other_entry: other_change.new.clone(),
                            base_entry: Some(old.clone()),
                            message: format!("{} is deleted in other but modified in this", old.path),
                            content_ranges: Vec::new(),
                        }));
                    }
                    _ => out.push(MergeOutput::Delete(old.path.clone())),
                }
            }

            ChangeKind::Rename => {
                let other_new = other_change.new.as_ref().expect("rename change always has new");
                let other_old = other_change.old.as_ref().expect("rename change always has old");
                match this_change {
                    Some(tc) if tc.kind == ChangeKind::Rename => {
                        let this_new = tc.new.as_ref().expect("rename change always has new");
                        if this_new.path != other_new.path {
                            out.push(MergeOutput::Conflict(MergeConflict {
                                this_entry: Some(this_new.clone()),
                                other_entry: Some(other_new.clone()),
                                base_entry: Some(other_old.clone()),
                                message: format!(
                                    "{} was renamed by both sides ({} / {})",
                                    other_old.path, other_new.path, this_new.path
                                ),
                                content_ranges: Vec::new(),
                            }));
                        } else {
                            Self::merge_entry(
                                store,
                                this_new.clone(),
                                other_new.clone(),
                                other_old.clone(),
                                options,
                                out,
                            )?;
                            out.push(MergeOutput::Delete(other_old.path.clone()));
                        }
                    }
                    Some(tc) if tc.kind == ChangeKind::Modify => {
                        let this_new = tc.new.as_ref().expect("modify change always has new");
                        Self::merge_entry(
                            store,
                            this_new.clone(),
                            other_new.clone(),
                            other_old.clone(),
                            options,
                            out,
                        )?;
                        out.push(MergeOutput::Delete(other_old.path.clone()));
                    }
                    Some(tc) if tc.kind == ChangeKind::Delete => {
                        out.push(MergeOutput::Conflict(MergeConflict {
                            this_entry: None,
                            other_entry: Some(other_new.clone()),
                            base_entry: Some(other_old.clone()),
                            message: format!(
                                "{} is deleted in this but renamed to {} in other",
                                other_old.path, other_new.path
                            ),
                            content_ranges: Vec::new(),
                        }));
                    }
                    Some(tc) => {
                        return Err(MergeError::UnsupportedChangeCombination(
                            other_old.path.clone(),
                            format!("{:?} on this paired with a rename on other", tc.kind),
                        ));
                    }
                    None => {
                        out.push(MergeOutput::Entry(other_new.clone()));
                        out.push(MergeOutput::Delete(other_old.path.clone()));
                    }
                }
            }

            ChangeKind::Modify => {
                let other_new = other_change.new.as_ref().expect("modify change always has new");
                let other_old = other_change.old.as_ref().expect("modify change always has old");
                match this_change {
                    Some(tc) if tc.kind == ChangeKind::Delete => {
                        out.push(MergeOutput::Conflict(MergeConflict {
                            this_entry: None,
                            other_entry: Some(other_new.clone()),
                            base_entry: Some(other_old.clone()),
                            message: format!("{} is deleted in this but modified in other", other_old.path),
                            content_ranges: Vec::new(),
                        }));
                    }
                    Some(tc) if matches!(tc.kind, ChangeKind::Modify | ChangeKind::Rename) => {
                        let this_new = tc.new.as_ref().expect("modify/rename change always has new");
                        let renamed_away = tc.kind == ChangeKind::Rename;
                        Self::merge_entry(
                            store,
                            this_new.clone(),
                            other_new.clone(),
                            other_old.clone(),
                            options,
                            out,
                        )?;
                        if renamed_away {
                            out.push(MergeOutput::Delete(other_old.path.clone()));
                        }
                    }
                    Some(tc) => {
                        return Err(MergeError::UnsupportedChangeCombination(
                            other_old.path.clone(),
                            format!("{:?} on this paired with a modify on other", tc.kind),
                        ));
                    }
                    None => out.push(MergeOutput::Entry(other_new.clone())),
                }
            }

            ChangeKind::Unchanged => {}
        }

        Ok(())
    }

    /// Three-way merge a single file's content, per §4.4's `_merge_entry`.
    fn merge_entry(
        store: &mut dyn ObjectStore,
        this_entry: TreeEntry,
        other_entry: TreeEntry,
        base_entry: TreeEntry,
        options: &MergeOptions,
        out: &mut Vec<MergeOutput>,
    ) -> Result<(), MergeError> {
        let Some((merged, ranges)) = ({
            let this_bytes = store.get_blob(&this_entry.oid)?;
            let other_bytes = store.get_blob(&other_entry.oid)?;
            let base_bytes = store.get_blob(&base_entry.oid)?;
            options.file_merger.merge(&this_bytes, &other_bytes, &base_bytes)
        }) else {
            out.push(MergeOutput::Conflict(MergeConflict {
                this_entry: Some(this_entry.clone()),
                other_entry: Some(other_entry.clone()),
                base_entry: Some(base_entry),
                message: format!("Conflict in {} but no file merger provided", this_entry.path),
                content_ranges: Vec::new(),
            }));
            return Ok(());
        };

        if !ranges.is_empty() {
            out.push(MergeOutput::Conflict(MergeConflict {
                this_entry: Some(this_entry.clone()),
                other_entry: Some(other_entry),
                base_entry: Some(base_entry),
                message: format!("content conflict merging {}", this_entry.path),
                content_ranges: ranges,
            }));
            return Ok(());
        }

        let mode = if this_entry.mode == base_entry.mode || this_entry.mode == other_entry.mode {
            other_entry.mode
        } else if base_entry.mode != other_entry.mode {
            out.push(MergeOutput::Conflict(MergeConflict {
                this_entry: Some(this_entry.clone()),
                other_entry: Some(other_entry.clone()),
                base_entry: Some(base_entry.clone()),
                message: format!(
                    "{} has conflicting file modes ({:?} base, {:?} this, {:?} other)",
                    this_entry.path, base_entry.mode, this_entry.mode, other_entry.mode
                ),
                content_ranges: Vec::new(),
            }));
            return Ok(());
        } else {
            this_entry.mode
        };

        let blob_id = store.add_blob(merged)?;
        out.push(MergeOutput::Entry(TreeEntry {
            mode,
            path: this_entry.path,
            oid: blob_id,
        }));
        Ok(())
    }
}
