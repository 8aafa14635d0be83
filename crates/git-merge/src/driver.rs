//! Ties `LcaFinder`, `TreeMerger`, and the object store together into a
//! single "merge these two commits" entry point.

use git_hash::ObjectId;
use git_object::Tree;
use git_odb::ObjectStore;
use git_revwalk::LcaFinder;

use crate::{MergeError, MergeOptions, MergeOutput, MergeResult, NoCommonAncestorPolicy, TreeMerger};

pub struct MergeDriver;

impl MergeDriver {
    /// Merge `this_commit` and `other_commit`, picking a base via
    /// [`LcaFinder::find_lcas`].
    ///
    /// When no common ancestor exists, `options.no_common_ancestor`
    /// decides the base; currently the only policy is synthesizing an
    /// empty tree, so every path on both sides is treated as newly added.
    pub fn merge(
        store: &mut dyn ObjectStore,
        this_commit: ObjectId,
        other_commit: ObjectId,
        options: &MergeOptions,
    ) -> Result<MergeResult, MergeError> {
        let this = store.get_commit(&this_commit)?;
        let other = store.get_commit(&other_commit)?;

        let parents_of = |id: &ObjectId| store.parents_of(*id);
        let lcas = LcaFinder::find_lcas(&parents_of, this_commit, &[other_commit]);

        let base_tree = match lcas.first() {
            Some(&base_commit) => Some(store.get_commit(&base_commit)?.tree),
            None => {
                let NoCommonAncestorPolicy::SynthesizeEmptyTree = options.no_common_ancestor;
                tracing::debug!(
                    this = %this_commit,
                    other = %other_commit,
                    "no common ancestor, synthesizing an empty tree base"
                );
                None
            }
        };

        let outputs = TreeMerger::merge_trees(store, Some(this.tree), Some(other.tree), base_tree, options)?;

        // `TreeMerger` only emits updates for paths `other` touched, so the
        // assembly starts from `this`'s own tree rather than the base: a
        // path `this` alone added or changed is already there, and only
        // `other`'s side needs layering on top.
        let mut entries = store.get_tree(&this.tree)?.entries;
        let mut conflicts = Vec::new();

        for item in outputs {
            match item {
                MergeOutput::Entry(entry) => {
                    entries.retain(|e| e.path != entry.path);
                    entries.push(entry);
                }
                MergeOutput::Delete(path) => {
                    entries.retain(|e| e.path != path);
                }
                MergeOutput::Conflict(conflict) => conflicts.push(conflict),
            }
        }
        entries.sort();

        let tree = store.add_tree(Tree { entries })?;
        Ok(MergeResult { tree, conflicts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstr::BStr;
    use git_object::{Commit, FileMode, TreeEntry};
    use git_odb::InMemoryObjectStore;

    fn commit(store: &mut InMemoryObjectStore, tree: ObjectId, parents: Vec<ObjectId>) -> ObjectId {
        store.add_commit(Commit::new(tree, parents)).unwrap()
    }

    fn tree_with(store: &mut InMemoryObjectStore, entries: &[(&str, &[u8])]) -> ObjectId {
        let mut out = Vec::new();
        for (path, content) in entries {
            let oid = store.add_blob(content.to_vec()).unwrap();
            out.push(TreeEntry {
                mode: FileMode::Regular,
                path: (*path).into(),
                oid,
            });
        }
        store.add_tree(Tree { entries: out }).unwrap()
    }

    #[test]
    fn clean_merge_of_non_overlapping_changes() {
        let mut store = InMemoryObjectStore::default();
        let base_tree = tree_with(&mut store, &[("shared.txt", b"base")]);
        let base = commit(&mut store, base_tree, vec![]);

        let this_tree = tree_with(&mut store, &[("shared.txt", b"base"), ("this-only.txt", b"mine")]);
        let this = commit(&mut store, this_tree, vec![base]);

        let other_tree = tree_with(&mut store, &[("shared.txt", b"base"), ("other-only.txt", b"theirs")]);
        let other = commit(&mut store, other_tree, vec![base]);

        let options = MergeOptions::default();
        let result = MergeDriver::merge(&mut store, this, other, &options).unwrap();
        assert!(result.is_clean());

        let merged = store.get_tree(&result.tree).unwrap();
        assert!(merged.find(BStr::new("shared.txt")).is_some());
        assert!(merged.find(BStr::new("this-only.txt")).is_some());
        assert!(merged.find(BStr::new("other-only.txt")).is_some());
    }

    #[test]
    fn no_common_ancestor_synthesizes_empty_base() {
        let mut store = InMemoryObjectStore::default();
        let this_tree = tree_with(&mut store, &[("a.txt", b"a")]);
        let this = commit(&mut store, this_tree, vec![]);
        let other_tree = tree_with(&mut store, &[("b.txt", b"b")]);
        let other = commit(&mut store, other_tree, vec![]);

        let options = MergeOptions::default();
        let result = MergeDriver::merge(&mut store, this, other, &options).unwrap();
        assert!(result.is_clean());

        let merged = store.get_tree(&result.tree).unwrap();
        assert!(merged.find(BStr::new("a.txt")).is_some());
        assert!(merged.find(BStr::new("b.txt")).is_some());
    }

    #[test]
    fn delete_modify_conflict_is_reported_and_this_side_stays_in_the_tree() {
        let mut store = InMemoryObjectStore::default();
        let base_tree = tree_with(&mut store, &[("a.txt", b"base")]);
        let base = commit(&mut store, base_tree, vec![]);

        let this_tree = tree_with(&mut store, &[("a.txt", b"mine")]);
        let this = commit(&mut store, this_tree, vec![base]);

        let other_tree = Tree::new();
        let other_tree_id = store.add_tree(other_tree).unwrap();
        let other = commit(&mut store, other_tree_id, vec![base]);

        let options = MergeOptions::default();
        let result = MergeDriver::merge(&mut store, this, other, &options).unwrap();
        assert!(!result.is_clean());
        assert_eq!(result.conflicts.len(), 1);

        // the driver assembles the tree from `this` and layers `other`'s
        // changes on top; since this path never got a clean resolution,
        // this's own content is what's left at that path.
        let merged = store.get_tree(&result.tree).unwrap();
        let entry = merged.find(BStr::new("a.txt")).unwrap();
        assert_eq!(store.get_blob(&entry.oid).unwrap(), b"mine");
    }
}
