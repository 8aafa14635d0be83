//! Structural tree merges driven end to end through `MergeDriver`, against
//! the in-memory object store, covering the tree-level scenarios a real
//! three-way merge needs to get right: nested directories, agreed deletes,
//! and a rename crossed with a content edit.

use bstr::BStr;
use git_hash::ObjectId;
use git_object::{Commit, FileMode, Tree, TreeEntry};
use git_odb::{ExactOidRenameDetector, InMemoryObjectStore, ObjectStore};
use git_merge::{MergeDriver, MergeOptions};

fn commit(store: &mut InMemoryObjectStore, tree: ObjectId, parents: Vec<ObjectId>) -> ObjectId {
    store.add_commit(Commit::new(tree, parents)).unwrap()
}

fn blob(store: &mut InMemoryObjectStore, content: &[u8]) -> ObjectId {
    store.add_blob(content.to_vec()).unwrap()
}

fn entry(path: &str, oid: ObjectId) -> TreeEntry {
    TreeEntry {
        mode: FileMode::Regular,
        path: path.into(),
        oid,
    }
}

#[test]
fn nested_directory_changes_on_each_side_merge_cleanly() {
    let mut store = InMemoryObjectStore::default();
    let readme = blob(&mut store, b"readme\n");
    let a_impl = blob(&mut store, b"fn a() {}\n");
    let base_tree = store
        .add_tree(Tree {
            entries: vec![entry("README.md", readme), entry("src/a.rs", a_impl)],
        })
        .unwrap();
    let base = commit(&mut store, base_tree, vec![]);

    let new_file = blob(&mut store, b"fn b() {}\n");
    let this_tree = store
        .add_tree(Tree {
            entries: vec![
                entry("README.md", readme),
                entry("src/a.rs", a_impl),
                entry("src/b.rs", new_file),
            ],
        })
        .unwrap();
    let this = commit(&mut store, this_tree, vec![base]);

    let edited_readme = blob(&mut store, b"readme, now longer\n");
    let other_tree = store
        .add_tree(Tree {
            entries: vec![entry("README.md", edited_readme), entry("src/a.rs", a_impl)],
        })
        .unwrap();
    let other = commit(&mut store, other_tree, vec![base]);

    let options = MergeOptions::default();
    let result = MergeDriver::merge(&mut store, this, other, &options).unwrap();
    assert!(result.is_clean());

    let merged = store.get_tree(&result.tree).unwrap();
    assert!(merged.find(BStr::new("src/b.rs")).is_some());
    let readme_entry = merged.find(BStr::new("README.md")).unwrap();
    assert_eq!(store.get_blob(&readme_entry.oid).unwrap(), b"readme, now longer\n");
}

#[test]
fn deleting_the_same_file_on_both_sides_is_clean() {
    let mut store = InMemoryObjectStore::default();
    let doomed = blob(&mut store, b"going away\n");
    let kept = blob(&mut store, b"staying\n");
    let base_tree = store
        .add_tree(Tree {
            entries: vec![entry("doomed.txt", doomed), entry("kept.txt", kept)],
        })
        .unwrap();
    let base = commit(&mut store, base_tree, vec![]);

    let this_tree = store
        .add_tree(Tree {
            entries: vec![entry("kept.txt", kept)],
        })
        .unwrap();
    let this = commit(&mut store, this_tree, vec![base]);

    let other_tree = store
        .add_tree(Tree {
            entries: vec![entry("kept.txt", kept)],
        })
        .unwrap();
    let other = commit(&mut store, other_tree, vec![base]);

    let options = MergeOptions::default();
    let result = MergeDriver::merge(&mut store, this, other, &options).unwrap();
    assert!(result.is_clean());

    let merged = store.get_tree(&result.tree).unwrap();
    assert!(merged.find(BStr::new("doomed.txt")).is_none());
    assert!(merged.find(BStr::new("kept.txt")).is_some());
}

#[test]
fn rename_on_one_side_crossed_with_an_edit_on_the_other_merges_content_at_new_path() {
    let mut store = InMemoryObjectStore::default();
    let original = blob(&mut store, b"line one\nline two\nline three\n");
    let base_tree = store
        .add_tree(Tree {
            entries: vec![entry("old_name.txt", original)],
        })
        .unwrap();
    let base = commit(&mut store, base_tree, vec![]);

    let this_tree = store
        .add_tree(Tree {
            entries: vec![entry("new_name.txt", original)],
        })
        .unwrap();
    let this = commit(&mut store, this_tree, vec![base]);

    let edited = blob(&mut store, b"line one\nLINE TWO\nline three\n");
    let other_tree = store
        .add_tree(Tree {
            entries: vec![entry("old_name.txt", edited)],
        })
        .unwrap();
    let other = commit(&mut store, other_tree, vec![base]);

    let options = MergeOptions {
        renames: Some(&ExactOidRenameDetector),
        ..MergeOptions::default()
    };
    let result = MergeDriver::merge(&mut store, this, other, &options).unwrap();
    assert!(result.is_clean());

    let merged = store.get_tree(&result.tree).unwrap();
    assert!(merged.find(BStr::new("old_name.txt")).is_none());
    let renamed = merged.find(BStr::new("new_name.txt")).unwrap();
    assert_eq!(store.get_blob(&renamed.oid).unwrap(), b"line one\nLINE TWO\nline three\n");
}
