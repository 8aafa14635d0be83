//! Three-way merge core: line-level diff3, structural tree merge, and the
//! driver that ties both to a lowest-common-ancestor search.
//!
//! This crate has no notion of a working tree, an index, or a CLI: callers
//! hand it an [`git_odb::ObjectStore`] and two commit ids and get back a
//! merged tree id plus a list of conflicts.

mod diff3;
mod driver;
mod tree_merge;

pub use diff3::{ConflictRange, Diff3Merger};
pub use driver::MergeDriver;
pub use tree_merge::TreeMerger;

use bstr::BString;
use git_hash::ObjectId;
use git_object::TreeEntry;
use git_odb::{OdbError, RenameDetector};

/// Errors fatal to a merge. Structural and mode conflicts are never part of
/// this enum — they are surfaced as [`MergeConflict`] values in the result
/// instead, per the conflict-as-data design of this crate.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("unsupported change combination at {0}: {1}")]
    UnsupportedChangeCombination(BString, String),

    #[error(transparent)]
    Store(#[from] OdbError),
}

/// A single path-level conflict produced by [`TreeMerger`] or [`MergeDriver`].
///
/// `this_entry`/`other_entry`/`base_entry` are absent exactly when that side
/// has no entry at the conflicting path (e.g. a delete). `content_ranges`
/// carries [`Diff3Merger`]'s conflict hunks when the conflict arose from a
/// failed content merge rather than a purely structural one; it is empty for
/// conflicts that never reached a file-merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    pub this_entry: Option<TreeEntry>,
    pub other_entry: Option<TreeEntry>,
    pub base_entry: Option<TreeEntry>,
    pub message: String,
    pub content_ranges: Vec<ConflictRange>,
}

impl std::fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// One item of [`TreeMerger`]'s output sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutput {
    /// Apply this entry (an add, a rename target, or a clean content merge).
    Entry(TreeEntry),
    /// Remove the entry at this path.
    Delete(BString),
    /// A conflict that needs the caller's attention.
    Conflict(MergeConflict),
}

/// The conflict-marker labels [`Diff3Merger`] uses for the "this" and
/// "other" sides. The reference implementation also carries an "ancestor"
/// label, but it is never actually used in marker output — only `this`/
/// `other` appear in `<<<<<<<`/`>>>>>>>` lines — so it isn't modeled here.
#[derive(Debug, Clone)]
pub struct Diff3Labels {
    pub this: BString,
    pub other: BString,
}

impl Default for Diff3Labels {
    fn default() -> Self {
        Self {
            this: BString::from("alice"),
            other: BString::from("bob"),
        }
    }
}

/// How file content conflicts are resolved when [`TreeMerger`] needs to
/// three-way-merge a single blob.
pub enum FileMerger<'a> {
    /// Never merge content; any path both sides touched is a conflict.
    None,
    /// Use [`Diff3Merger`] with the given labels.
    Diff3(Diff3Labels),
    /// A caller-supplied merge function.
    Custom(&'a dyn Fn(&[u8], &[u8], &[u8]) -> (Vec<u8>, Vec<ConflictRange>)),
}

impl<'a> FileMerger<'a> {
    fn merge(&self, this: &[u8], other: &[u8], base: &[u8]) -> Option<(Vec<u8>, Vec<ConflictRange>)> {
        match self {
            FileMerger::None => None,
            FileMerger::Diff3(labels) => Some(Diff3Merger::merge(base, this, other, labels)),
            FileMerger::Custom(f) => Some(f(this, other, base)),
        }
    }
}

impl<'a> Default for FileMerger<'a> {
    fn default() -> Self {
        FileMerger::Diff3(Diff3Labels::default())
    }
}

/// What [`MergeDriver`] does when the two commits share no common ancestor.
///
/// Only one policy is implemented: synthesizing an empty tree as the base,
/// which treats every path on both sides as newly added. This mirrors
/// git's own `--allow-unrelated-histories` behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoCommonAncestorPolicy {
    #[default]
    SynthesizeEmptyTree,
}

/// Caller-supplied configuration for a merge.
pub struct MergeOptions<'a> {
    pub renames: Option<&'a dyn RenameDetector>,
    pub file_merger: FileMerger<'a>,
    pub no_common_ancestor: NoCommonAncestorPolicy,
}

impl<'a> Default for MergeOptions<'a> {
    fn default() -> Self {
        Self {
            renames: None,
            file_merger: FileMerger::default(),
            no_common_ancestor: NoCommonAncestorPolicy::default(),
        }
    }
}

/// The outcome of a full merge: a tree id plus whatever conflicts arose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub tree: ObjectId,
    pub conflicts: Vec<MergeConflict>,
}

impl MergeResult {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}
