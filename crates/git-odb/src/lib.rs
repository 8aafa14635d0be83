//! Object store abstraction consumed by the merge core.
//!
//! `ObjectStore` is the seam between the merge algorithms and wherever
//! blobs, trees, and commits actually live. This crate provides the trait
//! plus an in-memory reference implementation; a real repository backend
//! (loose objects, packfiles, alternates) is deliberately not part of this
//! workspace — object-store serialization belongs to whatever production
//! system embeds this core.

pub mod memory;
pub mod tree_diff;

use git_hash::ObjectId;
use git_object::{Commit, ObjectError, Tree};

pub use memory::InMemoryObjectStore;
pub use tree_diff::{ChangeKind, ExactOidRenameDetector, RenameDetector, TreeChange};

/// Errors produced by object store operations.
#[derive(Debug, thiserror::Error)]
pub enum OdbError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("object {0} is not a blob")]
    NotABlob(ObjectId),

    #[error("object {0} is not a tree")]
    NotATree(ObjectId),

    #[error("object {0} is not a commit")]
    NotACommit(ObjectId),

    #[error(transparent)]
    Object(#[from] ObjectError),
}

/// The store interface the merge core reads and writes through.
///
/// Mirrors the consumed interface: raw blob bytes by id, adding new
/// objects, structural tree diffing, and a parent-lookup oracle for commits.
pub trait ObjectStore {
    /// Read a blob's raw bytes.
    fn get_blob(&self, id: &ObjectId) -> Result<Vec<u8>, OdbError>;

    /// Read and parse a tree.
    fn get_tree(&self, id: &ObjectId) -> Result<Tree, OdbError>;

    /// Read and parse a commit.
    fn get_commit(&self, id: &ObjectId) -> Result<Commit, OdbError>;

    /// Store new blob content, returning its id.
    fn add_blob(&mut self, data: Vec<u8>) -> Result<ObjectId, OdbError>;

    /// Store a new tree, returning its id.
    fn add_tree(&mut self, tree: Tree) -> Result<ObjectId, OdbError>;

    /// Store a new commit, returning its id.
    fn add_commit(&mut self, commit: Commit) -> Result<ObjectId, OdbError>;

    /// Structural diff between two trees (either side may be absent,
    /// representing an empty tree).
    ///
    /// `renames` is an optional detector; without one, only Add/Delete/Modify
    /// changes are produced.
    fn tree_changes(
        &self,
        old_tree: Option<ObjectId>,
        new_tree: Option<ObjectId>,
        renames: Option<&dyn RenameDetector>,
    ) -> Result<Vec<TreeChange>, OdbError>;

    /// The parents of a commit. Unknown commits yield an empty list — this
    /// is a pure oracle, not a fallible lookup.
    fn parents_of(&self, commit: ObjectId) -> Vec<ObjectId>;
}
