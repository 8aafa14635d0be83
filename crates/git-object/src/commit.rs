use git_hash::ObjectId;

/// A git commit — a tree snapshot plus its parent links.
///
/// Author, committer, message, and signature metadata are not modeled here:
/// the merge core only needs a commit's tree and its parents, the latter
/// usually reached through a separate parent oracle rather than this struct
/// directly, but it is convenient for an object store to carry them too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: ObjectId,
    pub parents: Vec<ObjectId>,
}

impl Commit {
    pub fn new(tree: ObjectId, parents: Vec<ObjectId>) -> Self {
        Self { tree, parents }
    }

    /// The first parent, if any.
    pub fn first_parent(&self) -> Option<ObjectId> {
        self.parents.first().copied()
    }

    /// Whether this commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Whether this commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}
