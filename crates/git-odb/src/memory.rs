//! An in-memory [`ObjectStore`] used by tests and by callers that don't
//! need persistence across process lifetimes.

use std::collections::HashMap;

use git_hash::hasher::{GitObjectKind, Hasher};
use git_hash::{HashAlgorithm, ObjectId};
use git_object::{Commit, Tree, TreeEntry};

use crate::tree_diff::{diff_trees, RenameDetector, TreeChange};
use crate::{ObjectStore, OdbError};

enum StoredObject {
    Blob(Vec<u8>),
    Tree(Tree),
    Commit(Commit),
}

/// A content-addressed object store backed by a hash map.
pub struct InMemoryObjectStore {
    algo: HashAlgorithm,
    objects: HashMap<ObjectId, StoredObject>,
}

impl InMemoryObjectStore {
    pub fn new(algo: HashAlgorithm) -> Self {
        Self {
            algo,
            objects: HashMap::new(),
        }
    }

    fn tree_entries(&self, id: &ObjectId) -> Result<Vec<TreeEntry>, OdbError> {
        Ok(self.get_tree(id)?.entries)
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new(HashAlgorithm::Sha1)
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn get_blob(&self, id: &ObjectId) -> Result<Vec<u8>, OdbError> {
        match self.objects.get(id) {
            Some(StoredObject::Blob(data)) => Ok(data.clone()),
            Some(_) => Err(OdbError::NotABlob(*id)),
            None => Err(OdbError::NotFound(*id)),
        }
    }

    fn get_tree(&self, id: &ObjectId) -> Result<Tree, OdbError> {
        match self.objects.get(id) {
            Some(StoredObject::Tree(tree)) => Ok(tree.clone()),
            Some(_) => Err(OdbError::NotATree(*id)),
            None => Err(OdbError::NotFound(*id)),
        }
    }

    fn get_commit(&self, id: &ObjectId) -> Result<Commit, OdbError> {
        match self.objects.get(id) {
            Some(StoredObject::Commit(commit)) => Ok(commit.clone()),
            Some(_) => Err(OdbError::NotACommit(*id)),
            None => Err(OdbError::NotFound(*id)),
        }
    }

    fn add_blob(&mut self, data: Vec<u8>) -> Result<ObjectId, OdbError> {
        let id = Hasher::hash_object(self.algo, GitObjectKind::Blob, &data)
            .map_err(git_object::ObjectError::from)?;
        self.objects.insert(id, StoredObject::Blob(data));
        Ok(id)
    }

    fn add_tree(&mut self, mut tree: Tree) -> Result<ObjectId, OdbError> {
        tree.sort();
        let mut hasher = Hasher::new(self.algo);
        for entry in &tree.entries {
            hasher.update(&entry.mode.raw().to_be_bytes());
            hasher.update(&entry.path);
            hasher.update(entry.oid.as_bytes());
        }
        let id = hasher.finalize().map_err(git_object::ObjectError::from)?;
        self.objects.insert(id, StoredObject::Tree(tree));
        Ok(id)
    }

    fn add_commit(&mut self, commit: Commit) -> Result<ObjectId, OdbError> {
        let mut hasher = Hasher::new(self.algo);
        hasher.update(commit.tree.as_bytes());
        for parent in &commit.parents {
            hasher.update(parent.as_bytes());
        }
        let id = hasher.finalize().map_err(git_object::ObjectError::from)?;
        self.objects.insert(id, StoredObject::Commit(commit));
        Ok(id)
    }

    fn tree_changes(
        &self,
        old_tree: Option<ObjectId>,
        new_tree: Option<ObjectId>,
        renames: Option<&dyn RenameDetector>,
    ) -> Result<Vec<TreeChange>, OdbError> {
        let old_entries = match old_tree {
            Some(id) => self.tree_entries(&id)?,
            None => Vec::new(),
        };
        let new_entries = match new_tree {
            Some(id) => self.tree_entries(&id)?,
            None => Vec::new(),
        };
        let lookup = |id: &ObjectId| self.tree_entries(id);
        diff_trees(&lookup, &old_entries, &new_entries, renames)
    }

    fn parents_of(&self, commit: ObjectId) -> Vec<ObjectId> {
        match self.objects.get(&commit) {
            Some(StoredObject::Commit(c)) => c.parents.clone(),
            _ => Vec::new(),
        }
    }
}
