use std::collections::HashSet;

use crate::ObjectId;

/// A set of object ids, used to dedupe candidates during graph walks (e.g.
/// [`crate`]'s callers folding an octopus merge base search across more
/// than two commits).
#[derive(Default)]
pub struct OidSet {
    inner: HashSet<ObjectId>,
}

impl OidSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id, returning `true` if it wasn't already present.
    pub fn insert(&mut self, oid: ObjectId) -> bool {
        self.inner.insert(oid)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.inner.contains(oid)
    }

    pub fn remove(&mut self, oid: &ObjectId) -> bool {
        self.inner.remove(oid)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<ObjectId> for OidSet {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Hasher;
    use crate::HashAlgorithm;

    fn oid(n: u32) -> ObjectId {
        Hasher::digest(HashAlgorithm::Sha1, &n.to_be_bytes()).unwrap()
    }

    #[test]
    fn insert_reports_whether_the_id_was_new() {
        let mut set = OidSet::new();
        let id = oid(1);
        assert!(set.insert(id));
        assert!(!set.insert(id));
        assert!(set.contains(&id));
    }

    #[test]
    fn removed_ids_stop_being_members() {
        let mut set = OidSet::new();
        let id = oid(1);
        set.insert(id);
        assert!(set.remove(&id));
        assert!(!set.contains(&id));
    }

    #[test]
    fn scales_to_ten_thousand_distinct_ids() {
        let mut set = OidSet::new();
        for n in 0..10_000u32 {
            set.insert(oid(n));
        }
        assert_eq!(set.len(), 10_000);
        for n in (0..10_000u32).step_by(100) {
            assert!(set.contains(&oid(n)));
        }
        assert!(!set.contains(&oid(99_999)));
    }

    #[test]
    fn builds_from_an_iterator_of_ids() {
        let ids: Vec<ObjectId> = (0..10).map(oid).collect();
        let set: OidSet = ids.iter().copied().collect();
        assert_eq!(set.len(), 10);
        assert!(set.contains(&ids[5]));
    }
}
