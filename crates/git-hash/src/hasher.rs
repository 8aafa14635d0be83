use crate::{HashAlgorithm, HashError, ObjectId};

/// The three kinds of content-addressed object this merge core ever hashes.
///
/// Trees and commits are usually hashed incrementally via [`Hasher::update`]
/// over their own field layout rather than through [`Hasher::hash_object`],
/// but the variant still needs to exist so a blob's header can be built
/// without falling back to a bare string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitObjectKind {
    Blob,
    Tree,
    Commit,
}

impl GitObjectKind {
    fn header_name(self) -> &'static str {
        match self {
            GitObjectKind::Blob => "blob",
            GitObjectKind::Tree => "tree",
            GitObjectKind::Commit => "commit",
        }
    }
}

enum HasherInner {
    Sha1(Box<sha1_checked::Sha1>),
    Sha256(sha2::Sha256),
}

/// Incremental hash computation over one of the two supported algorithms.
///
/// The object store feeds tree entries and commit fields through
/// [`update`](Hasher::update) one piece at a time rather than building an
/// intermediate buffer; [`hash_object`](Hasher::hash_object) is the one-shot
/// path used for blobs, which are hashed whole.
pub struct Hasher {
    inner: HasherInner,
}

impl Hasher {
    /// Start a hasher for the given algorithm.
    pub fn new(algo: HashAlgorithm) -> Self {
        use digest::Digest;
        let inner = match algo {
            HashAlgorithm::Sha1 => HasherInner::Sha1(Box::new(sha1_checked::Sha1::new())),
            HashAlgorithm::Sha256 => HasherInner::Sha256(sha2::Sha256::new()),
        };
        Self { inner }
    }

    /// Feed another chunk of bytes into the running hash.
    pub fn update(&mut self, data: &[u8]) {
        use digest::Digest;
        match &mut self.inner {
            HasherInner::Sha1(h) => h.update(data),
            HasherInner::Sha256(h) => h.update(data),
        }
    }

    /// Consume the hasher, producing the resulting [`ObjectId`].
    ///
    /// Fails only for SHA-1, and only when the collision-detecting backend
    /// flags the input as a known collision attack.
    pub fn finalize(self) -> Result<ObjectId, HashError> {
        match self.inner {
            HasherInner::Sha1(h) => {
                let result = h.try_finalize();
                if result.has_collision() {
                    return Err(HashError::Sha1Collision);
                }
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(result.hash().as_slice());
                Ok(ObjectId::Sha1(bytes))
            }
            HasherInner::Sha256(h) => {
                use digest::Digest;
                let result = h.finalize();
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(result.as_slice());
                Ok(ObjectId::Sha256(bytes))
            }
        }
    }

    /// Hash a single buffer in one call, with no object header.
    pub fn digest(algo: HashAlgorithm, data: &[u8]) -> Result<ObjectId, HashError> {
        let mut hasher = Self::new(algo);
        hasher.update(data);
        hasher.finalize()
    }

    /// Hash a blob the way git itself would: a `"{kind} {len}\0"` header
    /// followed by the content, all under one hash.
    pub fn hash_object(algo: HashAlgorithm, kind: GitObjectKind, data: &[u8]) -> Result<ObjectId, HashError> {
        let header = format!("{} {}\0", kind.header_name(), data.len());
        let mut hasher = Self::new(algo);
        hasher.update(header.as_bytes());
        hasher.update(data);
        hasher.finalize()
    }
}

impl std::io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
