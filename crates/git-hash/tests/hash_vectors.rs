use git_hash::hasher::{GitObjectKind, Hasher};
use git_hash::{HashAlgorithm, ObjectId};

// Known-answer vectors for the raw (headerless) digest path.

#[test]
fn sha1_of_empty_input() {
    let oid = Hasher::digest(HashAlgorithm::Sha1, b"").unwrap();
    assert_eq!(oid.to_hex(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
}

#[test]
fn sha1_of_hello_world() {
    let oid = Hasher::digest(HashAlgorithm::Sha1, b"hello world").unwrap();
    assert_eq!(oid.to_hex(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
}

#[test]
fn sha256_of_empty_input() {
    let oid = Hasher::digest(HashAlgorithm::Sha256, b"").unwrap();
    assert_eq!(
        oid.to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn sha256_of_hello_world() {
    let oid = Hasher::digest(HashAlgorithm::Sha256, b"hello world").unwrap();
    assert_eq!(
        oid.to_hex(),
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
}

// Vectors for the blob header path, matching what `git hash-object --stdin`
// would produce: git prepends `"blob <len>\0"` before hashing.

#[test]
fn blob_header_hash_of_empty_content() {
    let oid = Hasher::hash_object(HashAlgorithm::Sha1, GitObjectKind::Blob, b"").unwrap();
    assert_eq!(oid.to_hex(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
}

#[test]
fn blob_header_hash_of_hello_world() {
    let oid = Hasher::hash_object(HashAlgorithm::Sha1, GitObjectKind::Blob, b"hello world").unwrap();
    assert_eq!(oid.to_hex(), "95d09f2b10159347eece71399a7e2e907ea3df4f");
}

#[test]
fn blob_header_hash_of_a_line_with_trailing_newline() {
    let oid = Hasher::hash_object(HashAlgorithm::Sha1, GitObjectKind::Blob, b"Hello, World!\n").unwrap();
    assert_eq!(oid.to_hex(), "8ab686eafeb1f44702738c8b0f24f2567c36da6d");
}

#[test]
fn object_kind_changes_the_hash_even_for_identical_content() {
    let data = b"some content";
    let blob = Hasher::hash_object(HashAlgorithm::Sha1, GitObjectKind::Blob, data).unwrap();
    let tree = Hasher::hash_object(HashAlgorithm::Sha1, GitObjectKind::Tree, data).unwrap();
    let commit = Hasher::hash_object(HashAlgorithm::Sha1, GitObjectKind::Commit, data).unwrap();

    assert_ne!(blob, tree);
    assert_ne!(blob, commit);
    assert_ne!(tree, commit);
}

// A multi-chunk `update()` sequence must land on the same digest as hashing
// the concatenated bytes in one call — this is the guarantee
// `InMemoryObjectStore::add_tree`/`add_commit` lean on when they feed field
// after field through a single running hasher.

#[test]
fn chunked_updates_match_a_single_digest_call_sha1() {
    let data = b"the quick brown fox jumps over the lazy dog";
    let oneshot = Hasher::digest(HashAlgorithm::Sha1, data).unwrap();

    let mut hasher = Hasher::new(HashAlgorithm::Sha1);
    hasher.update(&data[..10]);
    hasher.update(&data[10..20]);
    hasher.update(&data[20..]);

    assert_eq!(oneshot, hasher.finalize().unwrap());
}

#[test]
fn chunked_updates_match_a_single_digest_call_sha256() {
    let data = b"the quick brown fox jumps over the lazy dog";
    let oneshot = Hasher::digest(HashAlgorithm::Sha256, data).unwrap();

    let mut hasher = Hasher::new(HashAlgorithm::Sha256);
    for chunk in data.chunks(7) {
        hasher.update(chunk);
    }

    assert_eq!(oneshot, hasher.finalize().unwrap());
}

#[test]
fn write_impl_is_equivalent_to_explicit_update_calls() {
    use std::io::Write;

    let data = b"hello world";
    let expected = Hasher::digest(HashAlgorithm::Sha1, data).unwrap();

    let mut hasher = Hasher::new(HashAlgorithm::Sha1);
    hasher.write_all(data).unwrap();

    assert_eq!(expected, hasher.finalize().unwrap());
}

#[test]
fn sha1_and_sha256_of_the_same_bytes_never_collide() {
    let data = b"same input";
    let sha1 = Hasher::digest(HashAlgorithm::Sha1, data).unwrap();
    let sha256 = Hasher::digest(HashAlgorithm::Sha256, data).unwrap();

    assert_eq!(sha1.algorithm(), HashAlgorithm::Sha1);
    assert_eq!(sha256.algorithm(), HashAlgorithm::Sha256);
    assert_ne!(sha1.as_bytes().len(), sha256.as_bytes().len());
}

#[test]
fn blob_hash_survives_a_hex_round_trip() {
    let oid = Hasher::hash_object(HashAlgorithm::Sha1, GitObjectKind::Blob, b"test content").unwrap();
    let parsed: ObjectId = oid.to_string().parse().unwrap();
    assert_eq!(oid, parsed);
}
