//! Lowest common ancestor search over a parent-lookup oracle.
//!
//! This crate knows nothing about object stores, commit graph files,
//! or disk formats: it treats history as a DAG reachable through a
//! single function, `parents_of`, supplied by the caller. `git-merge`
//! calls `LcaFinder::find_lcas` to pick a merge base before driving
//! the tree merge.

mod merge_base;

pub use merge_base::LcaFinder;
