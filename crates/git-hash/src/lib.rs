//! Hash computation and object identity for the merge core.
//!
//! This crate provides the core `ObjectId` type, hash computation, hex
//! encoding/decoding, and OID-keyed collections used throughout the
//! workspace's diff, object, and revwalk layers.

mod error;
pub mod hex;
mod algorithm;
mod oid;
pub mod hasher;
pub mod collections;

pub use algorithm::HashAlgorithm;
pub use error::HashError;
pub use oid::ObjectId;
