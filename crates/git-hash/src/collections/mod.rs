//! OID-keyed collections used by the LCA walk and merge conflict bookkeeping.

pub mod oid_map;
pub mod oid_set;

pub use oid_map::OidMap;
pub use oid_set::OidSet;
