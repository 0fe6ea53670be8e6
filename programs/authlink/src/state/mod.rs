// Primary table, keyed by account
pub mod link_record;

// Secondary uniqueness index, keyed by address checksum
pub mod address_index;

pub use address_index::*;
pub use link_record::*;
