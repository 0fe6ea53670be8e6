// Ethereum key linking
pub mod create_link;

pub use create_link::*;
