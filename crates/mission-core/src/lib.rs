pub mod hash;
pub mod memory;
pub mod text;
pub mod timestamp;
pub mod types;

pub use types::*;
