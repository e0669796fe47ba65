//! Capabilities the views depend on but do not own.
//!
//! Each collaborator is a trait so views can be driven by fakes in tests.
//! The CLI-backed implementations shell out with a hard timeout and turn
//! every failure into an empty result.

pub mod command;
pub mod jobs;
pub mod memory;
pub mod search;

pub use command::run_with_timeout;
pub use jobs::{CliJobLister, JobLister};
pub use memory::{MemoryStore, NoMemoryStore};
pub use search::{CliDocumentSearcher, DocumentSearcher};
