//! Region selection: the remote directory, local persistence, and the
//! workflow that ties them together.

pub mod directory;
pub mod error;
pub mod model;
pub mod store;
#[cfg(test)]
pub mod testing;
pub mod workflow;

pub use directory::HttpDirectory;
pub use error::{DirectoryError, WorkflowError};
pub use model::RegionDescriptor;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use workflow::{Phase, RegionWorkflow};
