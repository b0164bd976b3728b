//! Persistence for whole-session save records.
//!
//! Repositories are plain key-value string stores; [`SnapshotService`] owns
//! the record format on top of them. Static content lives in oracles, not
//! here.

mod error;
mod file;
mod memory;
mod snapshot;
mod traits;

pub use error::RepositoryError;
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use snapshot::{SaveRecord, SnapshotService};
pub use traits::SaveRepository;
