//! Library interface for the ksplit CLI's supporting pieces: the
//! filesystem port, project scaffolding, download logic, and the
//! orchestrator that drives `ksplit-core`'s planning pipeline end to end.

pub mod download;
pub mod error;
pub mod filesystem;
pub mod orchestrator;
pub mod project;

pub use error::{CliError, Result};
pub use filesystem::{Filesystem, OsFilesystem};
pub use project::Project;
