//! Resource configuration for a job: what the submission script sets up before running a command
//!
//! A [ResourceSpec] is the loosely typed mapping the orchestration layer hands over. Missing
//! options are filled with backend defaults by [default_resources], and the typed [Resources] view
//! is what the script composer actually reads.

/// Option mapping and default filling
pub mod spec;
/// Typed view of a filled-in spec
pub mod resolved;
/// JSON schema check for resource documents read from disk
pub mod schema;

pub use resolved::Resources;
pub use schema::validate_resource_file;
pub use spec::{default_resources, ResourceSpec};
