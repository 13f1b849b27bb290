//! Version parsing, comparison, and bumping.
//!
//! A leaf utility with no internal dependencies: the rest of the workspace
//! consumes [`Version`] and [`Scheme`] but this crate depends on nothing
//! else in the workspace.

mod bump;
mod error;
mod maven;
mod scheme;
mod version;

pub use bump::BumpId;
pub use error::VersionError;
pub use maven::MavenVersion;
pub use scheme::Scheme;
pub use version::Version;
