//! Commit message convention matching and branch-to-release-type
//! selection — the two classifiers that turn raw repository state into
//! the inputs `Infer` needs.

mod branch;
mod error;
mod matcher;

pub use branch::select_release_type;
pub use error::ConventionError;
pub use matcher::match_commit;
