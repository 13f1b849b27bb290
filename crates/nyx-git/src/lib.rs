//! The abstract repository port and its `git2`-backed implementation.
//!
//! Every operation fails with a single [`GitError`]; none return nil/absent
//! on success.

mod error;
mod repository;

pub use error::{GitError, GitResult};
pub use repository::{Repository, WalkControl};
