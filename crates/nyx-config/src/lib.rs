//! The layered configuration resolver.
//!
//! Eight priority-ordered layers (command-line, plugin, custom local file,
//! custom shared file, standard local file, standard shared file, preset,
//! defaults) merge into one flattened [`Configuration`]. See
//! [`Resolver`] for the merge contract.

mod composite;
mod convention;
mod document;
mod error;
mod layer;
mod preset;
mod release_type;
mod resolver;

pub use composite::CompositeBlock;
pub use convention::{BumpExpression, CommitMessageConvention};
pub use document::{load_layer, load_standard_local, load_standard_shared};
pub use error::{ConfigError, ConfigResult};
pub use layer::{AssetConfig, ConfigLayer, ServiceConfig};
pub use preset::resolve_preset;
pub use release_type::ReleaseType;
pub use resolver::{Configuration, Resolver};
