//! The release pipeline core: the run state, the `Infer`/`Make`/`Mark`/
//! `Publish` commands, and the `Pipeline` orchestrator that sequences
//! them (spec §4).

mod context;
mod error;
mod infer;
mod make;
mod mark;
mod pipeline;
mod publish;
mod release_scope;
mod state;

pub use context::template_context;
pub use error::{CoreError, CoreResult, DataAccessSource, ReleaseError};
pub use infer::Infer;
pub use make::Make;
pub use mark::Mark;
pub use pipeline::{default_state_path, Command, Pipeline};
pub use publish::Publish;
pub use release_scope::ReleaseScope;
pub use state::{FileMapper, State};
