//! Asset-building and release-publishing ports, resolved by name from an
//! in-process registry rather than loaded dynamically.

mod error;
mod ports;
mod registry;
mod release;
mod stub;

pub use error::{ServiceError, ServiceResult};
pub use ports::{AssetService, PublishService};
pub use registry::ServiceRegistry;
pub use release::ReleaseHandle;
pub use stub::{LocalAssetService, LocalPublishService};
