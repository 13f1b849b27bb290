//! An in-process, name-keyed registry of service implementations. This
//! plays the role the teacher's plugin host played, minus the dynamic
//! loading: every service is registered by the binary embedding this
//! crate, not discovered from a `.wasm` artifact on disk.

use std::collections::HashMap;

use crate::error::{ServiceError, ServiceResult};
use crate::ports::{AssetService, PublishService};

#[derive(Default)]
pub struct ServiceRegistry {
    assets: HashMap<String, Box<dyn AssetService>>,
    publishers: HashMap<String, Box<dyn PublishService>>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_asset_service(mut self, name: impl Into<String>, service: Box<dyn AssetService>) -> Self {
        self.assets.insert(name.into(), service);
        self
    }

    #[must_use]
    pub fn with_publish_service(mut self, name: impl Into<String>, service: Box<dyn PublishService>) -> Self {
        self.publishers.insert(name.into(), service);
        self
    }

    pub fn asset_service(&self, name: &str) -> ServiceResult<&dyn AssetService> {
        self.assets
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| ServiceError::Unknown(name.to_string()))
    }

    pub fn publish_service(&self, name: &str) -> ServiceResult<&dyn PublishService> {
        self.publishers
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| ServiceError::Unknown(name.to_string()))
    }

    #[must_use]
    pub fn publish_service_names(&self) -> Vec<&str> {
        self.publishers.keys().map(String::as_str).collect()
    }
}
