//! Composite configuration blocks (conventions, release types): an ordered
//! `enabled` list plus a name->definition map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "T: Serialize + for<'d> Deserialize<'d>")]
pub struct CompositeBlock<T> {
    #[serde(default)]
    pub enabled: Vec<String>,
    #[serde(default)]
    pub items: HashMap<String, T>,
}

impl<T> Default for CompositeBlock<T> {
    fn default() -> Self {
        Self { enabled: Vec::new(), items: HashMap::new() }
    }
}

impl<T> CompositeBlock<T> {
    /// The enabled items in declaration order. An enabled name that
    /// resolves to nothing raises `IllegalProperty` (spec §4.3).
    pub fn resolve(&self) -> Result<Vec<(&str, &T)>, ConfigError> {
        self.enabled
            .iter()
            .map(|name| {
                self.items
                    .get(name)
                    .map(|item| (name.as_str(), item))
                    .ok_or_else(|| ConfigError::IllegalProperty(format!("unknown item: {name}")))
            })
            .collect()
    }
}
