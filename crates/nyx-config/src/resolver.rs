//! The layered configuration resolver (spec §4.3).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use nyx_version::{BumpId, Scheme};
use tracing::debug;

use crate::composite::CompositeBlock;
use crate::convention::CommitMessageConvention;
use crate::document::{load_custom, load_standard_local, load_standard_shared};
use crate::error::ConfigError;
use crate::layer::{AssetConfig, ConfigLayer, ServiceConfig};
use crate::preset;
use crate::release_type::ReleaseType;

/// Index of each layer within [`Resolver::layers`], highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
enum LayerIndex {
    CommandLine = 0,
    Plugin = 1,
    CustomLocal = 2,
    CustomShared = 3,
    StandardLocal = 4,
    StandardShared = 5,
    Preset = 6,
    Defaults = 7,
}

const LAYER_COUNT: usize = 8;

/// The fully resolved, flattened view over all layers (spec §3).
#[derive(Debug, Clone)]
pub struct Configuration {
    pub bump: Option<BumpId>,
    pub directory: PathBuf,
    pub dry_run: bool,
    pub initial_version: String,
    pub release_prefix: String,
    pub release_lenient: bool,
    pub resume: bool,
    pub scheme: Scheme,
    pub state_file: String,
    pub version: Option<String>,
    pub assets: HashMap<String, AssetConfig>,
    pub commit_message_conventions: CompositeBlock<CommitMessageConvention>,
    pub release_types: CompositeBlock<ReleaseType>,
    pub services: HashMap<String, ServiceConfig>,
}

/// Merges the 8 priority-ordered layers into a [`Configuration`].
pub struct Resolver {
    layers: [ConfigLayer; LAYER_COUNT],
}

impl Resolver {
    /// Builds a resolver from the command-line and programmatic/plugin
    /// layers; the file-backed and preset layers are populated by
    /// [`Resolver::update_configured_layers`].
    #[must_use]
    pub fn new(command_line: ConfigLayer, plugin: ConfigLayer) -> Self {
        let layers = [
            command_line,
            plugin,
            ConfigLayer::default(),
            ConfigLayer::default(),
            ConfigLayer::default(),
            ConfigLayer::default(),
            ConfigLayer::default(),
            ConfigLayer::defaults(),
        ];
        Self { layers }
    }

    /// Re-materializes the custom-local, custom-shared, standard-local,
    /// standard-shared, and preset layers from the (possibly just-changed)
    /// meta-options, and clears nothing else — composite blocks live
    /// entirely inside their owning layer, so replacing a layer already
    /// invalidates any cache derived from it.
    pub fn update_configured_layers(&mut self) -> Result<(), ConfigError> {
        let directory = self.directory();

        let configuration_file = self.configuration_file();
        self.layers[LayerIndex::CustomLocal as usize] =
            load_custom(configuration_file.as_deref())?.unwrap_or_default();

        let shared_configuration_file = self.shared_configuration_file();
        self.layers[LayerIndex::CustomShared as usize] =
            load_custom(shared_configuration_file.as_deref())?.unwrap_or_default();

        self.layers[LayerIndex::StandardLocal as usize] =
            load_standard_local(&directory)?.unwrap_or_default();
        self.layers[LayerIndex::StandardShared as usize] =
            load_standard_shared(&directory)?.unwrap_or_default();

        let preset_name = self.preset();
        self.layers[LayerIndex::Preset as usize] = preset_name
            .as_deref()
            .and_then(preset::resolve_preset)
            .unwrap_or_default();

        Ok(())
    }

    fn get<T: Clone>(&self, accessor: impl Fn(&ConfigLayer) -> Option<T>) -> Option<T> {
        self.layers.iter().find_map(|l| accessor(l))
    }

    fn get_skipping<T: Clone>(
        &self,
        skip: LayerIndex,
        accessor: impl Fn(&ConfigLayer) -> Option<T>,
    ) -> Option<T> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip as usize)
            .find_map(|(_, l)| accessor(l))
    }

    /// `configurationFile` is resolved skipping the custom-local layer
    /// (spec §4.3: self-reference is forbidden).
    #[must_use]
    pub fn configuration_file(&self) -> Option<PathBuf> {
        self.resolve_relative(self.get_skipping(LayerIndex::CustomLocal, |l| l.configuration_file.clone()))
    }

    #[must_use]
    pub fn shared_configuration_file(&self) -> Option<PathBuf> {
        self.resolve_relative(self.get_skipping(LayerIndex::CustomShared, |l| l.shared_configuration_file.clone()))
    }

    #[must_use]
    pub fn preset(&self) -> Option<String> {
        self.get_skipping(LayerIndex::Preset, |l| l.preset.clone())
    }

    #[must_use]
    pub fn directory(&self) -> PathBuf {
        self.get(|l| l.directory.clone()).unwrap_or_else(|| PathBuf::from("."))
    }

    fn resolve_relative(&self, path: Option<PathBuf>) -> Option<PathBuf> {
        path.map(|p| {
            if p.is_relative() { self.directory().join(p) } else { p }
        })
    }

    /// Flattens all layers into a [`Configuration`]. Call
    /// [`Resolver::update_configured_layers`] first if any meta-option may
    /// have changed since construction.
    pub fn resolve(&self) -> Result<Configuration, ConfigError> {
        let bump = self
            .get(|l| l.bump.clone())
            .map(|s| s.parse::<BumpId>().expect("BumpId::from_str is infallible"));

        let commit_message_conventions = self
            .get(|l| l.commit_message_conventions.clone())
            .unwrap_or_default();
        commit_message_conventions.resolve()?;

        let release_types = self.get(|l| l.release_types.clone()).unwrap_or_default();
        release_types.resolve()?;

        Ok(Configuration {
            bump,
            directory: self.directory(),
            dry_run: self.get(|l| l.dry_run).unwrap_or(false),
            initial_version: self.get(|l| l.initial_version.clone()).unwrap_or_else(|| "0.1.0".into()),
            release_prefix: self.get(|l| l.release_prefix.clone()).unwrap_or_default(),
            release_lenient: self.get(|l| l.release_lenient).unwrap_or(false),
            resume: self.get(|l| l.resume).unwrap_or(false),
            scheme: self.get(|l| l.scheme).unwrap_or(Scheme::SemVer),
            state_file: self.get(|l| l.state_file.clone()).unwrap_or_else(|| ".nyx-state.json".into()),
            version: self.get(|l| l.version.clone()),
            assets: self.get(|l| l.assets.clone()).unwrap_or_default(),
            commit_message_conventions,
            release_types,
            services: self.get(|l| l.services.clone()).unwrap_or_default(),
        })
    }

    /// Overwrites the command-line layer; callers mutating meta-options
    /// through this must re-run [`update_configured_layers`] afterward
    /// (spec §4.3).
    pub fn set_command_line(&mut self, layer: ConfigLayer) {
        debug!("replacing command-line configuration layer");
        self.layers[LayerIndex::CommandLine as usize] = layer;
    }
}
