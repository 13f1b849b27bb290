//! CLI definition: global flags feed the command-line configuration
//! layer, subcommands map onto pipeline commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nyx_config::ConfigLayer;
use nyx_version::Scheme;

/// Automates semantic releases: infers the next version from commit
/// history and carries it through to a tagged, published release.
#[derive(Debug, Parser)]
#[command(name = "nyx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repository directory (defaults to the current directory).
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Path to a local configuration file.
    #[arg(long, global = true)]
    pub configuration_file: Option<PathBuf>,

    /// Path to a shared configuration file.
    #[arg(long, global = true)]
    pub shared_configuration_file: Option<PathBuf>,

    /// Named built-in preset (only `"default"` is currently bundled).
    #[arg(long, global = true)]
    pub preset: Option<String>,

    /// Perform every command without mutating the repository or any
    /// remote service.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Resume from a previously saved state file, if one exists.
    #[arg(long, global = true)]
    pub resume: bool,

    /// Versioning scheme to use.
    #[arg(long, global = true, value_enum)]
    pub scheme: Option<CliScheme>,

    /// Pin the bump identifier instead of inferring it from history.
    #[arg(long, global = true)]
    pub bump: Option<String>,

    /// Override the inferred version outright.
    #[arg(long, global = true)]
    pub version_override: Option<String>,

    /// Path to the serialized pipeline state file.
    #[arg(long, global = true)]
    pub state_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliScheme {
    Semver,
    Maven,
}

impl From<CliScheme> for Scheme {
    fn from(value: CliScheme) -> Self {
        match value {
            CliScheme::Semver => Scheme::SemVer,
            CliScheme::Maven => Scheme::Maven,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Removes the state file and invalidates every up-to-date cache.
    Clean,
    /// Computes the next version from commit history.
    Infer,
    /// Builds every configured asset.
    Make,
    /// Commits, tags, and pushes the computed version.
    Mark,
    /// Publishes the release to configured hosting services.
    Publish,
    /// Runs the full chain: Infer, Make, Mark, then Publish.
    Release,
}

impl Cli {
    /// Builds the command-line configuration layer from the parsed flags.
    #[must_use]
    pub fn command_line_layer(&self) -> ConfigLayer {
        ConfigLayer {
            directory: self.directory.clone(),
            dry_run: Some(self.dry_run).filter(|v| *v),
            resume: Some(self.resume).filter(|v| *v),
            scheme: self.scheme.map(Into::into),
            bump: self.bump.clone(),
            version: self.version_override.clone(),
            state_file: self.state_file.clone(),
            configuration_file: self.configuration_file.clone(),
            shared_configuration_file: self.shared_configuration_file.clone(),
            preset: self.preset.clone(),
            ..ConfigLayer::default()
        }
    }
}
