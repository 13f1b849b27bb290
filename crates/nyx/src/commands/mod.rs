//! Wires a parsed [`crate::cli::Cli`] onto the pipeline core: resolves
//! configuration, opens the repository, builds the default service
//! registry, and dispatches to the requested [`nyx_core::Command`].

use nyx_config::{ConfigLayer, Resolver};
use nyx_core::{default_state_path, Command, CoreError, Pipeline, State};
use nyx_git::Repository;
use nyx_services::{LocalAssetService, LocalPublishService, ServiceRegistry};

use crate::cli::{Cli, Commands};

pub fn run(cli: Cli) -> Result<(), CoreError> {
    let mut resolver = Resolver::new(cli.command_line_layer(), ConfigLayer::default());
    resolver.update_configured_layers()?;
    let config = resolver.resolve()?;

    let repo = Repository::open(&config.directory)?;
    let registry = default_registry(&config.directory);
    let state_path = default_state_path(&config.directory, &config.state_file);
    let pipeline = Pipeline::new(state_path);

    let command = match cli.command {
        Commands::Clean => Command::Clean,
        Commands::Infer => Command::Infer,
        Commands::Make => Command::Make,
        Commands::Mark => Command::Mark,
        Commands::Publish | Commands::Release => Command::Publish,
    };

    let state = pipeline.run(command, &config, &repo, &registry)?;
    report(&state);
    Ok(())
}

/// The bundled filesystem-backed services, registered under `"local"`.
/// A production deployment registers real GitHub/GitLab clients here
/// instead; the core never hardcodes a concrete service.
fn default_registry(directory: &std::path::Path) -> ServiceRegistry {
    let assets_dir = directory.join(".nyx").join("assets");
    let releases_dir = directory.join(".nyx").join("releases");
    ServiceRegistry::new()
        .with_asset_service("local", Box::new(LocalAssetService::new(assets_dir)))
        .with_publish_service("local", Box::new(LocalPublishService::new(releases_dir)))
}

fn report(state: &State) {
    if let Some(version) = &state.version {
        println!("version: {version}");
    }
    if let Some(bump) = &state.bump {
        println!("bump: {bump}");
    }
    println!("newVersion: {}", state.new_version.unwrap_or(false));
    println!("newRelease: {}", state.new_release.unwrap_or(false));
}
