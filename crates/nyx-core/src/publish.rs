//! The `Publish` command: creates (or idempotently reuses) a remote
//! release for the computed tag.

use nyx_config::{Configuration, ReleaseType};
use nyx_services::ServiceRegistry;
use nyx_template::Template;

use crate::context::template_context;
use crate::error::CoreError;
use crate::state::State;

pub struct Publish;

impl Publish {
    pub fn run(
        config: &Configuration,
        registry: &ServiceRegistry,
        branch: &str,
        release_type: &ReleaseType,
        state: &State,
    ) -> Result<(), CoreError> {
        if !release_type.publish {
            tracing::debug!("release type does not publish, skipping");
            return Ok(());
        }

        let version = state
            .version
            .as_ref()
            .expect("Publish requires Infer to have computed a version")
            .to_string();
        let tag_name = format!("{}{}", config.release_prefix, version);

        if config.dry_run {
            tracing::info!(tag = %tag_name, "dry run: skipping publish");
            return Ok(());
        }

        let context = template_context(state, branch);
        let body = match &release_type.publish_message {
            Some(template) => Template::parse(template)?.render(&context),
            None => String::new(),
        };

        for name in registry.publish_service_names() {
            let service = registry.publish_service(name)?;
            if service.get_release(&tag_name)?.is_some() {
                tracing::debug!(service = %name, tag = %tag_name, "release already exists, skipping");
                continue;
            }
            let handle = service.create_release(&tag_name, &body, &[])?;
            tracing::info!(service = %name, tag = %tag_name, url = %handle.url, "published release");
        }

        Ok(())
    }
}
