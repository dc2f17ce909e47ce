//! Diff command - preview an upgrade against the deployed manifest.

use anyhow::{Context, Result};
use precache_core::{ManifestDiff, ResourceManifest};

use super::{load_config, DiffArgs};
use crate::output::Output;

/// Run the diff command.
pub async fn run(args: DiffArgs, output: &Output) -> Result<()> {
    let (_, _, bundle) = load_config(&args.config)?;

    let previous = match &args.previous {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
            let manifest = ResourceManifest::from_json(&raw)
                .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
            Some(manifest)
        }
        None => None,
    };

    let diff = ManifestDiff::between(previous.as_ref(), &bundle.resources);

    if output.is_json() {
        output.json(&diff);
        return Ok(());
    }

    if previous.is_none() {
        output.warn("No previous manifest: activation rebuilds the cache from the shell files");
    } else if diff.is_empty() {
        output.ok("No resource changes");
        return Ok(());
    }

    output.path_list("Added", &diff.added);
    output.path_list("Changed (evicted)", &diff.changed);
    output.path_list("Removed (evicted)", &diff.removed);

    output.title("Summary");
    output.fields(&[
        ("Retained", diff.unchanged.len().to_string()),
        ("Evicted", diff.evicted().count().to_string()),
        ("Refreshed shell files", bundle.core.len().to_string()),
    ]);

    Ok(())
}
