//! Check command - validate a worker config.

use anyhow::Result;
use serde_json::json;

use super::{load_config, CheckArgs};
use crate::output::Output;

/// Run the check command.
pub async fn run(args: CheckArgs, output: &Output) -> Result<()> {
    let (scope, partitions, bundle) = load_config(&args.config)?;

    if output.is_json() {
        output.json(&json!({
            "valid": true,
            "origin": scope.origin(),
            "resources": bundle.resources.len(),
            "core": bundle.core,
            "partitions": partitions,
        }));
        return Ok(());
    }

    output.ok(&format!("{} is valid", args.config.display()));
    output.fields(&[
        ("Origin", scope.origin().to_string()),
        ("Resources", bundle.resources.len().to_string()),
        ("Shell files", bundle.core.len().to_string()),
        ("Content partition", partitions.content.clone()),
        ("Staging partition", partitions.temp.clone()),
        ("Manifest partition", partitions.manifest.clone()),
    ]);

    if !bundle.resources.contains(precache_core::ROOT_PATH) {
        output.warn("No root document (\"/\") listed; navigations will not be served offline");
    }

    for path in &bundle.core {
        output.trace(&format!("shell: {}", scope.request_url(path)));
    }

    Ok(())
}
