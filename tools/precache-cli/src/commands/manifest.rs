//! Manifest command - print the record activation persists.

use anyhow::{Context, Result};

use super::{load_config, ManifestArgs};
use crate::output::Output;

/// Run the manifest command.
pub async fn run(args: ManifestArgs, output: &Output) -> Result<()> {
    let (_, _, bundle) = load_config(&args.config)?;
    let record = bundle.resources.to_json()?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &record)
                .await
                .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
            output.ok(&format!(
                "Wrote {} entries to {}",
                bundle.resources.len(),
                path.display()
            ));
        }
        None => println!("{}", record),
    }

    Ok(())
}
