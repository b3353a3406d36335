use anyhow::{Context, Result};
use property_platform::artifacts::strip_dir;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: strip-artifacts <build-contracts-dir>")?;

    let count = strip_dir(&dir)
        .with_context(|| format!("Failed to strip artifacts in {}", dir.display()))?;
    tracing::info!(count, dir = %dir.display(), "Done");
    Ok(())
}
