//! Compiled-contract artifact handling.
//!
//! The platform's build pipeline emits one JSON file per contract. The full
//! files carry bytecode, source maps, and compiler metadata; the client only
//! needs `{contractName, abi}`, and the stripper rewrites a build directory
//! down to exactly that shape.

use alloy::json_abi::JsonAbi;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One compiled-contract artifact. Parsing the ABI into [`JsonAbi`] means a
/// malformed artifact fails at load rather than at call time.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    /// Present in full build output, absent after stripping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<String>,
}

/// Load `<dir>/<name>.json`. No caching; callers hold on to what they need.
pub fn load_artifact(dir: &Path, name: &str) -> Result<Artifact> {
    let path = dir.join(format!("{name}.json"));
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read artifact: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse artifact: {}", path.display()))
}

/// Rewrite one build file down to `{contractName, abi}` in place.
///
/// A file missing either field is an error, as is anything that does not
/// parse.
pub fn strip_file(path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read build file: {}", path.display()))?;
    let artifact: Artifact = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse build file: {}", path.display()))?;

    let stripped = serde_json::json!({
        "contractName": artifact.contract_name,
        "abi": artifact.abi,
    });
    fs::write(path, serde_json::to_string(&stripped)?)
        .with_context(|| format!("Failed to write stripped artifact: {}", path.display()))?;

    tracing::debug!(contract = %artifact.contract_name, path = %path.display(), "Stripped artifact");
    Ok(())
}

/// Strip every regular file in `dir`, aborting on the first failure.
///
/// Files are visited in name order so a failing batch always stops at the
/// same place. Returns the number of files rewritten.
pub fn strip_dir(dir: &Path) -> Result<usize> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read build directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to list build directory: {}", dir.display()))?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    for path in &paths {
        strip_file(path)?;
    }

    tracing::info!(count = paths.len(), dir = %dir.display(), "Stripped build artifacts");
    Ok(paths.len())
}
