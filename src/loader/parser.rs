//! Manifest parser
//!
//! Parses and validates manifest files and resolves their sample pairs
//! into [`SourceGroup`]s.

use crate::error::{Error, Result};
use crate::loader::types::{GroupDefinition, Manifest, PairDefinition};
use crate::types::{SamplePair, SourceGroup};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a manifest file and resolve its groups
///
/// Sample file paths are resolved relative to the manifest's directory.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<SourceGroup>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read manifest '{}': {}",
            path.display(),
            e
        ))
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    load_manifest_from_str(&content, Some(base_dir))
}

/// Parse a manifest document (YAML or JSON) and resolve its groups
///
/// Without a `base_dir`, pairs referring to sample files are rejected.
pub fn load_manifest_from_str(text: &str, base_dir: Option<&Path>) -> Result<Vec<SourceGroup>> {
    let manifest: Manifest = serde_yaml::from_str(text)
        .map_err(|e| Error::config(format!("Failed to parse manifest: {e}")))?;
    resolve_manifest(manifest, base_dir)
}

/// Validate a parsed manifest and turn it into source groups
pub fn resolve_manifest(manifest: Manifest, base_dir: Option<&Path>) -> Result<Vec<SourceGroup>> {
    validate_manifest(&manifest)?;

    manifest
        .groups
        .into_iter()
        .map(|group| resolve_group(group, base_dir))
        .collect()
}

/// Validate a manifest
fn validate_manifest(manifest: &Manifest) -> Result<()> {
    if manifest.groups.is_empty() {
        return Err(Error::NoGroups);
    }

    let mut names = HashSet::new();
    for group in &manifest.groups {
        if group.name.trim().is_empty() {
            return Err(Error::invalid_param("groups.name", "Group name cannot be empty"));
        }
        if !names.insert(group.name.as_str()) {
            return Err(Error::DuplicateGroup {
                group: group.name.clone(),
            });
        }
    }

    Ok(())
}

fn resolve_group(group: GroupDefinition, base_dir: Option<&Path>) -> Result<SourceGroup> {
    let mut resolved = SourceGroup::new(&group.name);
    for (index, pair) in group.pairs.into_iter().enumerate() {
        let field = |side: &str| format!("groups[{}].pairs[{index}].{side}", group.name);
        let PairDefinition {
            input,
            input_file,
            output,
            output_file,
        } = pair;

        let request = resolve_side(&field("input"), input, input_file, base_dir)?;
        let output = resolve_side(&field("output"), output, output_file, base_dir)?;
        resolved.push(SamplePair::from_options(request, output));
    }
    Ok(resolved)
}

/// Resolve one side of a pair to raw JSON text
fn resolve_side(
    field: &str,
    inline: Option<serde_json::Value>,
    file: Option<PathBuf>,
    base_dir: Option<&Path>,
) -> Result<Option<String>> {
    match (inline, file) {
        (Some(_), Some(_)) => Err(Error::invalid_param(
            field,
            "Give the sample inline or as a file, not both",
        )),
        (Some(serde_json::Value::String(text)), None) => Ok(Some(text)),
        (Some(value), None) => Ok(Some(value.to_string())),
        (None, Some(file)) => {
            let base_dir = base_dir.ok_or_else(|| {
                Error::invalid_param(field, "Sample files are not allowed here")
            })?;
            let path = base_dir.join(&file);
            let text = fs::read_to_string(&path).map_err(|e| {
                Error::invalid_param(
                    field,
                    format!("Failed to read sample file '{}': {}", path.display(), e),
                )
            })?;
            Ok(Some(text))
        }
        (None, None) => Ok(None),
    }
}
