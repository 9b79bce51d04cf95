//! Loading of request and alias files.

use anyhow::{bail, Context, Result};
use customcar_core::aliases::parse_identifier;
use customcar_core::{AliasTable, ExportError, ExportRequest};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("Input file not found: {}", path.display());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
}

/// Read an export request from a JSON file.
pub fn load_request(path: &Path) -> Result<ExportRequest> {
    let text = read_text(path)?;
    let request: ExportRequest = serde_json::from_str(&text)
        .map_err(ExportError::from)
        .with_context(|| format!("Failed to parse request {}", path.display()))?;
    debug!(
        "Loaded request for '{}' with {} specification(s)",
        request.model_name.as_deref().unwrap_or_default(),
        request.specifications.len()
    );
    Ok(request)
}

/// Register aliases from a JSON object of `alias -> identifier`.
///
/// Returns how many aliases were registered.
pub fn load_aliases(path: &Path, table: &mut AliasTable) -> Result<usize> {
    let text = read_text(path)?;
    let entries: BTreeMap<String, String> = serde_json::from_str(&text)
        .map_err(ExportError::from)
        .with_context(|| format!("Failed to parse alias file {}", path.display()))?;

    let mut registered = 0;
    for (alias, raw_id) in entries {
        let id = parse_identifier(&raw_id)
            .ok_or(ExportError::InvalidIdentifier { value: raw_id.clone() })
            .with_context(|| format!("Alias '{}' in {}", alias, path.display()))?;
        table
            .try_register(&alias, id)
            .with_context(|| format!("Alias file {}", path.display()))?;
        registered += 1;
    }
    debug!("Registered {} alias(es) from {}", registered, path.display());
    Ok(registered)
}
