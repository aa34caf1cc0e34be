use anyhow::Context;
use std::path::Path;

use super::types::SchemaDescription;

impl SchemaDescription {
    /// Parse a description serialized as JSON.
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("Failed to parse schema description as JSON")
    }

    /// Parse a description serialized as YAML.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse schema description as YAML")
    }
}

/// Load a schema description from disk
///
/// The parser is picked from the extension: `.yaml`/`.yml` are YAML,
/// everything else is JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not deserialize into a
/// [`SchemaDescription`]. The error carries the file path.
pub fn load_schema(path: &Path) -> anyhow::Result<SchemaDescription> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema description: {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == "yaml" || e == "yml");

    let schema = if is_yaml {
        SchemaDescription::from_yaml_str(&content)
    } else {
        SchemaDescription::from_json_str(&content)
    };
    let schema = schema.with_context(|| format!("Invalid schema description: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        tables = schema.tables.len(),
        "loaded schema description"
    );
    Ok(schema)
}
