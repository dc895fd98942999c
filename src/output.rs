use crate::inventory::store::InventoryStore;
use crate::inventory::vars::Variables;
use anyhow::Result;
use clap::ValueEnum;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    fn accepts_extension(&self, ext: &str) -> bool {
        match self {
            Format::Json => ext.eq_ignore_ascii_case("json"),
            Format::Yaml => {
                ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml")
            }
        }
    }

    fn expected_extension(&self) -> &'static str {
        match self {
            Format::Json => ".json",
            Format::Yaml => ".yml/.yaml",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export file '{path}' does not match the chosen format, expected a {expected} extension")]
    ExtensionMismatch { path: String, expected: &'static str },
}

/// Renders the full inventory document in the chosen format.
pub fn render_store(store: &InventoryStore, format: Format) -> Result<String> {
    let doc = store.to_doc();
    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(&doc)?,
        Format::Yaml => serde_yaml::to_string(&doc)?,
    };

    Ok(rendered)
}

/// Renders a single variable map (host or group vars); an unknown name
/// renders as an empty mapping.
pub fn render_vars(vars: Option<&Variables>, format: Format) -> Result<String> {
    let empty = Variables::new();
    let vars = vars.unwrap_or(&empty);
    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(vars)?,
        Format::Yaml => serde_yaml::to_string(vars)?,
    };

    Ok(rendered)
}

/// Writes pre-rendered output to `path` after checking that the file
/// extension matches the chosen format.
pub fn write_export(path: &Path, format: Format, content: &str) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if !format.accepts_extension(ext) {
        return Err(ExportError::ExtensionMismatch {
            path: path.display().to_string(),
            expected: format.expected_extension(),
        }
        .into());
    }

    fs::write(path, content)?;
    Ok(())
}
