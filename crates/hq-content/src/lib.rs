#![deny(warnings)]

//! Loading catalog, campaign, team and rule documents from disk.
//!
//! Documents are JSON or YAML, picked by file extension.

use anyhow::{bail, Context, Result};
use hq_core::{Campaign, Catalog, MatchTeam};
use hq_rules::RuleConfig;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Supported document encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => bail!("unsupported document type: {}", path.display()),
        }
    }
}

/// Decode a document from text.
pub fn parse_document<T: DeserializeOwned>(text: &str, format: Format) -> Result<T> {
    let value = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(value)
}

/// Read and decode a document.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&text, format).with_context(|| format!("failed to parse {}", path.display()))
}

/// Ids that appear more than once, as `"<collection>/<id>"`.
pub fn duplicate_ids(catalog: &Catalog) -> Vec<String> {
    fn dupes<'a>(
        kind: &str,
        ids: impl Iterator<Item = &'a str>,
        out: &mut Vec<String>,
    ) {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                out.push(format!("{kind}/{id}"));
            }
        }
    }
    let mut out = Vec::new();
    dupes("factions", catalog.factions.iter().map(|f| f.id.as_str()), &mut out);
    dupes("lineages", catalog.lineages.iter().map(|l| l.id.as_str()), &mut out);
    dupes("profiles", catalog.profiles.iter().map(|p| p.id.as_str()), &mut out);
    dupes("items", catalog.items.iter().map(|i| i.id.as_str()), &mut out);
    out
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let catalog: Catalog = load_document(path)?;
    for dup in duplicate_ids(&catalog) {
        warn!(id = %dup, "duplicate catalog id, later entry wins");
    }
    debug!(
        factions = catalog.factions.len(),
        lineages = catalog.lineages.len(),
        profiles = catalog.profiles.len(),
        items = catalog.items.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn load_campaign(path: &Path) -> Result<Campaign> {
    load_document(path)
}

pub fn load_team(path: &Path) -> Result<MatchTeam> {
    load_document(path)
}

pub fn load_rules(path: &Path) -> Result<RuleConfig> {
    load_document(path)
}
