use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{SieveError, SieveResult};

/// One semantic tag and the physical partitions it maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    #[serde(default)]
    pub partitions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Receives the policy-intent bonus. Defaults from the tag name.
    #[serde(default)]
    pub policy_broad: Option<bool>,
}

impl TagEntry {
    pub fn new(name: impl Into<String>, partitions: &[&str], keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            partitions: partitions.iter().map(|p| p.to_string()).collect(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            policy_broad: None,
        }
    }

    pub fn is_policy_broad(&self) -> bool {
        self.policy_broad.unwrap_or_else(|| {
            let name = self.name.to_lowercase();
            name.contains("policy") || name.contains("guideline")
        })
    }

    /// Physical partitions for this tag. An unmapped tag is its own partition.
    pub fn physical_partitions(&self) -> Vec<String> {
        if self.partitions.is_empty() {
            vec![self.name.clone()]
        } else {
            self.partitions.clone()
        }
    }
}

/// Ordered semantic tag table. Declaration order is the router's tie-break.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceTable {
    pub tags: Vec<TagEntry>,
}

impl NamespaceTable {
    pub fn new(tags: Vec<TagEntry>) -> Self {
        Self { tags }
    }

    pub fn from_json(json: &str) -> SieveResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_toml(toml_str: &str) -> SieveResult<Self> {
        toml::from_str(toml_str).map_err(|e| SieveError::ConfigError(e.to_string()))
    }

    /// Load from a `.json` or `.toml` file, chosen by extension.
    pub fn load(path: impl AsRef<std::path::Path>) -> SieveResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SieveError::ConfigError(format!("{}: {e}", path.display())))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TagEntry> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.name.clone()).collect()
    }

    /// Partitions for a single tag. Unknown tags translate to themselves.
    pub fn partitions_for(&self, tag: &str) -> Vec<String> {
        self.get(tag)
            .map(TagEntry::physical_partitions)
            .unwrap_or_else(|| vec![tag.to_string()])
    }

    /// Partition → tags that map to it.
    pub fn reverse_map(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for tag in &self.tags {
            for partition in tag.physical_partitions() {
                map.entry(partition).or_default().push(tag.name.clone());
            }
        }
        map
    }

    /// Every physical partition in first-seen order.
    pub fn all_partitions(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for tag in &self.tags {
            for p in tag.physical_partitions() {
                if !out.contains(&p) {
                    out.push(p);
                }
            }
        }
        out
    }
}
