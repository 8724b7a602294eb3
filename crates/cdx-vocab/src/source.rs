use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VocabError;

const BUNDLED_TABLE: &str = include_str!("data/lab_items.json");

/// One raw lab item as it appears in the hospital's item dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabItem {
    pub itemid: u32,
    pub label: String,
    #[serde(default)]
    pub fluid: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A microbiology test. These carry no fluid tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrobiologyItem {
    pub itemid: u32,
    pub label: String,
}

/// Raw source the vocabulary is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabItemTable {
    pub items: Vec<LabItem>,
    #[serde(default)]
    pub microbiology: Vec<MicrobiologyItem>,
}

impl LabItemTable {
    /// Sample table compiled into the crate. Covers every identifier used by
    /// the curated panels and the pathology guidelines.
    pub fn bundled() -> Result<Self, VocabError> {
        Self::from_json(BUNDLED_TABLE)
    }

    pub fn from_json(contents: &str) -> Result<Self, VocabError> {
        let table: LabItemTable = serde_json::from_str(contents)?;
        if table.items.is_empty() {
            return Err(VocabError::EmptyTable);
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, VocabError> {
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            items = table.items.len(),
            microbiology = table.microbiology.len(),
            "loaded lab item table"
        );
        Ok(table)
    }
}
