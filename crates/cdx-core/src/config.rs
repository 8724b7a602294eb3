use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Matching thresholds used by the parser, the resolver and the diagnosis
/// scorer. Scores are on the 0–100 similarity scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// An action name must score strictly above this to count as a tool name.
    #[serde(default = "default_action_match_threshold")]
    pub action_match_threshold: u32,
    /// Minimum score for full and long lab names.
    #[serde(default = "default_lab_match_threshold")]
    pub lab_match_threshold: u32,
    /// Minimum score for parenthetical short names.
    #[serde(default = "default_short_name_threshold")]
    pub short_name_threshold: u32,
    /// Share of content words that imaging or lab terms must exceed before a
    /// free-text action is classified by its content.
    #[serde(default = "default_keyword_share_threshold")]
    pub keyword_share_threshold: f64,
    /// A diagnosis word must score strictly above this against the pathology name.
    #[serde(default = "default_diagnosis_match_threshold")]
    pub diagnosis_match_threshold: u32,
    /// Minimum score for a requested pathology to receive its diagnostic criteria.
    #[serde(default = "default_criteria_match_threshold")]
    pub criteria_match_threshold: u32,
}

fn default_action_match_threshold() -> u32 {
    80
}

fn default_lab_match_threshold() -> u32 {
    90
}

fn default_short_name_threshold() -> u32 {
    100
}

fn default_keyword_share_threshold() -> f64 {
    0.25
}

fn default_diagnosis_match_threshold() -> u32 {
    90
}

fn default_criteria_match_threshold() -> u32 {
    80
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            action_match_threshold: default_action_match_threshold(),
            lab_match_threshold: default_lab_match_threshold(),
            short_name_threshold: default_short_name_threshold(),
            keyword_share_threshold: default_keyword_share_threshold(),
            diagnosis_match_threshold: default_diagnosis_match_threshold(),
            criteria_match_threshold: default_criteria_match_threshold(),
        }
    }
}

impl DiagnosisConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        let scores = [
            ("action_match_threshold", self.action_match_threshold),
            ("lab_match_threshold", self.lab_match_threshold),
            ("short_name_threshold", self.short_name_threshold),
            ("diagnosis_match_threshold", self.diagnosis_match_threshold),
            ("criteria_match_threshold", self.criteria_match_threshold),
        ];
        for (name, value) in scores {
            if value > 100 {
                return Err(CoreError::InvalidThreshold {
                    name,
                    value: f64::from(value),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.keyword_share_threshold) {
            return Err(CoreError::InvalidThreshold {
                name: "keyword_share_threshold",
                value: self.keyword_share_threshold,
            });
        }
        Ok(())
    }
}

/// Parse a config from JSON text, migrating older shapes first.
pub fn parse_config(contents: &str) -> Result<DiagnosisConfig, CoreError> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let raw_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let on_disk_version =
        u32::try_from(raw_version).map_err(|_| CoreError::UnsupportedConfigVersion {
            found: raw_version,
            supported: CURRENT_VERSION,
        })?;

    let migrated = migrate(json, on_disk_version)?;
    let config: DiagnosisConfig = serde_json::from_value(migrated)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<DiagnosisConfig, CoreError> {
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::info!(path = %path.display(), version = config.config_version, "loaded diagnosis config");
    Ok(config)
}

pub fn save_config(path: &Path, config: &DiagnosisConfig) -> Result<(), CoreError> {
    config.validate()?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedConfigVersion {
            found: from_version.into(),
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: the keyword share was a percentage before it became a fraction.
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(CoreError::MalformedConfig)?;
        if let Some(percent) = obj
            .remove("keyword_share_percent")
            .and_then(|v| v.as_f64())
        {
            obj.entry("keyword_share_threshold")
                .or_insert(serde_json::json!(percent / 100.0));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (keyword share as fraction)");
    }

    Ok(json)
}
