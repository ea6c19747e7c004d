//! Preset file format.
//!
//! A preset names one engine and the parameter values to apply before
//! rendering:
//!
//! ```toml
//! name = "Half-time stutter"
//! effect = "repeat"
//!
//! [params]
//! active = true
//! bpm = 90
//! division = 8
//! speed = 0.5
//! ```
//!
//! Parameter keys are names or symbols; values may be numbers, booleans, or
//! the same text accepted by `--param`.

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Preset file format.
#[derive(Debug, Deserialize)]
pub struct Preset {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional description
    #[serde(default)]
    #[allow(dead_code)]
    pub description: Option<String>,
    /// Engine id (e.g., "crush", "repeat").
    pub effect: String,
    /// Parameter values, applied in key order.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

/// A parameter value as written in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `true` / `false`, for toggles.
    Bool(bool),
    /// Whole number.
    Integer(i64),
    /// Decimal number.
    Float(f64),
    /// Text parsed by the parameter, e.g. `"on"`.
    Text(String),
}

impl ParamValue {
    /// Text form understood by the parameter parser.
    pub fn to_text(&self) -> String {
        match self {
            ParamValue::Bool(true) => "on".to_string(),
            ParamValue::Bool(false) => "off".to_string(),
            ParamValue::Integer(v) => v.to_string(),
            ParamValue::Float(v) => v.to_string(),
            ParamValue::Text(s) => s.clone(),
        }
    }
}

impl Preset {
    /// Read and parse a preset file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read preset {}", path.display()))?;
        let preset: Preset = toml::from_str(&content)
            .with_context(|| format!("Invalid preset {}", path.display()))?;
        Ok(preset)
    }

    /// Parameters as `(name, text)` pairs.
    pub fn param_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(name, value)| (name.clone(), value.to_text()))
            .collect()
    }
}
