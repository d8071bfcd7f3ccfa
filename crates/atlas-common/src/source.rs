//! Data sources: a named weather variable plus its coloring rules.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::rules::{ColorRule, CompareOp};

/// Default historical archive endpoint (Open-Meteo archive API).
pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// A weather variable to query plus the ordered rules that color it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    pub name: String,
    /// Archive variable key, e.g. "temperature_2m". Empty means the
    /// source is not yet configured and resolution yields the neutral
    /// color.
    pub field: String,
    pub api_url: String,
    /// Evaluated in order; the first matching rule wins.
    pub rules: Vec<ColorRule>,
}

impl DataSource {
    /// The seeded 2m-temperature source with its four default bands.
    pub fn default_temperature() -> Self {
        Self {
            id: "openmeteo-temp".to_string(),
            name: "Temperature".to_string(),
            field: "temperature_2m".to_string(),
            api_url: DEFAULT_ARCHIVE_URL.to_string(),
            rules: vec![
                ColorRule::new(CompareOp::Lt, 0.0, Color::rgb(0x3B, 0x82, 0xF6), "Very Cold"),
                ColorRule::new(CompareOp::Ge, 0.0, Color::rgb(0x10, 0xB9, 0x81), "Cold"),
                ColorRule::new(CompareOp::Ge, 15.0, Color::rgb(0xF5, 0x9E, 0x0B), "Mild"),
                ColorRule::new(CompareOp::Ge, 25.0, Color::rgb(0xEF, 0x44, 0x44), "Hot"),
            ],
        }
    }

    /// Apply a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, patch: DataSourcePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(field) = patch.field {
            self.field = field;
        }
        if let Some(api_url) = patch.api_url {
            self.api_url = api_url;
        }
        if let Some(rules) = patch.rules {
            self.rules = rules;
        }
    }
}

/// Partial update for a data source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSourcePatch {
    pub name: Option<String>,
    pub field: Option<String>,
    pub api_url: Option<String>,
    pub rules: Option<Vec<ColorRule>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_temperature_rule_order() {
        let source = DataSource::default_temperature();
        assert_eq!(source.field, "temperature_2m");
        let labels: Vec<_> = source.rules.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Very Cold", "Cold", "Mild", "Hot"]);
    }

    #[test]
    fn test_apply_patch_preserves_unset_fields() {
        let mut source = DataSource::default_temperature();
        source.apply(DataSourcePatch {
            field: Some("precipitation".to_string()),
            ..Default::default()
        });
        assert_eq!(source.field, "precipitation");
        assert_eq!(source.name, "Temperature");
        assert_eq!(source.rules.len(), 4);
    }
}
