//! Inbound configuration: everything a host collects before a run.
//!
//! Validation happens here, at the boundary. Once a [`SystemConfig`] has been
//! turned into a [`Grammar`] and a [`TurtleConfig`], the core assumes its
//! numbers are sane.

use crate::error::ConfigError;
use crate::grammar::{Grammar, RuleSet};
use crate::interpreter::TurtleConfig;
use crate::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::turtle::Precision;
use serde::{Deserialize, Serialize};

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

/// A complete figure description.
///
/// ```json
/// {
///   "axiom": "X",
///   "rules": { "X": "F+[[*X]-X]-F[-FX]+X", "F": "FF" },
///   "generations": 4,
///   "turn_angle": 25.0,
///   "step_length": 10.0
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub axiom: String,
    #[serde(default)]
    pub rules: RuleSet,
    pub generations: u32,
    pub turn_angle: f64,
    pub step_length: f64,
    #[serde(default)]
    pub precision: Precision,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            axiom: String::new(),
            rules: RuleSet::new(),
            generations: 4,
            turn_angle: 90.0,
            step_length: 10.0,
            precision: Precision::Pixel,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl SystemConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generations == 0 {
            return Err(ConfigError::Generations(self.generations));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Surface {
                width: self.width,
                height: self.height,
            });
        }
        TurtleConfig::new(self.turn_angle, self.step_length)?;
        Ok(())
    }

    pub fn grammar(&self) -> Grammar {
        Grammar::new(self.axiom.clone(), self.rules.clone(), self.generations)
    }

    pub fn turtle_config(&self) -> Result<TurtleConfig, ConfigError> {
        Ok(TurtleConfig::new(self.turn_angle, self.step_length)?.with_precision(self.precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_defaults() {
        let config = SystemConfig::from_json(
            r#"{"axiom":"F","rules":{"F":"F+G","G":"F-G"},"generations":3,"turn_angle":90,"step_length":5}"#,
        )
        .unwrap();
        assert_eq!(config.rules.get(&'G').map(String::as_str), Some("F-G"));
        assert_eq!(config.precision, Precision::Pixel);
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.grammar().expand(), "F+G+F-G");
    }

    #[test]
    fn json_round_trips_through_to_json() {
        let mut config = SystemConfig {
            axiom: "0".into(),
            ..SystemConfig::default()
        };
        config.rules.insert('0', "1[*+0]-0".into());
        config.precision = Precision::Exact;
        let parsed = SystemConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn boundary_rejects_bad_values() {
        let base = SystemConfig::default();
        let zero_gen = SystemConfig {
            generations: 0,
            ..base.clone()
        };
        assert_eq!(zero_gen.validate(), Err(ConfigError::Generations(0)));

        let bad_step = SystemConfig {
            step_length: -1.0,
            ..base.clone()
        };
        assert_eq!(bad_step.validate(), Err(ConfigError::StepLength(-1.0)));

        let no_area = SystemConfig { width: 0, ..base };
        assert!(matches!(no_area.validate(), Err(ConfigError::Surface { .. })));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            SystemConfig::from_json("{\"axiom\": 3}"),
            Err(ConfigError::Serialization(_))
        ));
    }
}
