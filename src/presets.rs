//! Named configurations shipped with the viewer.
//!
//! Loading a preset is the same as supplying its values by hand; see
//! [`Preset::to_config`].

use crate::config::SystemConfig;
use crate::error::ConfigError;
use crate::grammar::RuleSet;
use crate::turtle::Precision;
use serde::Serialize;

/// A bundled axiom, rule set and drawing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub axiom: &'static str,
    pub rules: &'static [(char, &'static str)],
    pub turn_angle: f64,
    pub step_length: f64,
    pub generations: u32,
}

/// Every preset, in menu order.
pub const PRESETS: [Preset; 4] = [
    Preset {
        name: "Binary Tree",
        axiom: "0",
        rules: &[('0', "1[*+0]-0"), ('1', "11")],
        turn_angle: 45.0,
        step_length: 10.0,
        generations: 4,
    },
    Preset {
        name: "Sierpinski Triangle",
        axiom: "F-F-F",
        rules: &[('F', "F-G+F+G-F"), ('G', "GG")],
        turn_angle: 120.0,
        step_length: 10.0,
        generations: 4,
    },
    Preset {
        name: "Dragon Curve",
        axiom: "F",
        rules: &[('F', "F+G"), ('G', "F-G")],
        turn_angle: 90.0,
        step_length: 10.0,
        generations: 4,
    },
    Preset {
        name: "Barnsley Fern",
        axiom: "X",
        rules: &[('X', "F+[[*X]-X]-F[-FX]+X"), ('F', "FF")],
        turn_angle: 25.0,
        step_length: 10.0,
        generations: 4,
    },
];

impl Preset {
    /// Looks a preset up by name, ignoring ASCII case and surrounding spaces.
    pub fn find(name: &str) -> Result<&'static Preset, ConfigError> {
        let wanted = name.trim();
        PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownPreset(wanted.to_owned()))
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rules
            .iter()
            .map(|&(symbol, replacement)| (symbol, replacement.to_owned()))
            .collect()
    }

    /// Owned, editable configuration equivalent to this preset.
    pub fn to_config(&self) -> SystemConfig {
        SystemConfig {
            axiom: self.axiom.to_owned(),
            rules: self.rule_set(),
            generations: self.generations,
            turn_angle: self.turn_angle,
            step_length: self.step_length,
            precision: Precision::Pixel,
            ..SystemConfig::default()
        }
    }
}
