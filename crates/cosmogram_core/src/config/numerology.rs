//! Numerology constants: the single source of every layout ratio.
//!
//! # Invariants
//! - Every value is finite and strictly positive.
//! - Invalid overrides are discarded per key; unknown keys are ignored.

use super::value::positive_number;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named numerology constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NumerologyConstants {
    pub three: f64,
    pub seven: f64,
    pub nine: f64,
    pub eleven: f64,
    #[serde(rename = "TWENTYTWO")]
    pub twenty_two: f64,
    #[serde(rename = "THIRTYTHREE")]
    pub thirty_three: f64,
    #[serde(rename = "NINETYNINE")]
    pub ninety_nine: f64,
    #[serde(rename = "ONEFORTYFOUR")]
    pub one_forty_four: f64,
    pub golden_ratio: f64,
}

impl Default for NumerologyConstants {
    fn default() -> Self {
        Self {
            three: 3.0,
            seven: 7.0,
            nine: 9.0,
            eleven: 11.0,
            twenty_two: 22.0,
            thirty_three: 33.0,
            ninety_nine: 99.0,
            one_forty_four: 144.0,
            golden_ratio: (1.0 + 5.0_f64.sqrt()) / 2.0,
        }
    }
}

impl NumerologyConstants {
    /// Key/value view in declaration order, using the external key names.
    pub fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("THREE", self.three),
            ("SEVEN", self.seven),
            ("NINE", self.nine),
            ("ELEVEN", self.eleven),
            ("TWENTYTWO", self.twenty_two),
            ("THIRTYTHREE", self.thirty_three),
            ("NINETYNINE", self.ninety_nine),
            ("ONEFORTYFOUR", self.one_forty_four),
            ("GOLDEN_RATIO", self.golden_ratio),
        ]
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "THREE" => Some(&mut self.three),
            "SEVEN" => Some(&mut self.seven),
            "NINE" => Some(&mut self.nine),
            "ELEVEN" => Some(&mut self.eleven),
            "TWENTYTWO" => Some(&mut self.twenty_two),
            "THIRTYTHREE" => Some(&mut self.thirty_three),
            "NINETYNINE" => Some(&mut self.ninety_nine),
            "ONEFORTYFOUR" => Some(&mut self.one_forty_four),
            "GOLDEN_RATIO" => Some(&mut self.golden_ratio),
            _ => None,
        }
    }
}

/// Normalizes any candidate value into complete constants.
pub fn normalize_constants(candidate: &Value) -> NumerologyConstants {
    let mut constants = NumerologyConstants::default();
    let Some(object) = candidate.as_object() else {
        return constants;
    };

    for (key, raw) in object {
        let Some(slot) = constants.slot_mut(key) else {
            continue;
        };
        match positive_number(Some(raw)) {
            Some(number) => *slot = number,
            None => debug!("event=constant_default module=config key={key}"),
        }
    }
    constants
}
