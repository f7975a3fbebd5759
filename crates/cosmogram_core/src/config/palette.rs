//! Palette model and candidate normalization.
//!
//! # Responsibility
//! - Parse and validate hex colors.
//! - Turn any candidate JSON value into a complete `Palette`.
//!
//! # Invariants
//! - `Palette::layers` always holds exactly `PALETTE_LAYER_COUNT` entries.
//! - A valid caller color keeps its original index; every other slot is
//!   filled positionally from `Palette::default()`.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed number of layer colors carried by every palette.
pub const PALETTE_LAYER_COUNT: usize = 6;

const DEFAULT_BACKGROUND: Color = Color::rgb(0x0b, 0x0a, 0x14);
const DEFAULT_INK: Color = Color::rgb(0xf4, 0xf1, 0xff);
const DEFAULT_LAYERS: [Color; PALETTE_LAYER_COUNT] = [
    // deep indigo
    Color::rgb(0x28, 0x00, 0x50),
    // electric violet
    Color::rgb(0x46, 0x00, 0x82),
    // luminous blue
    Color::rgb(0x00, 0x80, 0xff),
    // auric green
    Color::rgb(0x00, 0xff, 0x80),
    // golden amber
    Color::rgb(0xff, 0xc8, 0x00),
    // pure light
    Color::rgb(0xff, 0xff, 0xff),
];

/// Opaque RGB color parsed from `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string.
    ///
    /// Accepts `#rgb` and `#rrggbb` in either case; surrounding whitespace
    /// is ignored.
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        let trimmed = raw.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(ColorError::MissingHash(trimmed.to_string()));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigits(trimmed.to_string()));
        }
        let channel = |hex: &str| {
            u8::from_str_radix(hex, 16).map_err(|_| ColorError::InvalidDigits(trimmed.to_string()))
        };
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            other => Err(ColorError::InvalidLength(other)),
        }
    }

    pub fn red(self) -> u8 {
        self.r
    }

    pub fn green(self) -> u8 {
        self.g
    }

    pub fn blue(self) -> u8 {
        self.b
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// Hex color parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    MissingHash(String),
    InvalidDigits(String),
    InvalidLength(usize),
}

impl Display for ColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHash(value) => write!(f, "color must start with `#`: {value}"),
            Self::InvalidDigits(value) => write!(f, "color has non-hex digits: {value}"),
            Self::InvalidLength(len) => {
                write!(f, "color must have 3 or 6 hex digits, got {len}")
            }
        }
    }
}

impl Error for ColorError {}

/// Complete drawing palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub ink: Color,
    /// Always `PALETTE_LAYER_COUNT` long.
    pub layers: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            ink: DEFAULT_INK,
            layers: DEFAULT_LAYERS.to_vec(),
        }
    }
}

impl Palette {
    /// Returns the color for one layer slot, wrapping out-of-range indices.
    pub fn layer(&self, index: usize) -> Color {
        self.layers
            .get(index % PALETTE_LAYER_COUNT)
            .copied()
            .unwrap_or(DEFAULT_LAYERS[index % PALETTE_LAYER_COUNT])
    }
}

/// Normalizes any candidate value into a complete palette.
///
/// Never fails: non-object candidates, non-string colors and malformed hex
/// all resolve to the default for the affected slot.
pub fn normalize_palette(candidate: &Value) -> Palette {
    let defaults = Palette::default();
    let background = color_or(candidate.get("background"), defaults.background, "background");
    let ink = color_or(candidate.get("ink"), defaults.ink, "ink");

    let supplied = candidate
        .get("layers")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let layers = DEFAULT_LAYERS
        .iter()
        .enumerate()
        .map(|(index, fallback)| match supplied.get(index) {
            Some(value) => color_or(Some(value), *fallback, "layers"),
            None => *fallback,
        })
        .collect();

    Palette {
        background,
        ink,
        layers,
    }
}

fn color_or(value: Option<&Value>, fallback: Color, slot: &str) -> Color {
    let Some(value) = value else {
        return fallback;
    };
    match value.as_str().map(Color::parse) {
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            debug!("event=palette_slot_default module=config slot={slot} reason={err}");
            fallback
        }
        None => {
            debug!("event=palette_slot_default module=config slot={slot} reason=not_a_string");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_palette, Color, ColorError, Palette, PALETTE_LAYER_COUNT};
    use serde_json::json;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse("#fff").expect("short hex"), Color::rgb(255, 255, 255));
        assert_eq!(
            Color::parse(" #0080FF ").expect("long hex"),
            Color::rgb(0x00, 0x80, 0xff)
        );
    }

    #[test]
    fn short_hex_expands_each_channel() {
        let color = Color::parse("#A3c").expect("short hex");
        assert_eq!((color.red(), color.green(), color.blue()), (0xaa, 0x33, 0xcc));
        assert_eq!(color.to_hex(), "#aa33cc");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(
            Color::parse("0080ff"),
            Err(ColorError::MissingHash(_))
        ));
        assert!(matches!(
            Color::parse("#00zz00"),
            Err(ColorError::InvalidDigits(_))
        ));
        assert_eq!(Color::parse("#12345"), Err(ColorError::InvalidLength(5)));
    }

    #[test]
    fn non_object_candidate_yields_defaults() {
        assert_eq!(normalize_palette(&json!(null)), Palette::default());
        assert_eq!(normalize_palette(&json!([1, 2, 3])), Palette::default());
    }

    #[test]
    fn truncates_long_layer_lists() {
        let layers: Vec<String> = (0..10).map(|_| "#123456".to_string()).collect();
        let palette = normalize_palette(&json!({ "layers": layers }));
        assert_eq!(palette.layers.len(), PALETTE_LAYER_COUNT);
        assert!(palette.layers.iter().all(|c| c.to_hex() == "#123456"));
    }

    #[test]
    fn serializes_colors_as_hex_strings() {
        let value = serde_json::to_value(Palette::default()).expect("palette serializes");
        assert_eq!(value["background"], "#0b0a14");
        assert_eq!(value["layers"][2], "#0080ff");
    }
}
