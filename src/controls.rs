//! Parameter controls.
//!
//! Controls are a pure value source: text keyed by [`ParamKey`]. Each frame
//! the driver takes a snapshot of every control with [`read_params`] and
//! hands the resulting [`WaveParams`] to the field, which diffs and applies
//! it.
//!
//! Text is not validated. Malformed or missing values parse to `NaN`, which
//! renders as a degenerate but harmless field. For the integer grid
//! dimensions `NaN` and negative values saturate to `0`, an empty grid.

use std::collections::HashMap;

use crate::params::{ParamKey, ParamKind, WaveParams};

/// A source of raw control text.
pub trait ControlSource {
    /// Current text of the control for `key`, if it exists.
    fn raw(&self, key: ParamKey) -> Option<&str>;
}

/// In-memory control text, one entry per parameter.
#[derive(Debug, Clone, Default)]
pub struct TextControls {
    values: HashMap<ParamKey, String>,
}

impl TextControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controls pre-filled with the text of `params`.
    pub fn from_params(params: &WaveParams) -> Self {
        let mut controls = Self::new();
        for key in ParamKey::ALL {
            controls.set(key, params.get(key).to_string());
        }
        controls
    }

    pub fn set(&mut self, key: ParamKey, text: impl Into<String>) {
        self.values.insert(key, text.into());
    }

    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Mutable text of a control, created empty if missing.
    pub fn text_mut(&mut self, key: ParamKey) -> &mut String {
        self.values.entry(key).or_default()
    }
}

impl ControlSource for TextControls {
    fn raw(&self, key: ParamKey) -> Option<&str> {
        self.get(key)
    }
}

/// Parse control text according to the parameter's kind.
///
/// Returns `NaN` for anything that does not parse.
pub fn parse_value(kind: ParamKind, text: &str) -> f32 {
    match kind {
        ParamKind::Float => text.trim().parse::<f32>().unwrap_or(f32::NAN),
        ParamKind::Integer => parse_integer(text),
    }
}

/// Parse the leading integer of `text`.
///
/// Leading whitespace and one sign are accepted, then decimal digits (or
/// hex digits after `0x`); parsing stops at the first other character, so
/// `"12px"` is 12 and `"1e3"` is 1. No digits at all gives `NaN`, which
/// also covers `"inf"` and `"NaN"`.
pub fn parse_integer(text: &str) -> f32 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits = rest.chars().take_while(|c| c.is_digit(radix));
    let mut value = None::<f64>;
    for c in digits {
        let digit = c.to_digit(radix).map_or(0.0, f64::from);
        value = Some(value.unwrap_or(0.0) * f64::from(radix) + digit);
    }

    match value {
        Some(v) if negative => -v as f32,
        Some(v) => v as f32,
        None => f32::NAN,
    }
}

/// Snapshot every control into a parameter bundle.
pub fn read_params(source: &dyn ControlSource) -> WaveParams {
    let value = |key: ParamKey| {
        source
            .raw(key)
            .map(|text| parse_value(key.kind(), text))
            .unwrap_or(f32::NAN)
    };

    WaveParams {
        // `as` saturates: NaN and negatives become 0.
        width: value(ParamKey::Width) as u32,
        height: value(ParamKey::Height) as u32,
        spread: value(ParamKey::Spread),
        frequency: value(ParamKey::Frequency),
        amplitude: value(ParamKey::Amplitude),
        radius: value(ParamKey::Radius),
        strength: value(ParamKey::Strength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params_reads_back() {
        let params = WaveParams::new(40, 30, 5.0).with_wave(0.1, 5.5);
        let controls = TextControls::from_params(&params);
        assert_eq!(controls.get(ParamKey::Width), Some("40"));
        assert_eq!(controls.get(ParamKey::Amplitude), Some("5.5"));
        assert_eq!(read_params(&controls), params);
    }

    #[test]
    fn test_parse_float_and_integer() {
        assert_eq!(parse_value(ParamKind::Float, "0.25"), 0.25);
        assert_eq!(parse_value(ParamKind::Float, " 3 "), 3.0);
        assert_eq!(parse_value(ParamKind::Integer, "12.9"), 12.0);
        assert_eq!(parse_value(ParamKind::Integer, "-7.5"), -7.0);
    }

    #[test]
    fn test_integer_stops_at_first_non_digit() {
        assert_eq!(parse_integer("12px"), 12.0);
        assert_eq!(parse_integer("1e3"), 1.0);
        assert_eq!(parse_integer("1e12"), 1.0);
        assert_eq!(parse_integer("  +40 "), 40.0);
        assert_eq!(parse_integer("-0"), 0.0);
        assert_eq!(parse_integer("0x10"), 16.0);
    }

    #[test]
    fn test_integer_without_digits_is_nan() {
        for text in ["inf", "infinity", "NaN", "", "-", "px12", ".5", "0x"] {
            assert!(parse_integer(text).is_nan(), "{text:?} should be NaN");
        }
    }

    #[test]
    fn test_exponent_and_infinity_widths_do_not_blow_up() {
        let mut controls = TextControls::from_params(&WaveParams::default());
        controls.set(ParamKey::Width, "1e12");
        controls.set(ParamKey::Height, "inf");
        let params = read_params(&controls);
        assert_eq!(params.width, 1);
        assert_eq!(params.height, 0);

        controls.set(ParamKey::Width, "12px");
        assert_eq!(read_params(&controls).width, 12);
    }

    #[test]
    fn test_malformed_text_is_nan() {
        assert!(parse_value(ParamKind::Float, "abc").is_nan());
        assert!(parse_value(ParamKind::Integer, "").is_nan());
    }

    #[test]
    fn test_malformed_controls_propagate() {
        let mut controls = TextControls::from_params(&WaveParams::default());
        controls.set(ParamKey::Frequency, "fast");
        controls.set(ParamKey::Width, "wide");
        controls.set(ParamKey::Height, "-3");

        let params = read_params(&controls);
        assert!(params.frequency.is_nan());
        assert_eq!(params.width, 0);
        assert_eq!(params.height, 0);
        assert_eq!(params.spread, WaveParams::default().spread);
    }

    #[test]
    fn test_missing_controls_are_nan() {
        let params = read_params(&TextControls::new());
        assert_eq!(params.width, 0);
        assert!(params.spread.is_nan());
        assert!(params.strength.is_nan());
    }

    #[test]
    fn test_integer_kind_truncates_radius() {
        let mut controls = TextControls::from_params(&WaveParams::default());
        controls.set(ParamKey::Radius, "12.75");
        assert_eq!(read_params(&controls).radius, 12.0);
    }

    #[test]
    fn test_text_mut_edits_in_place() {
        let mut controls = TextControls::new();
        controls.text_mut(ParamKey::Spread).push_str("8");
        assert_eq!(controls.raw(ParamKey::Spread), Some("8"));
    }
}
