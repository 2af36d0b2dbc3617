//! Wave field parameters.
//!
//! [`WaveParams`] is the structured parameter bundle for a particle field.
//! Parameters split into two groups:
//!
//! - **Shape** (`width`, `height`, `spread`): changing one regenerates the
//!   point buffer.
//! - **Live** (`frequency`, `amplitude`, `radius`, `strength`): uploaded as
//!   shader uniforms every frame, never touch the buffer.
//!
//! Comparing two bundles with [`WaveParams::diff`] reports which group changed.
//!
//! # Presets
//!
//! ```ignore
//! let params = WaveParams::load("presets/ripple.json")?;
//! ```
//!
//! Any field missing from the JSON falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of a particle wave field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    /// Particles along the X axis.
    pub width: u32,
    /// Particles along the Z axis.
    pub height: u32,
    /// Distance between adjacent grid points.
    pub spread: f32,
    /// Spatial frequency of the wave.
    pub frequency: f32,
    /// Wave displacement magnitude.
    pub amplitude: f32,
    /// Pointer repulsion radius.
    pub radius: f32,
    /// Pointer repulsion strength.
    pub strength: f32,
}

impl WaveParams {
    pub const DEFAULT_FREQUENCY: f32 = 0.3;
    pub const DEFAULT_AMPLITUDE: f32 = 1.2;
    pub const DEFAULT_RADIUS: f32 = 10.0;
    pub const DEFAULT_STRENGTH: f32 = 1.0;

    /// Create parameters for a grid shape, with default wave and repulsion values.
    pub fn new(width: u32, height: u32, spread: f32) -> Self {
        Self {
            width,
            height,
            spread,
            frequency: Self::DEFAULT_FREQUENCY,
            amplitude: Self::DEFAULT_AMPLITUDE,
            radius: Self::DEFAULT_RADIUS,
            strength: Self::DEFAULT_STRENGTH,
        }
    }

    /// Set the wave frequency and amplitude.
    pub fn with_wave(mut self, frequency: f32, amplitude: f32) -> Self {
        self.frequency = frequency;
        self.amplitude = amplitude;
        self
    }

    /// Set the pointer repulsion radius and strength.
    pub fn with_repulsion(mut self, radius: f32, strength: f32) -> Self {
        self.radius = radius;
        self.strength = strength;
        self
    }

    /// Number of particles in a grid of this shape.
    pub fn particle_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Read a single parameter as `f32`.
    pub fn get(&self, key: ParamKey) -> f32 {
        match key {
            ParamKey::Frequency => self.frequency,
            ParamKey::Amplitude => self.amplitude,
            ParamKey::Width => self.width as f32,
            ParamKey::Height => self.height as f32,
            ParamKey::Spread => self.spread,
            ParamKey::Radius => self.radius,
            ParamKey::Strength => self.strength,
        }
    }

    /// Compare against `other` (the incoming values).
    ///
    /// Uses `!=` per field, so a NaN on either side always reports a change.
    pub fn diff(&self, other: &WaveParams) -> ParamsDiff {
        let shape_changed = self.width != other.width
            || self.height != other.height
            || self.spread != other.spread;

        let mut live = Vec::new();
        if self.frequency != other.frequency {
            live.push(LiveChange::Frequency(other.frequency));
        }
        if self.amplitude != other.amplitude {
            live.push(LiveChange::Amplitude(other.amplitude));
        }
        if self.radius != other.radius {
            live.push(LiveChange::Radius(other.radius));
        }
        if self.strength != other.strength {
            live.push(LiveChange::Strength(other.strength));
        }

        ParamsDiff { shape_changed, live }
    }

    /// Parse a JSON preset.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON preset from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize as a pretty-printed JSON preset.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for WaveParams {
    fn default() -> Self {
        Self::new(100, 100, 5.0)
    }
}

/// How a control's text is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Parsed as a float.
    Float,
    /// Parsed as a number and truncated toward zero.
    Integer,
}

/// The seven field parameters, keyed by their stable control names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Frequency,
    Amplitude,
    Width,
    Height,
    Spread,
    Radius,
    Strength,
}

impl ParamKey {
    /// All keys in control-panel order.
    pub const ALL: [ParamKey; 7] = [
        ParamKey::Frequency,
        ParamKey::Amplitude,
        ParamKey::Width,
        ParamKey::Height,
        ParamKey::Spread,
        ParamKey::Radius,
        ParamKey::Strength,
    ];

    /// Stable control key.
    pub fn key(self) -> &'static str {
        match self {
            ParamKey::Frequency => "freq",
            ParamKey::Amplitude => "amp",
            ParamKey::Width => "width",
            ParamKey::Height => "height",
            ParamKey::Spread => "spread",
            ParamKey::Radius => "radius",
            ParamKey::Strength => "strength",
        }
    }

    /// Look up a key by its control name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }

    /// Human-readable label for the control panel.
    pub fn label(self) -> &'static str {
        match self {
            ParamKey::Frequency => "Frequency",
            ParamKey::Amplitude => "Amplitude",
            ParamKey::Width => "Width",
            ParamKey::Height => "Height",
            ParamKey::Spread => "Spread",
            ParamKey::Radius => "Radius",
            ParamKey::Strength => "Strength",
        }
    }

    pub fn kind(self) -> ParamKind {
        match self {
            ParamKey::Frequency | ParamKey::Amplitude => ParamKind::Float,
            _ => ParamKind::Integer,
        }
    }

    /// Whether changing this parameter regenerates the point buffer.
    pub fn is_shape(self) -> bool {
        matches!(self, ParamKey::Width | ParamKey::Height | ParamKey::Spread)
    }
}

/// Result of comparing two [`WaveParams`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamsDiff {
    /// Width, height or spread changed; the point buffer must be rebuilt.
    pub shape_changed: bool,
    /// Changes that only touch shader uniforms.
    pub live: Vec<LiveChange>,
}

impl ParamsDiff {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        !self.shape_changed && self.live.is_empty()
    }
}

/// A parameter change applied through uniforms, without a rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveChange {
    Frequency(f32),
    Amplitude(f32),
    Radius(f32),
    Strength(f32),
}
