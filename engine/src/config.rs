//! Configuration for LIC, seeding, tracing, colour mapping and glyphs.
//!
//! Every section has defaults so a TOML file only needs the keys it changes.

use std::path::Path;

use serde::Deserialize;

use crate::colormap::{ColorScheme, DEFAULT_TABLE_SIZE};
use crate::glyph::{DEFAULT_ARROW_SCALE, DEFAULT_MAX_POINTS};
use crate::lic::{DEFAULT_LENGTH_DIVISOR, DEFAULT_RESOLUTION};
use crate::seeds::SeedStrategy;
use crate::streamline::{Direction, TraceParams};

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Wrapper for standard I/O errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed TOML or wrong value types
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of its allowed range
    #[error("invalid {key}: {reason}")]
    Invalid {
        /// Dotted key of the offending value
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// LIC synthesis settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LicConfig {
    /// Output raster is `resolution x resolution`.
    pub resolution: usize,
    /// Integration length is `field width / length_divisor`.
    pub length_divisor: f64,
    /// Seed of the white-noise texture.
    pub noise_seed: u64,
}

impl Default for LicConfig {
    fn default() -> Self {
        Self { resolution: DEFAULT_RESOLUTION, length_divisor: DEFAULT_LENGTH_DIVISOR, noise_seed: 0 }
    }
}

/// Streamline seeding settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// Seeds per axis; `count x count` seeds in total.
    pub count: usize,
    /// Lattice or random placement.
    pub strategy: SeedStrategy,
    /// Seed of the random strategy.
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { count: 10, strategy: SeedStrategy::Uniform, rng_seed: 0 }
    }
}

/// Streamline integration settings for seeded (non-LIC) traces.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamlineConfig {
    /// Maximum arc length per direction, as a fraction of the field width.
    pub max_length_fraction: f64,
    /// Step length as a fraction of the field width.
    pub step_fraction: f64,
    /// Hard cap on steps per direction.
    pub max_steps: usize,
    /// Speeds at or below this end a trace.
    pub terminal_speed: f64,
    /// Which way(s) to integrate from each seed.
    pub direction: Direction,
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            max_length_fraction: 1.0,
            step_fraction: 0.005,
            max_steps: 2000,
            terminal_speed: 1.0e-12,
            direction: Direction::Both,
        }
    }
}

impl StreamlineConfig {
    /// Absolute trace parameters for a field of the given width.
    pub fn trace_params(&self, width: f64) -> TraceParams {
        TraceParams {
            max_length: self.max_length_fraction * width,
            initial_step: self.step_fraction * width,
            direction: self.direction,
            max_steps: self.max_steps,
            terminal_speed: self.terminal_speed,
        }
    }
}

/// Lookup table settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColormapConfig {
    /// Colour scheme of the table.
    pub scheme: ColorScheme,
    /// Number of table entries.
    pub table_size: usize,
}

impl Default for ColormapConfig {
    fn default() -> Self {
        Self { scheme: ColorScheme::Rainbow, table_size: DEFAULT_TABLE_SIZE }
    }
}

/// Arrow glyph settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlyphConfig {
    /// Most arrows drawn; extra points are masked at random.
    pub max_points: usize,
    /// Arrow length per unit speed.
    pub scale: f64,
    /// Seed of the point mask.
    pub rng_seed: u64,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self { max_points: DEFAULT_MAX_POINTS, scale: DEFAULT_ARROW_SCALE, rng_seed: 0 }
    }
}

/// Complete configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VizConfig {
    /// `[lic]`
    pub lic: LicConfig,
    /// `[seeds]`
    pub seeds: SeedConfig,
    /// `[streamline]`
    pub streamline: StreamlineConfig,
    /// `[colormap]`
    pub colormap: ColormapConfig,
    /// `[glyph]`
    pub glyph: GlyphConfig,
}

impl VizConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let cfg: VizConfig = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(key: &'static str, v: f64) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid { key, reason: format!("must be positive and finite, got {v}") })
            }
        }
        if self.lic.resolution == 0 {
            return Err(ConfigError::Invalid { key: "lic.resolution", reason: "must be at least 1".into() });
        }
        positive("lic.length_divisor", self.lic.length_divisor)?;
        if self.seeds.count == 0 {
            return Err(ConfigError::Invalid { key: "seeds.count", reason: "must be at least 1".into() });
        }
        positive("streamline.max_length_fraction", self.streamline.max_length_fraction)?;
        positive("streamline.step_fraction", self.streamline.step_fraction)?;
        if self.colormap.table_size < 2 {
            return Err(ConfigError::Invalid { key: "colormap.table_size", reason: "must be at least 2".into() });
        }
        positive("glyph.scale", self.glyph.scale)?;
        Ok(())
    }
}
