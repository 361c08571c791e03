//! Colour lookup tables built from HSV ramps.
//!
//! Three schemes are supported: an HSV rainbow (blue → red), a diverging
//! blue-white-red map and a three-channel heatmap (black → red → yellow → white).
//! Tables are immutable values; switching scheme builds a new table.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::scalar::ScalarRange;

/// Default number of table entries.
pub const DEFAULT_TABLE_SIZE: usize = 1024;

/// Colour scheme selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// Hue 240° → 0° at full saturation and value.
    Rainbow,
    /// Blue (240°) fading to white at the midpoint, then white to red (0°).
    #[serde(alias = "diverging")]
    DivergingBlueWhiteRed,
    /// Red, then green, then blue ramped in successive thirds.
    Heatmap,
}

impl ColorScheme {
    /// All schemes in selector order.
    pub const ALL: [ColorScheme; 3] =
        [ColorScheme::Rainbow, ColorScheme::DivergingBlueWhiteRed, ColorScheme::Heatmap];

    /// Map a numeric selector (0, 1, 2) to a scheme.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(ColorScheme::Rainbow),
            1 => Some(ColorScheme::DivergingBlueWhiteRed),
            2 => Some(ColorScheme::Heatmap),
            _ => None,
        }
    }

    /// Numeric selector of this scheme.
    pub fn index(self) -> u32 {
        match self {
            ColorScheme::Rainbow => 0,
            ColorScheme::DivergingBlueWhiteRed => 1,
            ColorScheme::Heatmap => 2,
        }
    }

    /// Short name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::DivergingBlueWhiteRed => "diverging",
            ColorScheme::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised scheme name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown colour scheme '{0}' (expected rainbow, diverging or heatmap)")]
pub struct UnknownScheme(pub String);

impl FromStr for ColorScheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rainbow" => Ok(ColorScheme::Rainbow),
            "diverging" | "diverging-blue-white-red" | "blue-white-red" | "bwr" => {
                Ok(ColorScheme::DivergingBlueWhiteRed)
            }
            "heatmap" | "heat" => Ok(ColorScheme::Heatmap),
            other => Err(UnknownScheme(other.to_string())),
        }
    }
}

/// A discretized RGBA lookup table. Entry `i` represents normalised scalar `i / len`.
#[derive(Clone, Debug, PartialEq)]
pub struct LookupTable {
    scheme: ColorScheme,
    entries: Vec<[f32; 4]>,
}

impl LookupTable {
    /// Build a table of `n` entries for `scheme`. `n` below 2 is raised to 2.
    pub fn build(scheme: ColorScheme, n: usize) -> Self {
        let n = n.max(2);
        let entries = match scheme {
            ColorScheme::Rainbow => rainbow(n),
            ColorScheme::DivergingBlueWhiteRed => diverging(n),
            ColorScheme::Heatmap => heatmap(n),
        };
        Self { scheme, entries }
    }

    /// Rebuild for a numeric selector, keeping the table unchanged when the selector is unknown.
    pub fn select(self, selector: u32) -> Self {
        match ColorScheme::from_index(selector) {
            Some(scheme) if scheme == self.scheme => self,
            Some(scheme) => Self::build(scheme, self.entries.len()),
            None => {
                tracing::warn!(selector, current = %self.scheme, "ignoring unknown colour scheme selector");
                self
            }
        }
    }

    /// Scheme the table was built for.
    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; tables hold at least two entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// RGBA entries in [0,1], low scalar values first.
    pub fn entries(&self) -> &[[f32; 4]] {
        &self.entries
    }

    /// Entry `i`, if in range.
    pub fn entry(&self, i: usize) -> Option<[f32; 4]> {
        self.entries.get(i).copied()
    }

    /// Table index for a normalised position `t` in [0,1] (clamped).
    pub fn index_of(&self, t: f64) -> usize {
        let n = self.entries.len();
        if !t.is_finite() || t <= 0.0 {
            return 0;
        }
        let k = (t * n as f64).floor() as usize;
        k.min(n - 1)
    }

    /// Colour for a scalar value mapped through `range` (the mapper's scalar range).
    pub fn map(&self, value: f64, range: ScalarRange) -> [f32; 4] {
        self.entries[self.index_of(range.normalize(value))]
    }

    /// 8-bit RGBA rows, one per entry.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.entries.iter().map(|c| c.map(unit_to_u8)).collect()
    }

    /// Raw little-endian f32 bytes of the table, ready for a 1D texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries)
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::build(ColorScheme::Rainbow, DEFAULT_TABLE_SIZE)
    }
}

#[inline]
fn unit_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn position(i: usize, n: usize) -> f32 {
    i as f32 / n as f32
}

fn rainbow(n: usize) -> Vec<[f32; 4]> {
    (0..n)
        .map(|i| {
            let s = position(i, n);
            let [r, g, b] = hsv_to_rgb(240.0 - 240.0 * s, 1.0, 1.0);
            [r, g, b, 1.0]
        })
        .collect()
}

fn diverging(n: usize) -> Vec<[f32; 4]> {
    let half = n / 2;
    (0..n)
        .map(|i| {
            let s = position(i, n);
            let [r, g, b] = if i < half {
                hsv_to_rgb(240.0, 1.0 - 2.0 * s, 1.0)
            } else {
                hsv_to_rgb(0.0, 2.0 * s - 1.0, 1.0)
            };
            [r, g, b, 1.0]
        })
        .collect()
}

fn heatmap(n: usize) -> Vec<[f32; 4]> {
    let first = n / 3;
    let second = (n as f64 * (2.0 / 3.0)) as usize;
    let segments = [(0..first, 3.0f32), (first..second, 1.5), (second..n, 1.0)];

    let mut entries = Vec::with_capacity(n);
    // Running RGB state: each segment ramps its own channel and hands the rest forward.
    let mut rgb = [0.0f32; 3];
    for (channel, (range, gain)) in segments.into_iter().enumerate() {
        for i in range {
            rgb[channel] = (gain * position(i, n)).min(1.0);
            entries.push([rgb[0], rgb[1], rgb[2], 1.0]);
        }
        rgb[channel] = 1.0;
    }
    entries
}

/// Convert HSV to RGB.
///
/// `h` is in degrees and wrapped into [0, 360); non-finite hues are treated as 0. `s` and `v`
/// are clamped to [0,1]. Zero saturation yields the gray `(v, v, v)` for any hue.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let mut h = h / 60.0;
    if !h.is_finite() {
        h = 0.0;
    }
    // Stepping by 6 stalls once the spacing of f32 exceeds 6.
    if h.abs() >= 12.0 {
        h = h.rem_euclid(6.0);
    }
    while h >= 6.0 {
        h -= 6.0;
    }
    while h < 0.0 {
        h += 6.0;
    }
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    if s == 0.0 {
        return [v, v, v];
    }

    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match i as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
