//! Exact pixel <-> world mapping for square rasters laid over planar bounds.
//!
//! Row `i` runs along world y and column `j` along world x. Row 0 sits at `ymin`,
//! so a top-down image format has to flip rows when it stores the raster.

use crate::math::{Bounds, Vec3, EPS_PIXEL};

/// A square raster of `resolution x resolution` pixels covering `bounds`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelGrid {
    pub bounds: Bounds,
    pub resolution: usize,
}

impl PixelGrid {
    #[must_use]
    pub const fn new(bounds: Bounds, resolution: usize) -> Self {
        Self { bounds, resolution }
    }

    /// World position of the centre of pixel (row `i`, column `j`).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center(&self, i: usize, j: usize) -> Vec3 {
        let r = self.resolution as f64;
        let u = (j as f64 + 0.5) / r;
        let v = (i as f64 + 0.5) / r;
        self.bounds.lerp_xy(u, v)
    }

    /// Fractional (row, column) of a world point, aligned so pixel centres land on integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fractional(&self, p: Vec3) -> (f64, f64) {
        let r = self.resolution as f64;
        let b = &self.bounds;
        let fj = r * ((p.x - b.xmin) / (b.xmax - b.xmin)) - 0.5;
        let fi = r * ((p.y - b.ymin) / (b.ymax - b.ymin)) - 0.5;
        (fi, fj)
    }

    /// Integer (row, column) of a world point, floored and clamped into the raster.
    ///
    /// Returns `None` for non-finite coordinates.
    #[must_use]
    pub fn locate(&self, p: Vec3) -> Option<(usize, usize)> {
        let (fi, fj) = self.fractional(p);
        Some((self.snap(fi)?, self.snap(fj)?))
    }

    /// Spacing between neighbouring sample columns, `(xmax - xmin) / (R - 1)`.
    ///
    /// A single-pixel raster reports the full width.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spacing_x(&self) -> f64 {
        if self.resolution > 1 {
            self.bounds.width() / (self.resolution - 1) as f64
        } else {
            self.bounds.width()
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn snap(&self, f: f64) -> Option<usize> {
        if !f.is_finite() {
            return None;
        }
        let max = self.resolution.saturating_sub(1);
        let k = (f + EPS_PIXEL).floor();
        if k <= 0.0 {
            Some(0)
        } else if k >= max as f64 {
            Some(max)
        } else {
            Some(k as usize)
        }
    }
}
