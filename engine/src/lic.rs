//! Line integral convolution (LIC) texture synthesis.
//!
//! For every output pixel a short bidirectional streamline is traced from the
//! pixel centre and the noise texture is averaged along its integration points.
//! Pixels are independent, so rows are synthesized in parallel; each task writes
//! only its own row and reads the field and noise immutably.
//!
//! Layout: row `i` follows world y and column `j` world x, so image coordinate
//! `(x, y)` of the result is `(j, i)`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use flowtex_geo::{Bounds, PixelGrid};
use rayon::prelude::*;

use crate::field::VectorField;
use crate::noise::NoiseTexture;
use crate::streamline::{Direction, Rk4Tracer, StreamlineIntegrator, TraceParams};

/// Default raster resolution.
pub const DEFAULT_RESOLUTION: usize = 256;
/// Default divisor: integration length is the field width over this value.
pub const DEFAULT_LENGTH_DIVISOR: f64 = 40.0;
/// Step cap per direction; the arc-length limit normally ends a trace far earlier.
const MAX_STEPS_PER_DIRECTION: usize = 4096;

/// Errors raised before or during synthesis.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LicError {
    /// Resolution of zero.
    #[error("resolution must be at least 1")]
    ZeroResolution,
    /// Integration length is not a positive finite number.
    #[error("integration length must be positive and finite, got {0}")]
    BadIntegrationLength(f64),
    /// Step is not a positive finite number.
    #[error("integration step must be positive and finite, got {0}")]
    BadStep(f64),
    /// Field bounds have no planar area.
    #[error("field bounds have no area: {0:?}")]
    DegenerateBounds([f64; 6]),
    /// Noise texture does not match the output resolution.
    #[error("noise texture is {noise}x{noise} but output is {resolution}x{resolution}")]
    NoiseMismatch {
        /// Side of the noise texture
        noise: usize,
        /// Requested output side
        resolution: usize,
    },
    /// A cancel token was raised mid-pass.
    #[error("synthesis cancelled")]
    Cancelled,
}

/// Synthesis parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LicParams {
    /// Output is `resolution x resolution`.
    pub resolution: usize,
    /// Maximum propagation per direction (world units).
    pub integration_length: f64,
    /// Integration step; defaults to the sample spacing `(xmax - xmin) / (R - 1)`.
    pub step: Option<f64>,
}

impl LicParams {
    /// Parameters with the default step.
    pub fn new(resolution: usize, integration_length: f64) -> Self {
        Self { resolution, integration_length, step: None }
    }

    /// Integration length as a fraction of the field width: `width / divisor`.
    pub fn from_width_divisor(bounds: &Bounds, resolution: usize, divisor: f64) -> Self {
        Self::new(resolution, bounds.width() / divisor)
    }

    fn validate(&self, bounds: &Bounds) -> Result<(), LicError> {
        if self.resolution == 0 {
            return Err(LicError::ZeroResolution);
        }
        if !(self.integration_length.is_finite() && self.integration_length > 0.0) {
            return Err(LicError::BadIntegrationLength(self.integration_length));
        }
        if let Some(h) = self.step {
            if !(h.is_finite() && h > 0.0) {
                return Err(LicError::BadStep(h));
            }
        }
        if !bounds.has_area() {
            return Err(LicError::DegenerateBounds(bounds.to_array()));
        }
        Ok(())
    }

    fn trace_params(&self, grid: &PixelGrid) -> TraceParams {
        TraceParams {
            max_length: self.integration_length,
            initial_step: self.step.unwrap_or_else(|| grid.spacing_x()),
            direction: Direction::Both,
            max_steps: MAX_STEPS_PER_DIRECTION,
            ..TraceParams::default()
        }
    }
}

/// Cooperative cancellation flag shared with an interactive caller.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask running passes to stop at the next row.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Grayscale LIC result; every channel of a pixel carries the same intensity.
#[derive(Clone, Debug, PartialEq)]
pub struct LicImage {
    resolution: usize,
    bounds: Bounds,
    values: Vec<f32>,
}

impl LicImage {
    /// Side length in pixels.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// World bounds the raster covers.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Intensity at row `i` (y), column `j` (x), in [0, 255].
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.resolution + j]
    }

    /// Intensity at image coordinate `(x, y)`, i.e. row `y`, column `x`.
    pub fn pixel(&self, x: usize, y: usize) -> f32 {
        self.get(y, x)
    }

    /// RGB triple of identical channels, truncated to 8 bits.
    pub fn rgb(&self, i: usize, j: usize) -> [u8; 3] {
        let v = self.get(i, j) as u8;
        [v, v, v]
    }

    /// Row-major intensities.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Interleaved 8-bit RGB, row-major from row 0 (world `ymin`).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.values.iter().flat_map(|&v| [v as u8; 3]).collect()
    }
}

/// Synthesize with the reference RK4 tracer and fresh noise seeded from `noise_seed`.
pub fn synthesize(field: &dyn VectorField, params: &LicParams, noise_seed: u64) -> Result<LicImage, LicError> {
    let noise = NoiseTexture::from_seed(params.resolution, noise_seed);
    compute(field, &Rk4Tracer, &noise, params)
}

/// Synthesize a LIC image for `field` over its bounds.
pub fn compute(
    field: &dyn VectorField,
    integrator: &dyn StreamlineIntegrator,
    noise: &NoiseTexture,
    params: &LicParams,
) -> Result<LicImage, LicError> {
    compute_cancellable(field, integrator, noise, params, &CancelToken::new())
}

/// [`compute`], checking `cancel` before each row.
pub fn compute_cancellable(
    field: &dyn VectorField,
    integrator: &dyn StreamlineIntegrator,
    noise: &NoiseTexture,
    params: &LicParams,
    cancel: &CancelToken,
) -> Result<LicImage, LicError> {
    let bounds = field.bounds();
    params.validate(&bounds)?;
    let r = params.resolution;
    if noise.resolution() != r {
        return Err(LicError::NoiseMismatch { noise: noise.resolution(), resolution: r });
    }
    let grid = PixelGrid::new(bounds, r);
    let trace = params.trace_params(&grid);
    let t0 = Instant::now();

    let mut values = vec![0.0f32; r * r];
    values.par_chunks_mut(r).enumerate().try_for_each(|(i, row)| {
        if cancel.is_cancelled() {
            return Err(LicError::Cancelled);
        }
        for (j, out) in row.iter_mut().enumerate() {
            *out = convolve(field, integrator, noise, &grid, &trace, i, j);
        }
        Ok(())
    })?;

    tracing::debug!(
        resolution = r,
        step = trace.initial_step,
        length = trace.max_length,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "lic pass complete"
    );
    Ok(LicImage { resolution: r, bounds, values })
}

/// Noise pixels `(row, column)` sampled by output pixel `(i, j)`, in streamline order.
pub fn pixel_footprint(
    field: &dyn VectorField,
    integrator: &dyn StreamlineIntegrator,
    params: &LicParams,
    i: usize,
    j: usize,
) -> Result<Vec<(usize, usize)>, LicError> {
    let bounds = field.bounds();
    params.validate(&bounds)?;
    let grid = PixelGrid::new(bounds, params.resolution);
    let trace = params.trace_params(&grid);
    let line = integrator.trace(field, grid.center(i, j), &trace);
    Ok(line.iter().filter_map(|&p| grid.locate(p)).collect())
}

fn convolve(
    field: &dyn VectorField,
    integrator: &dyn StreamlineIntegrator,
    noise: &NoiseTexture,
    grid: &PixelGrid,
    trace: &TraceParams,
    i: usize,
    j: usize,
) -> f32 {
    let line = integrator.trace(field, grid.center(i, j), trace);
    // A lone seed point carries no flow information.
    if line.len() <= 1 {
        return 0.0;
    }
    let mut sum = 0u64;
    for &p in &line {
        if let Some((fi, fj)) = grid.locate(p) {
            sum += u64::from(noise.get(fi, fj));
        }
    }
    (sum as f64 / line.len() as f64) as f32
}
