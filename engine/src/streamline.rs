//! Streamline tracing through a [`VectorField`].
//!
//! The integrator trait is the seam to an external tracer. [`Rk4Tracer`] is a
//! fixed-step reference implementation that walks the normalised direction
//! field, so step size and maximum propagation are both arc lengths.

use flowtex_geo::Vec3;
use rayon::prelude::*;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::field::VectorField;
use crate::seeds::SeedSet;

/// Ordered integration points. Short LIC streamlines stay on the stack.
pub type Polyline = SmallVec<[Vec3; 64]>;

/// Integration direction relative to the velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Downstream only
    Forward,
    /// Upstream only
    Backward,
    /// Upstream and downstream, joined at the seed
    #[default]
    Both,
}

/// Parameters for a single trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceParams {
    /// Maximum arc length per direction.
    pub max_length: f64,
    /// Step length.
    pub initial_step: f64,
    /// Which way(s) to integrate.
    pub direction: Direction,
    /// Hard cap on steps per direction.
    pub max_steps: usize,
    /// Speeds below this count as stagnation.
    pub terminal_speed: f64,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            max_length: 1.0,
            initial_step: 0.01,
            direction: Direction::Both,
            max_steps: 2000,
            terminal_speed: 1.0e-12,
        }
    }
}

/// Something that turns a start point into an ordered polyline.
pub trait StreamlineIntegrator: Send + Sync {
    /// Trace from `start`. An empty polyline means the seed could not be integrated.
    fn trace(&self, field: &dyn VectorField, start: Vec3, params: &TraceParams) -> Polyline;
}

/// Classic fourth-order Runge-Kutta on the unit direction field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rk4Tracer;

impl Rk4Tracer {
    fn direction_at(field: &dyn VectorField, p: Vec3, sign: f64, terminal_speed: f64) -> Option<Vec3> {
        let v = field.sample(p)?;
        let speed = v.length();
        if !speed.is_finite() || speed <= terminal_speed {
            return None;
        }
        Some(v.mul(sign / speed))
    }

    fn step(field: &dyn VectorField, p: Vec3, h: f64, sign: f64, eps: f64) -> Option<Vec3> {
        let k1 = Self::direction_at(field, p, sign, eps)?;
        let k2 = Self::direction_at(field, p.add(k1.mul(0.5 * h)), sign, eps)?;
        let k3 = Self::direction_at(field, p.add(k2.mul(0.5 * h)), sign, eps)?;
        let k4 = Self::direction_at(field, p.add(k3.mul(h)), sign, eps)?;
        let sum = k1.add(k2.mul(2.0)).add(k3.mul(2.0)).add(k4);
        Some(p.add(sum.mul(h / 6.0)))
    }

    /// Points after `start` in one direction; `start` itself is not included.
    fn march(field: &dyn VectorField, start: Vec3, sign: f64, params: &TraceParams, out: &mut Polyline) {
        let h = params.initial_step;
        let mut p = start;
        let mut travelled = 0.0;
        for _ in 0..params.max_steps {
            let Some(next) = Self::step(field, p, h, sign, params.terminal_speed) else {
                break;
            };
            if !field.bounds().contains_xy(next) {
                break;
            }
            let seg = next.sub(p).length();
            if seg <= 0.0 || travelled + seg > params.max_length {
                break;
            }
            travelled += seg;
            out.push(next);
            p = next;
        }
    }
}

impl StreamlineIntegrator for Rk4Tracer {
    fn trace(&self, field: &dyn VectorField, start: Vec3, params: &TraceParams) -> Polyline {
        let mut line = Polyline::new();
        let usable = params.initial_step.is_finite()
            && params.initial_step > 0.0
            && params.max_length.is_finite()
            && params.max_length > 0.0;
        if !usable || Self::direction_at(field, start, 1.0, params.terminal_speed).is_none() {
            return line;
        }

        if matches!(params.direction, Direction::Backward | Direction::Both) {
            Self::march(field, start, -1.0, params, &mut line);
            line.reverse();
        }
        line.push(start);
        if matches!(params.direction, Direction::Forward | Direction::Both) {
            Self::march(field, start, 1.0, params, &mut line);
        }
        line
    }
}

/// Trace every seed in parallel; output order matches `seeds`.
pub fn trace_all(
    field: &dyn VectorField,
    integrator: &dyn StreamlineIntegrator,
    seeds: &SeedSet,
    params: &TraceParams,
) -> Vec<Polyline> {
    tracing::trace!(seeds = seeds.len(), "tracing streamlines");
    seeds.points.par_iter().map(|&s| integrator.trace(field, s, params)).collect()
}

/// Arc length of a polyline.
pub fn arc_length(line: &[Vec3]) -> f64 {
    line.windows(2).map(|w| w[1].sub(w[0]).length()).sum()
}

/// Raw vertex bytes (three f64 per point) for a renderer's line buffer.
pub fn vertex_bytes(line: &[Vec3]) -> &[u8] {
    bytemuck::cast_slice(line)
}
