#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]

mod math;
pub mod pixel;

pub use math::{lerp, Bounds, Vec3, EPS_PIXEL};
pub use pixel::PixelGrid;
