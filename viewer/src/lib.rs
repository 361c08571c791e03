//! Flowtex display sink: pixel buffers, file export and logging setup.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod export;
pub mod logging;
pub mod raster;
