//! Flowtex engine: flow visualisation primitives.
//! LIC textures, streamline seeding and tracing, colour lookup tables, arrow glyphs.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod colormap;
pub mod config;
pub mod field;
pub mod glyph;
pub mod lic;
pub mod noise;
pub mod scalar;
pub mod seeds;
pub mod streamline;

/// Returns the engine version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver_like() {
        assert!(version().split('.').count() >= 3);
    }
}
