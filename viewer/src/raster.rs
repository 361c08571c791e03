//! CPU rasterisation of LIC and scalar data into RGB pixel buffers.
//!
//! Engine rasters keep row 0 at world `ymin`; image buffers are top-down, so
//! every function here writes raster row `i` to image row `R - 1 - i`.

use flowtex_engine::colormap::LookupTable;
use flowtex_engine::field::ScalarField;
use flowtex_engine::lic::LicImage;
use flowtex_geo::PixelGrid;
use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Errors from building a pixel buffer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("raster side {0} does not fit an image buffer")]
    TooLarge(usize),
    #[error("image size must be non-zero")]
    Empty,
}

fn side(resolution: usize) -> Result<u32, RasterError> {
    match u32::try_from(resolution) {
        Ok(0) => Err(RasterError::Empty),
        Ok(s) => Ok(s),
        Err(_) => Err(RasterError::TooLarge(resolution)),
    }
}

#[inline]
fn unit_to_u8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Grayscale LIC image as RGB, world `ymax` on top.
pub fn lic_to_image(lic: &LicImage) -> Result<RgbImage, RasterError> {
    let r = lic.resolution();
    let s = side(r)?;
    let mut img = RgbImage::new(s, s);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let i = r - 1 - y as usize;
        *px = Rgb(lic.rgb(i, x as usize));
    }
    Ok(img)
}

/// Scalar attribute pseudocoloured through `lut`, sampled at pixel centres of `grid`.
///
/// Pixels where the attribute is undefined stay black.
pub fn scalar_to_image(field: &dyn ScalarField, grid: &PixelGrid, lut: &LookupTable) -> Result<RgbImage, RasterError> {
    let r = grid.resolution;
    let s = side(r)?;
    let range = field.scalar_range();
    let mut img = RgbImage::new(s, s);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let i = r - 1 - y as usize;
        if let Some(v) = field.sample_scalar(grid.center(i, x as usize)) {
            let [cr, cg, cb, _] = lut.map(v, range);
            *px = Rgb([unit_to_u8(f64::from(cr)), unit_to_u8(f64::from(cg)), unit_to_u8(f64::from(cb))]);
        }
    }
    Ok(img)
}

/// LIC intensity modulating the LUT colour of a scalar attribute.
///
/// Each channel is `colour * lic / 255`; pixels without a scalar fall back to the plain LIC gray.
pub fn blend(lic: &LicImage, field: &dyn ScalarField, lut: &LookupTable) -> Result<RgbImage, RasterError> {
    let r = lic.resolution();
    let s = side(r)?;
    let grid = PixelGrid::new(lic.bounds(), r);
    let range = field.scalar_range();
    let mut img = RgbImage::new(s, s);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let i = r - 1 - y as usize;
        let j = x as usize;
        let gray = f64::from(lic.get(i, j)) / 255.0;
        *px = match field.sample_scalar(grid.center(i, j)) {
            Some(v) => {
                let c = lut.map(v, range);
                Rgb([0usize, 1, 2].map(|k| unit_to_u8(f64::from(c[k]) * gray)))
            }
            None => Rgb(lic.rgb(i, j)),
        };
    }
    Ok(img)
}

/// Horizontal colour bar of `lut`, low values on the left.
pub fn lut_strip(lut: &LookupTable, width: u32, height: u32) -> Result<RgbaImage, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::Empty);
    }
    let table = lut.to_rgba8();
    let mut img = RgbaImage::new(width, height);
    for (x, _, px) in img.enumerate_pixels_mut() {
        let t = (f64::from(x) + 0.5) / f64::from(width);
        *px = Rgba(table[lut.index_of(t)]);
    }
    Ok(img)
}
