//! File sinks: PNG images and plain CSV tables.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flowtex_engine::colormap::LookupTable;
use flowtex_engine::glyph::Arrow;
use flowtex_geo::Vec3;
use image::{ImageBuffer, Pixel, PixelWithColorType};

/// Errors from writing output files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image encode error: {0}")]
    Image(#[from] image::ImageError),
}

/// Encode any 8-bit image buffer as PNG.
pub fn save_png<P, Q>(img: &ImageBuffer<P, Vec<u8>>, path: Q) -> Result<(), ExportError>
where
    P: Pixel<Subpixel = u8> + PixelWithColorType,
    Q: AsRef<Path>,
{
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// `x,y,z` rows, one per point.
pub fn write_points_csv<W: Write>(mut out: W, points: &[Vec3]) -> std::io::Result<()> {
    writeln!(out, "x,y,z")?;
    for p in points {
        writeln!(out, "{},{},{}", p.x, p.y, p.z)?;
    }
    out.flush()
}

/// `line,x,y,z` rows; `line` is the polyline index. Empty polylines emit nothing.
pub fn write_polylines_csv<W, L>(mut out: W, lines: &[L]) -> std::io::Result<()>
where
    W: Write,
    L: AsRef<[Vec3]>,
{
    writeln!(out, "line,x,y,z")?;
    for (k, line) in lines.iter().enumerate() {
        for p in line.as_ref() {
            writeln!(out, "{k},{},{},{}", p.x, p.y, p.z)?;
        }
    }
    out.flush()
}

/// `index,r,g,b,a` rows with channels in [0,1].
pub fn write_lut_csv<W: Write>(mut out: W, lut: &LookupTable) -> std::io::Result<()> {
    writeln!(out, "index,r,g,b,a")?;
    for (i, [r, g, b, a]) in lut.entries().iter().enumerate() {
        writeln!(out, "{i},{r},{g},{b},{a}")?;
    }
    out.flush()
}

/// `x,y,z,hx,hy,hz` rows: arrow tail then head.
pub fn write_arrows_csv<W: Write>(mut out: W, arrows: &[Arrow]) -> std::io::Result<()> {
    writeln!(out, "x,y,z,hx,hy,hz")?;
    for a in arrows {
        writeln!(out, "{},{},{},{},{},{}", a.tail.x, a.tail.y, a.tail.z, a.head.x, a.head.y, a.head.z)?;
    }
    out.flush()
}

/// Buffered writer for a new file at `path`.
pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}
