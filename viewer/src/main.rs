//! Flowtex command-line driver.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flowtex_engine::colormap::{ColorScheme, LookupTable};
use flowtex_engine::config::VizConfig;
use flowtex_engine::field::{GridField, SaddleField, UniformField, VectorField, VortexField};
use flowtex_engine::glyph;
use flowtex_engine::lic::{self, LicParams};
use flowtex_engine::seeds::{SeedSet, SeedStrategy};
use flowtex_engine::streamline::{self, Rk4Tracer};
use flowtex_geo::{Bounds, Vec3};
use flowtex_viewer::{export, logging, raster};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Resolution of the lattice the blend attribute is resampled on.
const BLEND_GRID: usize = 64;

#[derive(Parser, Debug)]
#[command(name = "flowtex", version, about = "LIC textures, streamline seeds and colour tables")]
struct Cli {
    /// TOML configuration; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize a LIC texture and write it as PNG
    Lic(LicArgs),
    /// Build a colour lookup table and write it as CSV
    Lut(LutArgs),
    /// Generate streamline seeds and write them as CSV
    Seeds(SeedArgs),
    /// Trace streamlines from generated seeds and write them as CSV
    Streamlines(StreamlineArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldKind {
    Vortex,
    Saddle,
    Uniform,
    Zero,
}

#[derive(Args, Debug)]
struct FieldArgs {
    /// Analytic field to visualise
    #[arg(long, value_enum, default_value_t = FieldKind::Vortex)]
    field: FieldKind,
    /// Field bounds as xmin,xmax,ymin,ymax
    #[arg(long, value_parser = parse_bounds, default_value = "-1,1,-1,1", allow_hyphen_values = true)]
    bounds: Bounds,
}

impl FieldArgs {
    fn build(&self) -> Box<dyn VectorField> {
        let b = self.bounds;
        match self.field {
            FieldKind::Vortex => Box::new(VortexField::centered(b)),
            FieldKind::Saddle => Box::new(SaddleField::centered(b)),
            FieldKind::Uniform => Box::new(UniformField::new(b, Vec3::planar(1.0, 0.0))),
            FieldKind::Zero => Box::new(UniformField::zero(b)),
        }
    }
}

#[derive(Args, Debug)]
struct LicArgs {
    #[command(flatten)]
    field: FieldArgs,
    /// Output raster side in pixels
    #[arg(long)]
    resolution: Option<usize>,
    /// Integration length is the field width over this divisor
    #[arg(long)]
    divisor: Option<f64>,
    /// Noise seed
    #[arg(long)]
    seed: Option<u64>,
    /// Colour the texture by speed through this scheme
    #[arg(long)]
    blend: Option<ColorScheme>,
    #[arg(long, default_value = "lic.png")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct LutArgs {
    #[arg(long)]
    scheme: Option<ColorScheme>,
    /// Number of table entries
    #[arg(long)]
    size: Option<usize>,
    #[arg(long, default_value = "lut.csv")]
    out: PathBuf,
    /// Also write a colour bar image
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SeedArgs {
    #[arg(long, value_parser = parse_bounds, default_value = "-1,1,-1,1", allow_hyphen_values = true)]
    bounds: Bounds,
    #[arg(long)]
    strategy: Option<SeedStrategy>,
    /// Seeds per axis
    #[arg(long)]
    count: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "seeds.csv")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct StreamlineArgs {
    #[command(flatten)]
    field: FieldArgs,
    #[arg(long)]
    strategy: Option<SeedStrategy>,
    #[arg(long)]
    count: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "lines.csv")]
    out: PathBuf,
    /// Also write masked arrow glyphs at the seeds
    #[arg(long)]
    arrows: Option<PathBuf>,
}

fn parse_bounds(s: &str) -> Result<Bounds, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|t| t.trim().parse::<f64>().map_err(|e| format!("'{t}': {e}")))
        .collect::<Result<_, _>>()?;
    let &[xmin, xmax, ymin, ymax] = parts.as_slice() else {
        return Err(format!("expected xmin,xmax,ymin,ymax, got {} values", parts.len()));
    };
    let b = Bounds::planar(xmin, xmax, ymin, ymax);
    if !b.has_area() {
        return Err(format!("bounds {s} have no area"));
    }
    Ok(b)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing()?;
    let mut cfg = match &cli.config {
        Some(path) => VizConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => VizConfig::default(),
    };
    tracing::debug!(command = ?cli.command, "flowtex v{}", flowtex_engine::version());

    match cli.command {
        Command::Lic(args) => run_lic(&mut cfg, args),
        Command::Lut(args) => run_lut(&mut cfg, args),
        Command::Seeds(args) => run_seeds(&mut cfg, args),
        Command::Streamlines(args) => run_streamlines(&mut cfg, args),
    }
}

fn run_lic(cfg: &mut VizConfig, args: LicArgs) -> Result<()> {
    if let Some(r) = args.resolution {
        cfg.lic.resolution = r;
    }
    if let Some(d) = args.divisor {
        cfg.lic.length_divisor = d;
    }
    if let Some(s) = args.seed {
        cfg.lic.noise_seed = s;
    }
    cfg.validate()?;

    let field = args.field.build();
    let bounds = field.bounds();
    let params = LicParams::from_width_divisor(&bounds, cfg.lic.resolution, cfg.lic.length_divisor);
    let img = lic::synthesize(field.as_ref(), &params, cfg.lic.noise_seed).context("LIC synthesis failed")?;

    let rgb = match args.blend {
        Some(scheme) => {
            let lut = LookupTable::build(scheme, cfg.colormap.table_size);
            let speed = GridField::resample(field.as_ref(), BLEND_GRID, BLEND_GRID)?;
            raster::blend(&img, &speed, &lut)?
        }
        None => raster::lic_to_image(&img)?,
    };
    export::save_png(&rgb, &args.out).with_context(|| format!("writing {}", args.out.display()))?;
    tracing::info!(out = %args.out.display(), resolution = cfg.lic.resolution, "wrote LIC image");
    Ok(())
}

fn run_lut(cfg: &mut VizConfig, args: LutArgs) -> Result<()> {
    if let Some(s) = args.scheme {
        cfg.colormap.scheme = s;
    }
    if let Some(n) = args.size {
        cfg.colormap.table_size = n;
    }
    cfg.validate()?;

    let lut = LookupTable::build(cfg.colormap.scheme, cfg.colormap.table_size);
    let out = export::create(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    export::write_lut_csv(out, &lut)?;
    if let Some(png) = &args.png {
        let strip = raster::lut_strip(&lut, 512, 32)?;
        export::save_png(&strip, png).with_context(|| format!("writing {}", png.display()))?;
    }
    tracing::info!(out = %args.out.display(), scheme = %lut.scheme(), entries = lut.len(), "wrote lookup table");
    Ok(())
}

fn apply_seed_overrides(
    cfg: &mut VizConfig,
    strategy: Option<SeedStrategy>,
    count: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    if let Some(s) = strategy {
        cfg.seeds.strategy = s;
    }
    if let Some(k) = count {
        cfg.seeds.count = k;
    }
    if let Some(s) = seed {
        cfg.seeds.rng_seed = s;
    }
    cfg.validate()?;
    Ok(())
}

fn generate_seeds(cfg: &VizConfig, bounds: &Bounds) -> Result<SeedSet> {
    Ok(cfg.seeds.strategy.generate(cfg.seeds.count, bounds, cfg.seeds.rng_seed)?)
}

fn run_seeds(cfg: &mut VizConfig, args: SeedArgs) -> Result<()> {
    apply_seed_overrides(cfg, args.strategy, args.count, args.seed)?;
    let seeds = generate_seeds(cfg, &args.bounds)?;
    let out = export::create(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    export::write_points_csv(out, &seeds.points)?;
    tracing::info!(out = %args.out.display(), seeds = seeds.len(), "wrote seeds");
    Ok(())
}

fn run_streamlines(cfg: &mut VizConfig, args: StreamlineArgs) -> Result<()> {
    apply_seed_overrides(cfg, args.strategy, args.count, args.seed)?;
    let field = args.field.build();
    let bounds = field.bounds();
    let seeds = generate_seeds(cfg, &bounds)?;
    let params = cfg.streamline.trace_params(bounds.width());
    let lines = streamline::trace_all(field.as_ref(), &Rk4Tracer, &seeds, &params);

    let out = export::create(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    export::write_polylines_csv(out, &lines)?;
    let traced = lines.iter().filter(|l| l.len() > 1).count();
    tracing::info!(out = %args.out.display(), seeds = seeds.len(), traced, "wrote streamlines");

    if let Some(path) = &args.arrows {
        let mut rng = StdRng::seed_from_u64(cfg.glyph.rng_seed);
        let picked = glyph::mask_points(&seeds.points, cfg.glyph.max_points, &mut rng);
        let arrows = glyph::arrows(field.as_ref(), &picked, cfg.glyph.scale);
        let out = export::create(path).with_context(|| format!("creating {}", path.display()))?;
        export::write_arrows_csv(out, &arrows)?;
        tracing::info!(out = %path.display(), arrows = arrows.len(), "wrote arrow glyphs");
    }
    Ok(())
}
