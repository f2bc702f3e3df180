use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use planegeom::config::{Canvas, EngineConfig};
use planegeom::hull::{convex_hull, convex_hull_area};
use planegeom::io::{write_minkowski_csv, SvgScene};
use planegeom::polygon::ConvexPolygon;
use planegeom::sampling::PointSampler;
use planegeom::session::{measure_minkowski, DelaunaySession, Session};

#[derive(Parser)]
#[command(name = "planegeom")]
#[command(about = "Measure Delaunay, hull and Minkowski costs on random canvas input")]
struct Cmd {
    /// Side of the square working canvas
    #[arg(long, default_value_t = 800.0)]
    canvas: f64,

    /// Margin kept free of random points on every side of the canvas
    #[arg(long, default_value_t = 50.0)]
    inset: f64,

    /// Seed for the point generator
    #[arg(long, default_value_t = 1)]
    seed: u64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Insert random sites one at a time, rebuilding the triangulation each time
    Triangulate {
        #[arg(long, default_value_t = 100)]
        points: usize,
        /// Timing log (`num_points,elapsed_ms`)
        #[arg(long, default_value = "delaunay_timing.csv")]
        out: PathBuf,
        /// Optional SVG of the final triangulation and Voronoi cells
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Convex hull of random points
    Hull {
        #[arg(long, default_value_t = 100)]
        points: usize,
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Minkowski sums of a random subject polygon with random obstacles
    Minkowski {
        #[arg(long, default_value_t = 5)]
        obstacles: usize,
        /// Points sampled per polygon before taking the hull
        #[arg(long, default_value_t = 8)]
        samples: usize,
        #[arg(long, default_value_t = 60.0)]
        radius: f64,
        #[arg(long, default_value = "minkowski_results.csv")]
        out: PathBuf,
        /// Digits after the decimal point in vertex lists
        #[arg(long, default_value_t = 0)]
        decimals: usize,
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let canvas = Canvas::square(cmd.canvas).context("invalid --canvas")?;
    let sampler = PointSampler::new(&canvas, cmd.inset, cmd.seed);

    match cmd.action {
        Action::Triangulate { points, out, svg } => {
            triangulate(canvas, sampler, points, &out, svg.as_deref())
        }
        Action::Hull { points, svg } => hull(canvas, sampler, points, svg.as_deref()),
        Action::Minkowski {
            obstacles,
            samples,
            radius,
            out,
            decimals,
            svg,
        } => minkowski(
            canvas,
            sampler,
            obstacles,
            samples,
            radius,
            &out,
            decimals,
            svg.as_deref(),
        ),
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn triangulate(
    canvas: Canvas<f64>,
    mut sampler: PointSampler<f64>,
    points: usize,
    out: &Path,
    svg: Option<&Path>,
) -> Result<()> {
    let config = EngineConfig::with_canvas(canvas);

    tracing::info!(points, out = %out.display(), "triangulate");
    let mut session = DelaunaySession::new(config);
    session.extend(sampler.points(points));

    let tri = session.triangulation();
    tri.validate().context("triangulation failed validation")?;
    tracing::info!(
        sites = tri.sites().len(),
        triangles = tri.len(),
        total_ms = session.timing().total_ms(),
        "done"
    );

    session.timing().write_csv(create(out)?)?;

    if let Some(path) = svg {
        SvgScene::new(canvas)
            .triangulation(tri)
            .voronoi(&session.voronoi())
            .sites(session.sites(), 2.0)
            .write_to(create(path)?)?;
        tracing::info!(svg = %path.display(), "svg");
    }
    Ok(())
}

fn hull(
    canvas: Canvas<f64>,
    mut sampler: PointSampler<f64>,
    points: usize,
    svg: Option<&Path>,
) -> Result<()> {
    let sites = sampler.points(points);
    let mut session = Session::new("hull");
    let hull = session.time(sites.len(), || convex_hull(&sites));

    tracing::info!(
        points,
        hull_vertices = hull.len(),
        area = convex_hull_area(&hull),
        elapsed_ms = session.total_ms(),
        "hull"
    );

    if let Some(path) = svg {
        SvgScene::new(canvas)
            .hull(&hull)
            .sites(&sites, 2.0)
            .write_to(create(path)?)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn minkowski(
    canvas: Canvas<f64>,
    mut sampler: PointSampler<f64>,
    obstacles: usize,
    samples: usize,
    radius: f64,
    out: &Path,
    decimals: usize,
    svg: Option<&Path>,
) -> Result<()> {
    // Polygon 0 is the subject; the rest are obstacles.
    let polygons: Vec<ConvexPolygon<f64>> = (0..=obstacles)
        .map(|_| sampler.convex_polygon(radius, samples))
        .collect();

    let mut session = Session::new("minkowski");
    let records = measure_minkowski(&mut session, 0, &polygons[0], &polygons);
    tracing::info!(
        obstacles,
        sums = records.len(),
        total_ms = session.total_ms(),
        out = %out.display(),
        "minkowski"
    );

    write_minkowski_csv(create(out)?, &records, decimals)?;

    if let Some(path) = svg {
        let scene = polygons
            .iter()
            .skip(1)
            .fold(SvgScene::new(canvas), |scene, p| scene.polygon(p, "#999999"));
        let scene = records.iter().fold(scene, |scene, r| {
            scene.polygon(&ConvexPolygon::new(r.display.clone()), "#cc8833")
        });
        scene.polygon(&polygons[0], "#3366cc").write_to(create(path)?)?;
    }
    Ok(())
}
