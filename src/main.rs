use glam::DVec2;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use vfvm_levelset::discretization::connectivity::{CellConnectivity, MeshGeometry};
use vfvm_levelset::discretization::generator::create_rectangular_grid;
use vfvm_levelset::discretization::mesh::Mesh;
use vfvm_levelset::levelset::{DistanceEquation, DistanceVariable};
use vfvm_levelset::numerics::DistanceTolerances;
use vfvm_levelset::processing::csv_writer;
use vfvm_levelset::processing::summary::MarchingSummary;

const OUTPUT_DIR: &str = "output/levelset";

struct RunArgs {
    nx: usize,
    ny: usize,
    radius: f64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            nx: 40,
            ny: 40,
            radius: 0.3,
        }
    }
}

fn parse_args() -> Result<RunArgs, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut run = RunArgs::default();

    if let Some(nx) = args.first() {
        run.nx = nx.parse().map_err(|e| format!("invalid nx {nx:?}: {e}"))?;
    }
    if let Some(ny) = args.get(1) {
        run.ny = ny.parse().map_err(|e| format!("invalid ny {ny:?}: {e}"))?;
    }
    if let Some(radius) = args.get(2) {
        run.radius = radius
            .parse()
            .map_err(|e| format!("invalid radius {radius:?}: {e}"))?;
    }
    if run.nx == 0 || run.ny == 0 {
        return Err("nx and ny must be positive".to_string());
    }

    Ok(run)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: vfvm-levelset [nx] [ny] [radius]");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::create_dir_all(OUTPUT_DIR) {
        eprintln!("Failed to create output directory: {e}");
        return ExitCode::FAILURE;
    }

    // Unit square, circle centred in the middle.
    let (dx, dy) = (1.0 / args.nx as f64, 1.0 / args.ny as f64);
    let mesh = create_rectangular_grid(args.nx, args.ny, dx, dy);
    println!(
        "Rectangular grid: {} x {} cells, circle radius {}",
        args.nx, args.ny, args.radius
    );

    let ok = run_case("grid", &mesh, args.radius);

    #[cfg(feature = "voronoi")]
    let ok = {
        let mesh = jittered_voronoi_mesh(args.nx, args.ny);
        println!("Voronoi mesh: {} cells", mesh.num_cells());
        run_case("voronoi", &mesh, args.radius) && ok
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Solve for the distance to a circle of `radius` centred at (0.5, 0.5),
/// starting from a field that only carries the sign.
fn run_case(name: &str, mesh: &Mesh, radius: f64) -> bool {
    let centre = DVec2::splat(0.5);
    let geometry = CellConnectivity::from_mesh(mesh);
    let mut var = DistanceVariable::from_centroids(&mesh.centroids(), |p| {
        if p.distance(centre) < radius { -1.0 } else { 1.0 }
    });

    let tolerances = geometry
        .spacing_range()
        .map(|(min, _)| DistanceTolerances::calibrated(min))
        .unwrap_or_default();
    let equation = DistanceEquation::new()
        .with_tolerances(tolerances)
        .with_logging(true);

    println!("Running fast marching on {name} ({} cells)...", geometry.num_cells());
    let report = match equation.solve(&geometry, &mut var) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Distance solve failed: {e}");
            return false;
        }
    };

    let field_path = Path::new(OUTPUT_DIR).join(format!("{name}_distance.csv"));
    if let Err(e) = csv_writer::write_distance_field(&field_path, mesh, &var, &report.status) {
        eprintln!("Failed to write distance field: {e}");
        return false;
    }
    println!("Distance field saved to {}", field_path.display());

    let exact: Vec<f64> = mesh
        .cells
        .iter()
        .map(|c| c.centroid.distance(centre) - radius)
        .collect();
    let error: Vec<f64> = var
        .as_slice()
        .iter()
        .zip(&exact)
        .map(|(phi, d)| (phi - d).abs())
        .collect();
    let max_error = error.iter().copied().fold(0.0, f64::max);
    println!("Max deviation from exact circle distance: {max_error:.3e}");

    let error_path = Path::new(OUTPUT_DIR).join(format!("{name}_error.csv"));
    if let Err(e) = csv_writer::write_csv(&error_path, &["exact", "abs_error"], &[&exact, &error]) {
        eprintln!("Failed to write error field: {e}");
        return false;
    }

    let summary = MarchingSummary::from_solve(mesh, &geometry, &equation, &var, &report);
    let summary_path = Path::new(OUTPUT_DIR).join(format!("{name}_summary.txt"));
    if let Err(e) = summary.write_to_file(&summary_path) {
        eprintln!("Failed to write summary: {e}");
        return false;
    }
    summary.print_to_console();
    println!("Summary saved to {}", summary_path.display());

    true
}

/// Generators on a regular lattice, each shifted by a deterministic jitter.
#[cfg(feature = "voronoi")]
fn jittered_voronoi_mesh(nx: usize, ny: usize) -> Mesh {
    use vfvm_levelset::discretization::generator::{create_regular_2d_points, voronoi};

    let (dx, dy) = (1.0 / nx as f64, 1.0 / ny as f64);
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = || {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    };

    let generators: Vec<DVec2> = create_regular_2d_points(nx, ny, dx, dy)
        .into_iter()
        .map(|p| p + DVec2::new(0.3 * dx * next(), 0.3 * dy * next()))
        .collect();

    voronoi::create_voronoi_mesh(&generators, [1.0, 1.0])
}
