use crate::discretization::connectivity::MeshGeometry;
use crate::discretization::mesh::Mesh;
use crate::levelset::variable::DistanceVariable;
use crate::levelset::{CellStatus, DistanceEquation, MarchingReport};
use crate::processing::eikonal::{ResidualStats, eikonal_residuals, residual_stats};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub struct MarchingSummary {
    // Mesh info
    pub num_cells: usize,
    pub num_faces: usize,
    pub num_nodes: usize,
    pub domain_extent: ((f64, f64), (f64, f64)),
    pub min_cell_spacing: f64,
    pub max_cell_spacing: f64,
    pub avg_cell_area: f64,

    // Tolerances
    pub min_distance_tol: f64,
    pub discriminant_rel_eps: f64,
    pub narrow_band: Option<f64>,

    // March info
    pub interface_cells: usize,
    pub initial_trial_cells: usize,
    pub finalized_by_march: usize,
    pub trial_updates: usize,
    pub known: usize,
    pub trial: usize,
    pub unknown: usize,
    pub stopped_at_band_edge: bool,

    // Field info
    pub value_range: (f64, f64),
    pub residual: Option<ResidualStats>,
}

impl MarchingSummary {
    pub fn from_solve<G: MeshGeometry>(
        mesh: &Mesh,
        geometry: &G,
        equation: &DistanceEquation,
        var: &DistanceVariable,
        report: &MarchingReport,
    ) -> Self {
        let num_cells = mesh.cells.len();

        let xs = mesh.nodes.iter().map(|n| n.position.x);
        let ys = mesh.nodes.iter().map(|n| n.position.y);
        let x_range = min_max(xs);
        let y_range = min_max(ys);

        let spacings: Vec<f64> = mesh
            .faces
            .iter()
            .filter_map(|face| match face.neighbor_cell_ids {
                (k, Some(l)) => Some(mesh.cells[k].centroid.distance(mesh.cells[l].centroid)),
                (_, None) => None,
            })
            .collect();
        let (min_spacing, max_spacing) = min_max(spacings.iter().copied());
        let avg_area = mesh.cells.iter().map(|c| c.volume).sum::<f64>() / num_cells.max(1) as f64;

        let residual = residual_stats(&eikonal_residuals(mesh, geometry, var, &report.status));

        Self {
            num_cells,
            num_faces: mesh.faces.len(),
            num_nodes: mesh.nodes.len(),
            domain_extent: (x_range, y_range),
            min_cell_spacing: min_spacing,
            max_cell_spacing: max_spacing,
            avg_cell_area: avg_area,
            min_distance_tol: equation.tolerances.min_distance,
            discriminant_rel_eps: equation.tolerances.discriminant_rel_eps,
            narrow_band: equation.narrow_band,
            interface_cells: report.interface_cells,
            initial_trial_cells: report.initial_trial_cells,
            finalized_by_march: report.finalized_by_march,
            trial_updates: report.trial_updates,
            known: report.count(CellStatus::Known),
            trial: report.count(CellStatus::Trial),
            unknown: report.count(CellStatus::Unknown),
            stopped_at_band_edge: report.stopped_at_band_edge,
            value_range: min_max(var.as_slice().iter().copied()),
            residual,
        }
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file, "SIGNED DISTANCE SUMMARY")?;
        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file)?;

        writeln!(file, "MESH STATISTICS")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Number of cells:     {}", self.num_cells)?;
        writeln!(file, "Number of faces:     {}", self.num_faces)?;
        writeln!(file, "Number of nodes:     {}", self.num_nodes)?;
        let ((x0, x1), (y0, y1)) = self.domain_extent;
        writeln!(file, "Domain x extent:     {:.6e} to {:.6e}", x0, x1)?;
        writeln!(file, "Domain y extent:     {:.6e} to {:.6e}", y0, y1)?;
        writeln!(file, "Min cell spacing:    {:.6e}", self.min_cell_spacing)?;
        writeln!(file, "Max cell spacing:    {:.6e}", self.max_cell_spacing)?;
        writeln!(file, "Avg cell area:       {:.6e}", self.avg_cell_area)?;
        writeln!(file)?;

        writeln!(file, "NUMERICAL TOLERANCES")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Min distance:        {:.6e}", self.min_distance_tol)?;
        if self.min_cell_spacing.is_finite() && self.min_cell_spacing > 0.0 {
            writeln!(
                file,
                "  = {:.6e} × min_cell_spacing",
                self.min_distance_tol / self.min_cell_spacing
            )?;
        }
        writeln!(file, "Discriminant eps:    {:.6e}", self.discriminant_rel_eps)?;
        match self.narrow_band {
            Some(width) => writeln!(file, "Narrow band:         {:.6e}", width)?,
            None => writeln!(file, "Narrow band:         none")?,
        }
        writeln!(file)?;

        writeln!(file, "MARCHING")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Interface cells:     {}", self.interface_cells)?;
        writeln!(file, "Initial trial cells: {}", self.initial_trial_cells)?;
        writeln!(file, "Finalized by march:  {}", self.finalized_by_march)?;
        writeln!(file, "Trial updates:       {}", self.trial_updates)?;
        writeln!(file)?;
        writeln!(file, "Final status:")?;
        writeln!(file, "  known   = {}", self.known)?;
        writeln!(file, "  trial   = {}", self.trial)?;
        writeln!(file, "  unknown = {}", self.unknown)?;
        if self.stopped_at_band_edge {
            writeln!(file, "  (stopped at narrow band edge)")?;
        }
        writeln!(file)?;

        writeln!(file, "DISTANCE FIELD")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(
            file,
            "Value range:         {:.6e} to {:.6e}",
            self.value_range.0, self.value_range.1
        )?;
        if let Some(r) = self.residual {
            writeln!(file, "Eikonal residual | |grad phi| - 1 |:")?;
            writeln!(file, "  Samples:           {}", r.samples)?;
            writeln!(file, "  Mean:              {:.6e}", r.mean)?;
            writeln!(file, "  Max:               {:.6e} (cell {})", r.max, r.max_cell)?;
        }
        writeln!(file)?;

        writeln!(file, "{}", "=".repeat(60))?;

        Ok(())
    }

    pub fn print_to_console(&self) {
        println!("\n{}", "=".repeat(60));
        println!("DISTANCE SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "Mesh:          {} cells, {} faces",
            self.num_cells, self.num_faces
        );
        println!(
            "Status:        {} known, {} trial, {} unknown",
            self.known, self.trial, self.unknown
        );
        println!(
            "Range:         {:.4} to {:.4}",
            self.value_range.0, self.value_range.1
        );
        if let Some(r) = self.residual {
            println!("Residual:      mean {:.3e}, max {:.3e}", r.mean, r.max);
        }
        println!("{}\n", "=".repeat(60));
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
