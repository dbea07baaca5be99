//! A-posteriori check of |∇φ| = 1 on a solved field.

use crate::discretization::connectivity::MeshGeometry;
use crate::discretization::mesh::Mesh;
use crate::levelset::CellStatus;
use crate::levelset::variable::DistanceVariable;
use glam::DVec2;
use nalgebra::{Matrix2, Vector2};

/// Least-squares gradient of `var` at `cell` from its known neighbors.
///
/// `None` if the cell itself is not known or its known neighbors all lie on
/// one line through the cell centre.
pub fn least_squares_gradient<G: MeshGeometry>(
    mesh: &Mesh,
    geometry: &G,
    var: &DistanceVariable,
    status: &[CellStatus],
    cell: usize,
) -> Option<DVec2> {
    if status[cell] != CellStatus::Known {
        return None;
    }

    let centre = mesh.cells[cell].centroid;
    let phi = var.value(cell);
    let mut normal_matrix = Matrix2::<f64>::zeros();
    let mut rhs = Vector2::<f64>::zeros();

    for neighbor in geometry
        .neighbors(cell)
        .filter(|&n| status[n] == CellStatus::Known)
    {
        let r = mesh.cells[neighbor].centroid - centre;
        let r = Vector2::new(r.x, r.y);
        normal_matrix += r * r.transpose();
        rhs += r * (var.value(neighbor) - phi);
    }

    let scale = normal_matrix.trace();
    if scale <= 0.0 || normal_matrix.determinant().abs() <= 1e-12 * scale * scale {
        return None;
    }

    normal_matrix
        .lu()
        .solve(&rhs)
        .map(|g| DVec2::new(g[0], g[1]))
}

/// Per-cell eikonal residual `| |∇φ| - 1 |`, where a gradient is available.
pub fn eikonal_residuals<G: MeshGeometry>(
    mesh: &Mesh,
    geometry: &G,
    var: &DistanceVariable,
    status: &[CellStatus],
) -> Vec<Option<f64>> {
    (0..geometry.num_cells())
        .map(|cell| {
            least_squares_gradient(mesh, geometry, var, status, cell)
                .map(|g| (g.length() - 1.0).abs())
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResidualStats {
    pub mean: f64,
    pub max: f64,
    pub max_cell: usize,
    pub samples: usize,
}

pub fn residual_stats(residuals: &[Option<f64>]) -> Option<ResidualStats> {
    let mut sum = 0.0;
    let mut max = 0.0;
    let mut max_cell = 0;
    let mut samples = 0;

    for (cell, r) in residuals.iter().enumerate() {
        if let Some(r) = *r {
            sum += r;
            samples += 1;
            if r > max {
                max = r;
                max_cell = cell;
            }
        }
    }

    (samples > 0).then(|| ResidualStats {
        mean: sum / samples as f64,
        max,
        max_cell,
        samples,
    })
}
