//! Local eikonal update: the distance of one cell from its known neighbors.

use crate::discretization::connectivity::MeshGeometry;
use crate::levelset::CellStatus;
use crate::levelset::error::{DistanceError, DistanceResult};
use crate::levelset::variable::DistanceVariable;
use crate::numerics::DistanceTolerances;
use glam::DVec2;

/// Which of the two algebraic solutions is causal for a cell.
///
/// The update always produces a pair of candidates; cells on the positive
/// side take the larger one, cells on the negative side the smaller one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    Upper,
    Lower,
}

impl Branch {
    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Branch::Upper
        } else {
            Branch::Lower
        }
    }

    pub fn pick(self, (upper, lower): (f64, f64)) -> f64 {
        match self {
            Branch::Upper => upper,
            Branch::Lower => lower,
        }
    }
}

/// A finalized neighbor as seen from the cell being updated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnownNeighbor {
    pub cell: usize,
    pub value: f64,
    pub distance: f64,
    pub normal: DVec2,
    pub area: f64,
}

/// Known neighbors of `cell`, smallest magnitude first. Equal magnitudes keep
/// face slot order.
pub fn known_neighbors<G: MeshGeometry>(
    geometry: &G,
    var: &DistanceVariable,
    status: &[CellStatus],
    cell: usize,
) -> Vec<KnownNeighbor> {
    let mut known: Vec<KnownNeighbor> = geometry
        .interior_slots(cell)
        .filter(|&(n, _)| status[n.cell] == CellStatus::Known)
        .map(|(n, slot)| KnownNeighbor {
            cell: n.cell,
            value: var.value(n.cell),
            distance: n.distance,
            normal: slot.normal,
            area: slot.area,
        })
        .collect();
    known.sort_by(|a, b| a.value.abs().total_cmp(&b.value.abs()));
    known
}

/// One-neighbor update: `(phi + d, phi - d)`.
pub fn calc_linear(phi: f64, d: f64) -> (f64, f64) {
    (phi + d, phi - d)
}

/// Two-neighbor update on a general (non-orthogonal) mesh.
///
/// Returns `(upper, lower)` roots of the local eikonal constraint. For
/// orthogonal unit spacing with equal neighbor values `phi` this gives
/// `phi ± 1/sqrt(2)`.
pub fn calc_quadratic(
    cell: usize,
    first: &KnownNeighbor,
    second: &KnownNeighbor,
    tolerances: &DistanceTolerances,
) -> DistanceResult<(f64, f64)> {
    let (phi1, d1, n1) = (first.value, first.distance, first.normal);
    let (phi2, d2, n2) = (second.value, second.distance, second.normal);

    let dot = d1 * d2 * n1.dot(n2);
    let cross = d1 * d2 * n1.perp_dot(n2);
    let dsq = d1 * d1 + d2 * d2 - 2.0 * dot;

    if !(dsq > tolerances.min_distance * tolerances.min_distance) {
        return Err(DistanceError::DegenerateGeometry { cell });
    }

    let top = -phi1 * (dot - d2 * d2) - phi2 * (dot - d1 * d1);
    let cross_sq = cross * cross;
    let mut arg = cross_sq * (dsq - (phi1 - phi2).powi(2));

    if arg < 0.0 {
        // round-off when the front runs along the line joining the neighbors
        if arg >= -tolerances.discriminant_rel_eps * cross_sq * dsq {
            arg = 0.0;
        } else {
            return Err(DistanceError::NegativeDiscriminant { cell, value: arg });
        }
    }

    let disc = arg.sqrt();
    Ok(((top + disc) / dsq, (top - disc) / dsq))
}

/// Trial distance of `cell` from its currently known neighbors.
///
/// The branch follows the sign already stored at `cell`, which for cells
/// not yet touched by the march is the sign of the initial field.
pub fn calc_trial_value<G: MeshGeometry>(
    geometry: &G,
    var: &DistanceVariable,
    status: &[CellStatus],
    cell: usize,
    tolerances: &DistanceTolerances,
) -> DistanceResult<f64> {
    let branch = Branch::from_sign(var.value(cell));
    let known = known_neighbors(geometry, var, status, cell);

    match known.as_slice() {
        [] => Err(DistanceError::NoKnownNeighbors { cell }),
        [only] => Ok(branch.pick(calc_linear(only.value, only.distance))),
        [first, second, ..] => Ok(branch.pick(calc_quadratic(cell, first, second, tolerances)?)),
    }
}
