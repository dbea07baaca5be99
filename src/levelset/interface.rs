use crate::discretization::connectivity::MeshGeometry;
use crate::levelset::CellStatus;
use crate::levelset::variable::DistanceVariable;

/// Distance from a cell centre to the zero crossing on the segment towards a
/// neighbor of opposite sign, by linear interpolation. Keeps the sign of `phi`.
pub fn interpolated_distance(phi: f64, phi_neighbor: f64, distance: f64) -> f64 {
    phi * distance / (phi - phi_neighbor).abs()
}

/// Fix the cells adjacent to the zero level set.
///
/// Every cell with at least one opposite-sign neighbor takes the
/// smallest-magnitude interpolated distance over those neighbors (first face
/// slot wins a tie) and becomes `Known`. Cells that are exactly zero lie on
/// the interface and are fixed at zero. All candidates are computed from the
/// incoming field before anything is overwritten.
///
/// Returns the per-cell "classified" flags.
pub fn classify_interface<G: MeshGeometry>(
    geometry: &G,
    var: &mut DistanceVariable,
    status: &mut [CellStatus],
) -> Vec<bool> {
    let flags = var.interface_face_flags(geometry);
    let mut updates = Vec::new();

    for (cell, cell_flags) in flags.iter().enumerate() {
        let phi = var.value(cell);
        if phi == 0.0 {
            updates.push((cell, 0.0));
            continue;
        }

        let best = geometry
            .face_slots(cell)
            .iter()
            .zip(cell_flags)
            .filter(|&(_, &crossing)| crossing)
            .filter_map(|(slot, _)| {
                slot.neighbor
                    .map(|n| interpolated_distance(phi, var.value(n.cell), n.distance))
            })
            .fold(None, |best: Option<f64>, candidate| match best {
                Some(b) if b.abs() <= candidate.abs() => Some(b),
                _ => Some(candidate),
            });

        if let Some(distance) = best {
            updates.push((cell, distance));
        }
    }

    let mut classified = vec![false; geometry.num_cells()];
    for (cell, distance) in updates {
        var.set_value(cell, distance);
        status[cell] = CellStatus::Known;
        classified[cell] = true;
    }

    log::debug!(
        "classified {} interface cells",
        classified.iter().filter(|&&c| c).count()
    );
    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::connectivity::CellConnectivity;
    use crate::discretization::generator::create_rectangular_grid;
    use approx::assert_abs_diff_eq;

    #[test]
    fn interpolation_keeps_sign() {
        assert_abs_diff_eq!(interpolated_distance(-1.0, 1.0, 1.0), -0.5);
        assert_abs_diff_eq!(interpolated_distance(1.0, -3.0, 2.0), 0.5);
        assert_abs_diff_eq!(interpolated_distance(-3.0, 1.0, 2.0), -1.5);
    }

    #[test]
    fn smallest_candidate_wins() {
        // cell 1 sits between a close crossing on the left and a far one on the right
        let mesh = create_rectangular_grid(3, 1, 1.0, 1.0);
        let geometry = CellConnectivity::from_mesh(&mesh);
        let mut var = DistanceVariable::from_slice(&[-0.1, 1.0, -3.0]);
        let mut status = vec![CellStatus::Unknown; 3];

        let classified = classify_interface(&geometry, &mut var, &mut status);

        assert_eq!(classified, vec![true, true, true]);
        // right neighbor: 1/4, left neighbor: 1/1.1
        assert_abs_diff_eq!(var.value(1), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn zero_cells_are_fixed() {
        let mesh = create_rectangular_grid(4, 1, 1.0, 1.0);
        let geometry = CellConnectivity::from_mesh(&mesh);
        let mut var = DistanceVariable::from_slice(&[-2.0, 0.0, 2.0, 2.0]);
        let mut status = vec![CellStatus::Unknown; 4];

        let classified = classify_interface(&geometry, &mut var, &mut status);

        assert_eq!(classified, vec![false, true, false, false]);
        assert_eq!(var.as_slice(), &[-2.0, 0.0, 2.0, 2.0]);
        assert_eq!(status[1], CellStatus::Known);
        assert_eq!(status[0], CellStatus::Unknown);
    }
}
