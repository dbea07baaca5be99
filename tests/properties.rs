//! Property-based tests for the distance solve on random rectangular grids.
//!
//! Checked on every generated grid and field:
//! - The solve succeeds
//! - Every cell keeps its sign
//! - A connected grid ends fully known

use glam::DVec2;
use proptest::prelude::*;

use vfvm_levelset::discretization::connectivity::CellConnectivity;
use vfvm_levelset::discretization::generator::create_rectangular_grid;
use vfvm_levelset::levelset::{CellStatus, DistanceEquation, DistanceVariable};

const MAX_CELLS_PER_SIDE: usize = 8;

/// Grid shape, spacing and a nonzero field with at least one sign change.
fn grid_and_field() -> impl Strategy<Value = (usize, usize, f64, f64, Vec<f64>)> {
    (1..=MAX_CELLS_PER_SIDE, 1..=MAX_CELLS_PER_SIDE, 0.2..2.0f64, 0.2..2.0f64)
        .prop_filter("need two cells", |(nx, ny, _, _)| nx * ny >= 2)
        .prop_flat_map(|(nx, ny, dx, dy)| {
            let value = (any::<bool>(), 0.05..3.0f64)
                .prop_map(|(negative, mag)| if negative { -mag } else { mag });
            (
                Just(nx),
                Just(ny),
                Just(dx),
                Just(dy),
                prop::collection::vec(value, nx * ny),
            )
        })
        .prop_map(|(nx, ny, dx, dy, mut field)| {
            if field.iter().all(|&v| v > 0.0) {
                field[0] = -field[0];
            } else if field.iter().all(|&v| v < 0.0) {
                field[0] = -field[0];
            }
            (nx, ny, dx, dy, field)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn solve_preserves_signs((nx, ny, dx, dy, field) in grid_and_field()) {
        let geometry = CellConnectivity::from_mesh(&create_rectangular_grid(nx, ny, dx, dy));
        let mut var = DistanceVariable::from_slice(&field);

        let result = DistanceEquation::new().solve(&geometry, &mut var);
        prop_assert!(result.is_ok(), "solve failed: {:?}", result);
        let report = result.unwrap();

        for (cell, (&before, &after)) in field.iter().zip(var.as_slice()).enumerate() {
            prop_assert!(after.is_finite(), "cell {} is not finite", cell);
            prop_assert_eq!(before > 0.0, after > 0.0, "cell {} changed sign", cell);
        }
        prop_assert!(report.status.iter().all(|&s| s == CellStatus::Known));
        prop_assert_eq!(report.count(CellStatus::Known), nx * ny);
    }

    #[test]
    fn interface_cells_lie_within_one_spacing((nx, ny, dx, dy, field) in grid_and_field()) {
        let geometry = CellConnectivity::from_mesh(&create_rectangular_grid(nx, ny, dx, dy));
        let mut var = DistanceVariable::from_slice(&field);
        let interface = var.interface_cells(&geometry);

        let result = DistanceEquation::new().solve(&geometry, &mut var);
        prop_assert!(result.is_ok(), "solve failed: {:?}", result);
        for cell in (0..nx * ny).filter(|&c| interface[c]) {
            prop_assert!(var.value(cell).abs() <= dx.max(dy) + 1e-12);
        }
    }
}

#[test]
fn circle_distance_accuracy() {
    let (n, h, radius) = (20, 0.25, 1.3);
    let centre = DVec2::splat(2.5);
    let mesh = create_rectangular_grid(n, n, h, h);
    let geometry = CellConnectivity::from_mesh(&mesh);
    let exact = DistanceVariable::from_centroids(&mesh.centroids(), |p| p.distance(centre) - radius);
    let mut var =
        DistanceVariable::from_centroids(&mesh.centroids(), |p| (p.distance(centre) - radius).signum());

    let report = DistanceEquation::new().solve(&geometry, &mut var).unwrap();

    assert!(report.unreached().is_empty());
    let max_error = var
        .as_slice()
        .iter()
        .zip(exact.as_slice())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    assert!(max_error < 0.15, "max error {max_error}");
}
