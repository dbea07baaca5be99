use super::mesh::{Cell, Face, Mesh, Node};
use glam::DVec2;

/// Create a regular 2D grid of cell centres.
/// Returns points in the range [0, nx * dx] × [0, ny * dy], x varying fastest.
pub fn create_regular_2d_points(nx: usize, ny: usize, dx: f64, dy: f64) -> Vec<DVec2> {
    let mut points = Vec::with_capacity(nx * ny);

    for j in 0..ny {
        for i in 0..nx {
            let x = (i as f64 + 0.5) * dx;
            let y = (j as f64 + 0.5) * dy;
            points.push(DVec2::new(x, y));
        }
    }

    points
}

/// Build a structured `nx × ny` grid of rectangular cells with spacing `dx`, `dy`.
///
/// Cell `i + j * nx` sits in column `i`, row `j`. Horizontal faces are numbered
/// first, then vertical ones. Every cell lists its faces as
/// (bottom, right, top, left).
pub fn create_rectangular_grid(nx: usize, ny: usize, dx: f64, dy: f64) -> Mesh {
    let cell_id = |i: usize, j: usize| i + j * nx;
    let horizontal = |i: usize, j: usize| i + j * nx;
    let n_horizontal = nx * (ny + 1);
    let vertical = |i: usize, j: usize| n_horizontal + i + j * (nx + 1);

    let cells = create_regular_2d_points(nx, ny, dx, dy)
        .into_iter()
        .enumerate()
        .map(|(id, centroid)| {
            let (i, j) = (id % nx, id / nx);
            Cell {
                id,
                volume: dx * dy,
                centroid,
                face_ids: vec![
                    horizontal(i, j),
                    vertical(i + 1, j),
                    horizontal(i, j + 1),
                    vertical(i, j),
                ],
            }
        })
        .collect();

    let mut faces = Vec::with_capacity(n_horizontal + (nx + 1) * ny);

    for j in 0..=ny {
        for i in 0..nx {
            let centroid = DVec2::new((i as f64 + 0.5) * dx, j as f64 * dy);
            let (neighbor_cell_ids, normal) = if j == 0 {
                ((cell_id(i, 0), None), -DVec2::Y)
            } else if j == ny {
                ((cell_id(i, ny - 1), None), DVec2::Y)
            } else {
                ((cell_id(i, j - 1), Some(cell_id(i, j))), DVec2::Y)
            };
            faces.push(Face {
                area: dx,
                normal,
                neighbor_cell_ids,
                centroid,
            });
        }
    }

    for j in 0..ny {
        for i in 0..=nx {
            let centroid = DVec2::new(i as f64 * dx, (j as f64 + 0.5) * dy);
            let (neighbor_cell_ids, normal) = if i == 0 {
                ((cell_id(0, j), None), -DVec2::X)
            } else if i == nx {
                ((cell_id(nx - 1, j), None), DVec2::X)
            } else {
                ((cell_id(i - 1, j), Some(cell_id(i, j))), DVec2::X)
            };
            faces.push(Face {
                area: dy,
                normal,
                neighbor_cell_ids,
                centroid,
            });
        }
    }

    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            nodes.push(Node {
                position: DVec2::new(i as f64 * dx, j as f64 * dy),
            });
        }
    }

    Mesh {
        cells,
        faces,
        nodes,
    }
}

/// Voronoi meshes are built as a one-cell-thick 3D slab; the slab caps are
/// dropped and the side faces projected onto the xy-plane.
#[cfg(feature = "voronoi")]
pub mod voronoi {
    use super::super::mesh::{Cell, Face, Mesh, Node};
    use glam::{DVec2, DVec3};
    use meshless_voronoi::{Dimensionality, Voronoi};

    const SLAB_THICKNESS: f64 = 1.0;

    /// Build the raw Voronoi diagram of the slab using the external library.
    pub fn build_voronoi(generators: &[DVec2], width: [f64; 2]) -> Voronoi {
        let generators: Vec<DVec3> = generators.iter().map(|p| p.extend(0.0)).collect();
        Voronoi::build(
            &generators,
            [0.0, 0.0, -SLAB_THICKNESS / 2.0].into(),
            [width[0], width[1], SLAB_THICKNESS].into(),
            Dimensionality::ThreeD,
            false,
        )
    }

    /// Convert a slab `Voronoi` diagram into a 2D [`Mesh`].
    pub fn parse_voronoi(voronoi: &Voronoi, generators: &[DVec2]) -> Mesh {
        let mut face_map = vec![None; voronoi.faces().len()];
        let mut faces = Vec::new();

        for (old_id, face) in voronoi.faces().iter().enumerate() {
            let normal = face.normal();
            if normal.z.abs() > 0.5 {
                continue;
            }
            face_map[old_id] = Some(faces.len());
            faces.push(Face {
                area: face.area() / SLAB_THICKNESS,
                normal: normal.truncate().normalize(),
                neighbor_cell_ids: (face.left(), face.right()),
                centroid: face.centroid().truncate(),
            });
        }

        let cells = voronoi
            .cells()
            .iter()
            .enumerate()
            .map(|(id, cell)| Cell {
                id,
                volume: cell.volume() / SLAB_THICKNESS,
                centroid: cell.centroid().truncate(),
                face_ids: cell
                    .face_indices(voronoi)
                    .iter()
                    .filter_map(|&f| face_map[f])
                    .collect(),
            })
            .collect();

        let nodes = generators.iter().map(|&position| Node { position }).collect();

        Mesh {
            cells,
            faces,
            nodes,
        }
    }

    /// Convenience wrapper that builds and immediately parses a Voronoi mesh
    /// over [0, width[0]] × [0, width[1]].
    pub fn create_voronoi_mesh(generators: &[DVec2], width: [f64; 2]) -> Mesh {
        let voronoi = build_voronoi(generators, width);
        parse_voronoi(&voronoi, generators)
    }
}
