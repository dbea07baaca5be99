use super::mesh::Mesh;
use glam::DVec2;

/// The cell across an interior face and its centre-to-centre distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub cell: usize,
    pub distance: f64,
}

/// Geometry of one face slot of a cell, seen from that cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceSlot {
    /// `None` on the boundary.
    pub neighbor: Option<Neighbor>,
    /// Outward unit normal of the face.
    pub normal: DVec2,
    /// Face length.
    pub area: f64,
}

impl FaceSlot {
    pub fn interior(cell: usize, distance: f64, normal: DVec2, area: f64) -> Self {
        Self {
            neighbor: Some(Neighbor { cell, distance }),
            normal,
            area,
        }
    }

    pub fn boundary(normal: DVec2, area: f64) -> Self {
        Self {
            neighbor: None,
            normal,
            area,
        }
    }
}

/// Read-only cell/face geometry consumed by the distance solver.
///
/// Implementors must list every cell's faces in a fixed order: neighbor
/// enumeration, and with it every tie-break, follows that order.
pub trait MeshGeometry {
    fn num_cells(&self) -> usize;

    fn max_faces_per_cell(&self) -> usize;

    fn face_slots(&self, cell: usize) -> &[FaceSlot];

    /// Interior slots of `cell` as `(neighbor, slot)` pairs; boundary slots are skipped.
    fn interior_slots(&self, cell: usize) -> impl Iterator<Item = (Neighbor, &FaceSlot)> {
        self.face_slots(cell)
            .iter()
            .filter_map(|slot| slot.neighbor.map(|n| (n, slot)))
    }

    fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> {
        self.interior_slots(cell).map(|(n, _)| n.cell)
    }
}

/// Per-cell face-slot table derived once from a [`Mesh`].
#[derive(Clone, Debug, Default)]
pub struct CellConnectivity {
    slots: Vec<Vec<FaceSlot>>,
    max_faces: usize,
}

impl CellConnectivity {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let slots = mesh
            .cells
            .iter()
            .map(|cell| {
                cell.face_ids
                    .iter()
                    .map(|&face_id| {
                        let area = mesh.faces[face_id].area;
                        match mesh.opposite(cell.id, face_id) {
                            (Some(other), normal) => {
                                let distance =
                                    cell.centroid.distance(mesh.cells[other].centroid);
                                FaceSlot::interior(other, distance, normal, area)
                            }
                            (None, normal) => FaceSlot::boundary(normal, area),
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_slots(slots)
    }

    /// Build the table from explicit slots, e.g. for meshes assembled by hand.
    pub fn from_slots(slots: Vec<Vec<FaceSlot>>) -> Self {
        let max_faces = slots.iter().map(Vec::len).max().unwrap_or(0);
        Self { slots, max_faces }
    }

    /// Smallest and largest centre-to-centre distance over interior slots.
    pub fn spacing_range(&self) -> Option<(f64, f64)> {
        self.slots
            .iter()
            .flatten()
            .filter_map(|s| s.neighbor)
            .map(|n| n.distance)
            .fold(None, |acc, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }
}

impl MeshGeometry for CellConnectivity {
    fn num_cells(&self) -> usize {
        self.slots.len()
    }

    fn max_faces_per_cell(&self) -> usize {
        self.max_faces
    }

    fn face_slots(&self, cell: usize) -> &[FaceSlot] {
        &self.slots[cell]
    }
}
