use glam::DVec2;

/// The complete 2D computational grid.
pub struct Mesh {
    pub cells: Vec<Cell>,
    pub faces: Vec<Face>,
    pub nodes: Vec<Node>,
}

/// A single control volume.
pub struct Cell {
    pub id: usize,
    /// Cell area (the 2D "volume").
    pub volume: f64,
    pub centroid: DVec2,
    /// Face ids in a fixed per-cell order. Neighbor enumeration follows it.
    pub face_ids: Vec<usize>,
}

/// An edge shared by at most two cells.
pub struct Face {
    /// Face length (the 2D "area").
    pub area: f64,
    /// Unit normal pointing from the left cell towards the right cell.
    pub normal: DVec2,
    /// Tuple of (left cell id, optional right cell id). `None` marks a boundary face.
    pub neighbor_cell_ids: (usize, Option<usize>),
    pub centroid: DVec2,
}

pub struct Node {
    pub position: DVec2,
}

impl Mesh {
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Cell centroids, in cell order.
    pub fn centroids(&self) -> Vec<DVec2> {
        self.cells.iter().map(|c| c.centroid).collect()
    }

    /// The cell on the other side of `face_id` as seen from `cell_id`,
    /// together with the normal oriented outward from `cell_id`.
    pub fn opposite(&self, cell_id: usize, face_id: usize) -> (Option<usize>, DVec2) {
        let face = &self.faces[face_id];
        match face.neighbor_cell_ids {
            (left, right) if left == cell_id => (right, face.normal),
            (left, _) => (Some(left), -face.normal),
        }
    }
}
