use crate::discretization::connectivity::MeshGeometry;
use crate::levelset::error::{DistanceError, DistanceResult};
use glam::DVec2;
use nalgebra::DVector;

/// Cell-centred level set field. Positive and negative values mark the two
/// sides of the interface; the zero crossing is the interface itself.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceVariable {
    values: DVector<f64>,
}

/// True when `a` and `b` lie strictly on opposite sides of zero.
pub fn opposite_signs(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

impl DistanceVariable {
    pub fn new(values: DVector<f64>) -> Self {
        Self { values }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self::new(DVector::from_column_slice(values))
    }

    /// Sample `f` at every cell centre.
    pub fn from_centroids(centroids: &[DVec2], f: impl Fn(DVec2) -> f64) -> Self {
        Self::new(DVector::from_iterator(
            centroids.len(),
            centroids.iter().map(|&c| f(c)),
        ))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, cell: usize) -> f64 {
        self.values[cell]
    }

    pub fn set_value(&mut self, cell: usize, value: f64) {
        self.values[cell] = value;
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    pub fn into_inner(self) -> DVector<f64> {
        self.values
    }

    pub fn has_sign_change(&self) -> bool {
        self.values.iter().any(|&v| v > 0.0) && self.values.iter().any(|&v| v < 0.0)
    }

    /// Check the input contract of a distance solve on a mesh with `num_cells` cells.
    pub fn validate(&self, num_cells: usize) -> DistanceResult<()> {
        if self.len() != num_cells {
            return Err(DistanceError::SizeMismatch {
                values: self.len(),
                cells: num_cells,
            });
        }
        if let Some(cell) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(DistanceError::NonFiniteValue { cell });
        }
        if !self.has_sign_change() {
            return Err(DistanceError::NoSignChange);
        }
        Ok(())
    }

    /// Per cell and face slot: does the slot lead to a cell of opposite sign?
    /// Boundary slots are always `false`.
    pub fn interface_face_flags<G: MeshGeometry>(&self, geometry: &G) -> Vec<Vec<bool>> {
        (0..geometry.num_cells())
            .map(|cell| {
                let phi = self.value(cell);
                geometry
                    .face_slots(cell)
                    .iter()
                    .map(|slot| {
                        slot.neighbor
                            .is_some_and(|n| opposite_signs(phi, self.value(n.cell)))
                    })
                    .collect()
            })
            .collect()
    }

    /// Cells having at least one neighbor of opposite sign.
    pub fn interface_cells<G: MeshGeometry>(&self, geometry: &G) -> Vec<bool> {
        self.interface_face_flags(geometry)
            .into_iter()
            .map(|flags| flags.contains(&true))
            .collect()
    }
}
