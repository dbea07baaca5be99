use thiserror::Error;

pub type DistanceResult<T> = Result<T, DistanceError>;

#[derive(Debug, Error, PartialEq)]
pub enum DistanceError {
    #[error("initial field has no sign change, need at least one positive and one negative value")]
    NoSignChange,
    #[error("field has {values} values but the mesh has {cells} cells")]
    SizeMismatch { values: usize, cells: usize },
    #[error("initial value of cell {cell} is not finite")]
    NonFiniteValue { cell: usize },
    /// A trial value was requested for a cell without known neighbors.
    /// Only a broken marching order can get here.
    #[error("cell {cell} has no known neighbors to compute a trial value from")]
    NoKnownNeighbors { cell: usize },
    #[error("negative discriminant {value:.3e} in the quadratic update of cell {cell}")]
    NegativeDiscriminant { cell: usize, value: f64 },
    #[error("coincident neighbor centres in the quadratic update of cell {cell}")]
    DegenerateGeometry { cell: usize },
}
