//! Signed distance functions by the fast marching method.
//!
//! A solve runs four phases over a [`DistanceVariable`]:
//!
//! 1. [`interface::classify_interface`] fixes cells next to a sign change at
//!    their linearly interpolated distance to the zero level set.
//! 2. [`band::initialize_trial_band`] gives the neighbors of those cells a
//!    first estimate.
//! 3. [`trial::calc_trial_value`] is the local eikonal update shared by the
//!    band and the march.
//! 4. [`marching::march`] finalizes trial cells in order of increasing
//!    magnitude until none remain.
//!
//! [`DistanceEquation`] runs them in order.

pub mod band;
pub mod equation;
pub mod error;
pub mod interface;
pub mod marching;
pub mod queue;
pub mod trial;
pub mod variable;

pub use equation::{DistanceEquation, MarchingReport};
pub use error::{DistanceError, DistanceResult};
pub use variable::DistanceVariable;

/// Marching state of a single cell. Cells only ever move forward:
/// `Unknown -> Trial -> Known`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellStatus {
    #[default]
    Unknown,
    Trial,
    Known,
}

impl CellStatus {
    /// Numeric code used in CSV output.
    pub fn code(self) -> f64 {
        match self {
            CellStatus::Unknown => 0.0,
            CellStatus::Trial => 2.0,
            CellStatus::Known => 1.0,
        }
    }
}
