use crate::discretization::connectivity::MeshGeometry;
use crate::levelset::CellStatus;
use crate::levelset::error::DistanceResult;
use crate::levelset::trial::calc_trial_value;
use crate::levelset::variable::DistanceVariable;
use crate::numerics::DistanceTolerances;

/// Promote every unclassified neighbor of a classified cell to `Trial` and
/// give it a first estimate from its known neighbors.
///
/// The whole band is promoted before any value is computed, so each estimate
/// only sees classified cells. Returns the band in cell order.
pub fn initialize_trial_band<G: MeshGeometry>(
    geometry: &G,
    var: &mut DistanceVariable,
    status: &mut [CellStatus],
    classified: &[bool],
    tolerances: &DistanceTolerances,
) -> DistanceResult<Vec<usize>> {
    let band: Vec<usize> = (0..geometry.num_cells())
        .filter(|&cell| !classified[cell] && status[cell] != CellStatus::Known)
        .filter(|&cell| geometry.neighbors(cell).any(|n| classified[n]))
        .collect();

    for &cell in &band {
        status[cell] = CellStatus::Trial;
    }

    for &cell in &band {
        let value = calc_trial_value(geometry, var, status, cell, tolerances)?;
        var.set_value(cell, value);
    }

    log::debug!("initial trial band holds {} cells", band.len());
    Ok(band)
}
