use crate::discretization::connectivity::MeshGeometry;
use crate::levelset::CellStatus;
use crate::levelset::error::DistanceResult;
use crate::levelset::queue::TrialQueue;
use crate::levelset::trial::calc_trial_value;
use crate::levelset::variable::DistanceVariable;
use crate::numerics::DistanceTolerances;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarchOutcome {
    /// Cells moved from `Trial` to `Known`.
    pub finalized: usize,
    /// Trial value recomputations.
    pub updates: usize,
    /// Marching stopped at the narrow band edge with trial cells left over.
    pub stopped_at_band_edge: bool,
}

/// Seed a queue with the cells currently marked `Trial`.
pub fn queue_trial_cells(var: &DistanceVariable, status: &[CellStatus]) -> TrialQueue {
    let mut queue = TrialQueue::new(status.len());
    for (cell, _) in status
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == CellStatus::Trial)
    {
        queue.push(cell, var.value(cell));
    }
    queue
}

/// Finalize trial cells in order of increasing magnitude.
///
/// Each finalized cell recomputes every neighbor that is not yet known;
/// unknown neighbors join the trial set. With `narrow_band` set, marching
/// stops before finalizing a cell whose magnitude exceeds it. Cells not
/// connected to the interface are never reached and stay `Unknown`.
pub fn march<G: MeshGeometry>(
    geometry: &G,
    var: &mut DistanceVariable,
    status: &mut [CellStatus],
    queue: &mut TrialQueue,
    tolerances: &DistanceTolerances,
    narrow_band: Option<f64>,
) -> DistanceResult<MarchOutcome> {
    let mut outcome = MarchOutcome::default();

    while let Some((cell, magnitude)) = queue.peek() {
        if narrow_band.is_some_and(|width| magnitude > width) {
            outcome.stopped_at_band_edge = true;
            break;
        }
        queue.pop();
        status[cell] = CellStatus::Known;
        outcome.finalized += 1;
        log::trace!("finalized cell {cell} at {:.6e}", var.value(cell));

        for neighbor in geometry.neighbors(cell) {
            if status[neighbor] == CellStatus::Known {
                continue;
            }
            let value = calc_trial_value(geometry, var, status, neighbor, tolerances)?;
            var.set_value(neighbor, value);
            status[neighbor] = CellStatus::Trial;
            queue.push(neighbor, value);
            outcome.updates += 1;
        }
    }

    log::debug!(
        "marching finalized {} cells with {} updates",
        outcome.finalized,
        outcome.updates
    );
    Ok(outcome)
}
