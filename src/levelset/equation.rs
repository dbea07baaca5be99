use crate::discretization::connectivity::MeshGeometry;
use crate::levelset::CellStatus;
use crate::levelset::band::initialize_trial_band;
use crate::levelset::error::DistanceResult;
use crate::levelset::interface::classify_interface;
use crate::levelset::marching::{march, queue_trial_cells};
use crate::levelset::variable::DistanceVariable;
use crate::numerics::DistanceTolerances;
use crate::numerics::timing::{Phase, finalize_and_print, record_finalized, record_phase, reset_timing};
use std::time::Instant;

/// Solves |∇φ| = 1 for a [`DistanceVariable`] with its zero level set held
/// fixed, using the fast marching method. First order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceEquation {
    pub tolerances: DistanceTolerances,
    /// Stop marching once every remaining trial value exceeds this magnitude.
    pub narrow_band: Option<f64>,
    pub logging: bool,
}

impl Default for DistanceEquation {
    fn default() -> Self {
        Self {
            tolerances: DistanceTolerances::default(),
            narrow_band: None,
            logging: false,
        }
    }
}

/// What a solve did to each cell.
#[derive(Clone, Debug, PartialEq)]
pub struct MarchingReport {
    pub status: Vec<CellStatus>,
    pub interface_cells: usize,
    pub initial_trial_cells: usize,
    pub finalized_by_march: usize,
    pub trial_updates: usize,
    pub stopped_at_band_edge: bool,
}

impl MarchingReport {
    pub fn count(&self, status: CellStatus) -> usize {
        self.status.iter().filter(|&&s| s == status).count()
    }

    pub fn is_known(&self, cell: usize) -> bool {
        self.status[cell] == CellStatus::Known
    }

    /// Cells the march never reached.
    pub fn unreached(&self) -> Vec<usize> {
        self.status
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == CellStatus::Unknown)
            .map(|(cell, _)| cell)
            .collect()
    }
}

impl DistanceEquation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(mut self, tolerances: DistanceTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    pub fn with_narrow_band(mut self, width: f64) -> Self {
        self.narrow_band = Some(width);
        self
    }

    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    /// Replace `var` in place by its signed distance function.
    ///
    /// The input must hold strictly positive and strictly negative values and
    /// one value per cell of `geometry`; nothing is modified otherwise. Signs
    /// are preserved.
    pub fn solve<G: MeshGeometry>(
        &self,
        geometry: &G,
        var: &mut DistanceVariable,
    ) -> DistanceResult<MarchingReport> {
        var.validate(geometry.num_cells())?;

        reset_timing();
        let solve_start = Instant::now();

        let mut status = vec![CellStatus::Unknown; geometry.num_cells()];

        log::log!(
            self.phase_level(),
            "{:>5} cells | {:<15} | {:>7} | {:>5} | {:>5}",
            geometry.num_cells(),
            "phase",
            "cells",
            "known",
            "trial"
        );

        let classified = record_phase(Phase::Classify, || {
            classify_interface(geometry, var, &mut status)
        });
        let interface_cells = classified.iter().filter(|&&c| c).count();
        self.log_phase("interface", interface_cells, &status);

        let band = record_phase(Phase::TrialBand, || {
            initialize_trial_band(geometry, var, &mut status, &classified, &self.tolerances)
        })?;
        self.log_phase("trial band", band.len(), &status);

        let mut queue = queue_trial_cells(var, &status);
        let outcome = record_phase(Phase::March, || {
            march(
                geometry,
                var,
                &mut status,
                &mut queue,
                &self.tolerances,
                self.narrow_band,
            )
        })?;
        record_finalized(outcome.finalized);
        self.log_phase("march", outcome.finalized, &status);

        finalize_and_print(solve_start.elapsed());

        let report = MarchingReport {
            status,
            interface_cells,
            initial_trial_cells: band.len(),
            finalized_by_march: outcome.finalized,
            trial_updates: outcome.updates,
            stopped_at_band_edge: outcome.stopped_at_band_edge,
        };

        let unreached = report.count(CellStatus::Unknown);
        if unreached > 0 && !report.stopped_at_band_edge {
            log::warn!("{unreached} cells are not connected to the interface and stay unknown");
        }

        Ok(report)
    }

    /// Phase rows go out at `info` with `logging` set, at `debug` otherwise.
    fn phase_level(&self) -> log::Level {
        if self.logging {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }

    fn log_phase(&self, phase: &str, cells: usize, status: &[CellStatus]) {
        let known = status.iter().filter(|&&s| s == CellStatus::Known).count();
        let trial = status.iter().filter(|&&s| s == CellStatus::Trial).count();
        log::log!(
            self.phase_level(),
            "{:>5} cells | {phase:<15} | {cells:>7} | {known:>5} | {trial:>5}",
            status.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::connectivity::CellConnectivity;
    use crate::discretization::generator::create_rectangular_grid;
    use crate::levelset::error::DistanceError;
    use approx::assert_abs_diff_eq;
    use std::sync::Mutex;

    #[test]
    fn solve_one_dimensional_column() {
        let mesh = create_rectangular_grid(1, 4, 1.0, 1.0);
        let geometry = CellConnectivity::from_mesh(&mesh);
        let mut var = DistanceVariable::from_slice(&[-1.0, 1.0, 1.0, 1.0]);

        let report = DistanceEquation::new()
            .solve(&geometry, &mut var)
            .expect("solve");

        for (got, want) in var.as_slice().iter().zip([-0.5, 0.5, 1.5, 2.5]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(report.interface_cells, 2);
        assert_eq!(report.initial_trial_cells, 1);
        assert_eq!(report.finalized_by_march, 2);
        assert!(report.unreached().is_empty());
    }

    #[test]
    fn rejected_input_is_left_untouched() {
        let mesh = create_rectangular_grid(3, 1, 1.0, 1.0);
        let geometry = CellConnectivity::from_mesh(&mesh);
        let mut var = DistanceVariable::from_slice(&[1.0, 2.0, 3.0]);

        let result = DistanceEquation::new().solve(&geometry, &mut var);

        assert_eq!(result, Err(DistanceError::NoSignChange));
        assert_eq!(var.as_slice(), &[1.0, 2.0, 3.0]);
    }

    struct CaptureInfo;

    static CAPTURE: CaptureInfo = CaptureInfo;
    static INFO_LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

    impl log::Log for CaptureInfo {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if record.level() == log::Level::Info {
                INFO_LINES.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn logging_emits_phase_table_through_log() {
        log::set_logger(&CAPTURE).ok();
        log::set_max_level(log::LevelFilter::Trace);

        let mesh = create_rectangular_grid(1, 5, 1.0, 1.0);
        let geometry = CellConnectivity::from_mesh(&mesh);
        let mut var = DistanceVariable::from_slice(&[-1.0, 1.0, 1.0, 1.0, 1.0]);

        DistanceEquation::new()
            .with_logging(true)
            .solve(&geometry, &mut var)
            .expect("solve");

        let lines = INFO_LINES.lock().unwrap();
        let rows: Vec<&String> = lines.iter().filter(|l| l.starts_with("    5 cells")).collect();
        assert_eq!(rows.len(), 4, "{lines:?}");
        assert!(rows[0].contains("| phase"));
        assert!(rows[1].contains("| interface"));
        assert!(rows[2].contains("| trial band"));
        assert!(rows[3].contains("| march"));
        // interface: 2 cells classified, both known, no trial yet
        assert!(rows[1].ends_with("|       2 |     2 |     0"));
    }

    #[test]
    fn narrow_band_report() {
        let mesh = create_rectangular_grid(10, 1, 1.0, 1.0);
        let geometry = CellConnectivity::from_mesh(&mesh);
        let mut var = DistanceVariable::from_slice(&[
            -1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
        ]);

        let report = DistanceEquation::new()
            .with_narrow_band(3.0)
            .solve(&geometry, &mut var)
            .expect("solve");

        assert!(report.stopped_at_band_edge);
        // 0.5, 1.5 and 2.5 are inside the band, 3.5 is the first trial cell past it
        assert!(report.is_known(3));
        assert_eq!(report.status[4], CellStatus::Trial);
        assert_abs_diff_eq!(var.value(4), 3.5, epsilon = 1e-12);
        assert_eq!(report.count(CellStatus::Unknown), 5);
    }
}
