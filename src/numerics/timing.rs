#![allow(unused)]
use std::cell::RefCell;
use std::time::Duration;

/// The phases of a distance solve that are timed separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Classify,
    TrialBand,
    March,
}

#[derive(Default, Clone)]
pub struct TimingStats {
    pub classify_time: Duration,
    pub band_time: Duration,
    pub march_time: Duration,
    pub finalized_cells: usize,
    pub total_time: Duration,
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, phase: Phase, elapsed: Duration) {
        match phase {
            Phase::Classify => self.classify_time += elapsed,
            Phase::TrialBand => self.band_time += elapsed,
            Phase::March => self.march_time += elapsed,
        }
    }

    #[cfg(feature = "timing")]
    pub fn print_summary(&self) {
        let accounted = self.classify_time + self.band_time + self.march_time;
        let overhead = self.total_time.saturating_sub(accounted);

        println!("\n{}", "=".repeat(60));
        println!("{:^60}", "DISTANCE SOLVE TIMING SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "Total solve time:              {:.3}ms",
            self.total_time.as_secs_f64() * 1000.0
        );
        println!("{}", "-".repeat(60));
        println!("Phase breakdown:");
        println!(
            "  Interface classification:  {:>9.3}ms",
            self.classify_time.as_secs_f64() * 1000.0
        );
        println!(
            "  Trial band:                {:>9.3}ms",
            self.band_time.as_secs_f64() * 1000.0
        );
        println!(
            "  Marching:                  {:>9.3}ms  (avg: {:>9.3}us/cell)",
            self.march_time.as_secs_f64() * 1000.0,
            self.march_time.as_secs_f64() * 1e6 / self.finalized_cells.max(1) as f64
        );
        println!("{}", "=".repeat(60));
        println!(
            "Overhead/Other:                {:>9.3}ms\n",
            overhead.as_secs_f64() * 1000.0
        );
    }

    #[cfg(not(feature = "timing"))]
    pub fn print_summary(&self) {}
}

#[cfg(feature = "timing")]
thread_local! {
    static TIMING_STATS: RefCell<TimingStats> = RefCell::new(TimingStats::new());
}

#[cfg(feature = "timing")]
pub fn reset_timing() {
    TIMING_STATS.with(|stats| {
        *stats.borrow_mut() = TimingStats::new();
    });
}

#[cfg(not(feature = "timing"))]
pub fn reset_timing() {}

#[cfg(feature = "timing")]
pub fn record_phase<F, R>(phase: Phase, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = std::time::Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    TIMING_STATS.with(|stats| {
        stats.borrow_mut().add(phase, elapsed);
    });
    result
}

#[cfg(not(feature = "timing"))]
pub fn record_phase<F, R>(_phase: Phase, f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}

#[cfg(feature = "timing")]
pub fn record_finalized(count: usize) {
    TIMING_STATS.with(|stats| {
        stats.borrow_mut().finalized_cells += count;
    });
}

#[cfg(not(feature = "timing"))]
pub fn record_finalized(_count: usize) {}

#[cfg(feature = "timing")]
pub fn finalize_timing(total_time: Duration) -> TimingStats {
    TIMING_STATS.with(|stats| {
        let mut s = stats.borrow_mut();
        s.total_time = total_time;
        s.clone()
    })
}

#[cfg(not(feature = "timing"))]
pub fn finalize_timing(_total_time: Duration) -> TimingStats {
    TimingStats::new()
}

#[cfg(feature = "timing")]
pub fn finalize_and_print(total_time: Duration) {
    finalize_timing(total_time).print_summary();
}

#[cfg(not(feature = "timing"))]
pub fn finalize_and_print(_total_time: Duration) {}
