//! Simulated training progress.
//!
//! The service reports nothing while it trains, so the client animates a
//! synthetic bar. Values produced here are a UI affordance only and are never
//! derived from server state.

use rand::Rng;

use super::log::{LogEntry, LogKind};

/// Upper bound (exclusive) of the random increment applied per tick.
pub const MAX_INCREMENT: f64 = 10.0;
/// Chance that a tick appends an epoch log line.
pub const LOG_PROBABILITY: f64 = 0.3;
/// Ticks after which the bar is forced to completion.
pub const MAX_TICKS: u32 = 1_000;
/// Terminal log line, emitted exactly once per run.
pub const COMPLETION_MESSAGE: &str = "Training completed successfully!";

/// Snapshot published after each timer tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressTick {
    /// Progress in `[0, 100]`.
    pub percent: f64,
    /// Log lines produced by this tick, in display order.
    pub log: Vec<LogEntry>,
    /// True on the last tick of the run.
    pub finished: bool,
}

impl ProgressTick {
    /// Numeric label shown on the bar.
    pub fn rounded(&self) -> u8 {
        self.percent.round().clamp(0.0, 100.0) as u8
    }
}

/// Advances a progress scalar by random steps until it reaches 100.
#[derive(Clone, Debug, Default)]
pub struct ProgressSimulator {
    progress: f64,
    ticks: u32,
    finished: bool,
}

impl ProgressSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one step. Returns `None` once the run has finished.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ProgressTick> {
        if self.finished {
            return None;
        }
        self.ticks += 1;
        self.progress += rng.random_range(0.0..MAX_INCREMENT);
        if self.progress > 100.0 || self.ticks >= MAX_TICKS {
            self.progress = 100.0;
        }

        let mut log = Vec::new();
        if rng.random_bool(LOG_PROBABILITY) {
            log.push(LogEntry::now(
                LogKind::Info,
                format!(
                    "Epoch {}: Training accuracy improving...",
                    epoch_number(self.progress)
                ),
            ));
        }
        if self.progress >= 100.0 {
            self.finished = true;
            log.push(LogEntry::now(LogKind::Success, COMPLETION_MESSAGE));
        }
        Some(ProgressTick {
            percent: self.progress,
            log,
            finished: self.finished,
        })
    }
}

/// Epoch label derived from progress: one epoch per ten percent.
pub fn epoch_number(progress: f64) -> u32 {
    (progress / 10.0).floor() as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Yields zero bits: every increment is 0 and every log roll succeeds.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    fn run_to_end<R: Rng>(rng: &mut R) -> Vec<ProgressTick> {
        let mut sim = ProgressSimulator::new();
        let mut ticks = Vec::new();
        while let Some(tick) = sim.tick(rng) {
            ticks.push(tick);
            assert!(ticks.len() <= MAX_TICKS as usize);
        }
        assert!(ticks.last().is_some_and(|tick| tick.finished));
        ticks
    }

    fn completion_lines(ticks: &[ProgressTick]) -> usize {
        ticks
            .iter()
            .flat_map(|tick| tick.log.iter())
            .filter(|entry| entry.kind == LogKind::Success)
            .count()
    }

    #[test]
    fn seeded_runs_terminate_with_one_completion_line() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ticks = run_to_end(&mut rng);
            let last = ticks.last().unwrap();
            assert!(last.finished);
            assert_eq!(last.percent, 100.0);
            assert_eq!(last.log.last().unwrap().message, COMPLETION_MESSAGE);
            assert_eq!(completion_lines(&ticks), 1, "seed {seed}");
            assert!(ticks[..ticks.len() - 1].iter().all(|tick| !tick.finished));
        }
    }

    #[test]
    fn progress_is_monotonic_and_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let ticks = run_to_end(&mut rng);
        let mut previous = 0.0;
        for tick in &ticks {
            assert!(tick.percent >= previous);
            assert!((0.0..=100.0).contains(&tick.percent));
            previous = tick.percent;
        }
    }

    #[test]
    fn stalled_randomness_still_terminates() {
        let ticks = run_to_end(&mut ZeroRng);
        assert_eq!(ticks.len(), MAX_TICKS as usize);
        assert_eq!(completion_lines(&ticks), 1);
        assert_eq!(ticks[0].percent, 0.0);
        assert_eq!(
            ticks[0].log[0].message,
            "Epoch 1: Training accuracy improving..."
        );
    }

    #[test]
    fn finished_simulator_stays_silent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sim = ProgressSimulator::new();
        let mut last = None;
        while let Some(tick) = sim.tick(&mut rng) {
            last = Some(tick);
        }
        assert_eq!(last.map(|tick| tick.percent), Some(100.0));
        assert!(sim.tick(&mut rng).is_none());
    }

    #[test]
    fn epoch_numbers_follow_progress_decades() {
        assert_eq!(epoch_number(0.0), 1);
        assert_eq!(epoch_number(9.99), 1);
        assert_eq!(epoch_number(10.0), 2);
        assert_eq!(epoch_number(100.0), 11);
    }

    #[test]
    fn rounded_label_matches_bar() {
        let tick = ProgressTick {
            percent: 42.5,
            log: Vec::new(),
            finished: false,
        };
        assert_eq!(tick.rounded(), 43);
    }
}
