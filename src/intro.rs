//! Timed state machine for the intro gate.
//!
//! The stage order and dwell times live in one table and a single scheduler
//! tick advances through it, so the sequence can be exercised with a virtual
//! clock instead of real timers.

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntroPhase {
    /// Fake error screen shown, waiting for the visitor to press a key or tap.
    WaitingForInput,
    /// Input accepted; error screen fading out.
    Starting,
    /// Mini-game visible and simulating at base speed.
    Running,
    /// Speed ramp and speed lines active.
    SpeedingUp,
    /// Glitch overlay flashing over the game.
    Glitching,
    /// Overlay fading; page scrolled back to the top.
    Revealing,
    /// Overlay gone; the page owns the viewport.
    Done,
}

/// Dwell time in each timed phase before auto-advancing to the next.
pub const STAGES: &[(IntroPhase, f64)] = &[
    (IntroPhase::Starting, 500.0),
    (IntroPhase::Running, 2500.0),
    (IntroPhase::SpeedingUp, 1500.0),
    (IntroPhase::Glitching, 1000.0),
    (IntroPhase::Revealing, 500.0),
];

/// Interval at which the view ticks the sequence.
pub const STAGE_TICK_MS: i32 = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct IntroSequence {
    phase: IntroPhase,
    elapsed_ms: f64,
}

impl Default for IntroSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IntroSequence {
    pub fn new() -> Self {
        Self {
            phase: IntroPhase::WaitingForInput,
            elapsed_ms: 0.0,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == IntroPhase::Done
    }

    /// Accept the entry input. Only the first call (while still waiting)
    /// starts the sequence; later calls report `false` and change nothing.
    pub fn begin(&mut self) -> bool {
        if self.phase != IntroPhase::WaitingForInput {
            return false;
        }
        self.phase = IntroPhase::Starting;
        self.elapsed_ms = 0.0;
        true
    }

    /// Advance the clock by `dt_ms`. At most one stage boundary is crossed
    /// per call; leftover time carries into the next phase so cumulative
    /// timing stays exact regardless of tick granularity.
    pub fn tick(&mut self, dt_ms: f64) -> Option<IntroPhase> {
        let dwell = self.dwell()?;
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < dwell {
            return None;
        }
        self.elapsed_ms -= dwell;
        self.phase = match self.phase {
            IntroPhase::Starting => IntroPhase::Running,
            IntroPhase::Running => IntroPhase::SpeedingUp,
            IntroPhase::SpeedingUp => IntroPhase::Glitching,
            IntroPhase::Glitching => IntroPhase::Revealing,
            _ => IntroPhase::Done,
        };
        Some(self.phase)
    }

    fn dwell(&self) -> Option<f64> {
        STAGES
            .iter()
            .find(|(p, _)| *p == self.phase)
            .map(|(_, d)| *d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_input_before_advancing() {
        let mut seq = IntroSequence::new();
        for _ in 0..100 {
            assert_eq!(seq.tick(100.0), None);
        }
        assert_eq!(seq.phase(), IntroPhase::WaitingForInput);
    }

    #[test]
    fn begin_accepts_only_the_first_call() {
        let mut seq = IntroSequence::new();
        assert!(seq.begin());
        assert!(!seq.begin());
        assert_eq!(seq.phase(), IntroPhase::Starting);
        // Still rejected later in the run.
        seq.tick(500.0);
        assert!(!seq.begin());
        assert_eq!(seq.phase(), IntroPhase::Running);
    }

    #[test]
    fn stages_fire_once_each_and_in_order() {
        let mut seq = IntroSequence::new();
        seq.begin();
        let mut entered = Vec::new();
        let mut clock = 0.0;
        while !seq.is_done() {
            clock += 100.0;
            assert!(clock < 60_000.0, "sequence failed to finish");
            if let Some(p) = seq.tick(100.0) {
                entered.push(p);
            }
        }
        assert_eq!(
            entered,
            vec![
                IntroPhase::Running,
                IntroPhase::SpeedingUp,
                IntroPhase::Glitching,
                IntroPhase::Revealing,
                IntroPhase::Done,
            ]
        );
        // Total wall time equals the sum of the dwell table.
        let total: f64 = STAGES.iter().map(|(_, d)| d).sum();
        assert_eq!(clock, total);
    }

    #[test]
    fn leftover_time_carries_between_phases() {
        let mut seq = IntroSequence::new();
        seq.begin();
        // 600ms tick overshoots the 500ms Starting dwell by 100ms.
        assert_eq!(seq.tick(600.0), Some(IntroPhase::Running));
        // Running needs 2500ms total; 2400ms more should cross the boundary.
        assert_eq!(seq.tick(2399.0), None);
        assert_eq!(seq.tick(1.0), Some(IntroPhase::SpeedingUp));
    }

    #[test]
    fn done_is_terminal() {
        let mut seq = IntroSequence::new();
        seq.begin();
        while !seq.is_done() {
            seq.tick(1000.0);
        }
        for _ in 0..10 {
            assert_eq!(seq.tick(1000.0), None);
        }
        assert!(seq.is_done());
        assert!(!seq.begin());
    }
}
