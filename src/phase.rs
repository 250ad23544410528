//! The four-phase lifecycle state machine.
//!
//! Particles cycle through Wander -> Assemble -> Hold -> Disperse and back to
//! Wander, forever. Each phase selects a force model in the integrator; the
//! machine itself only tracks which phase is active and for how long.
//!
//! Phase state is an owned value, not ambient state: the engine holds one
//! [`PhaseState`] and tests can drive another in isolation.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::Config;

/// One of the four simulation regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Aimless drift, softly confined to a z slab.
    Wander,
    /// Spring flight toward the assigned target point.
    Assemble,
    /// Same spring model, pinning the finished glyph in place.
    Hold,
    /// Ballistic flight under drag after the blast.
    Disperse,
}

impl Phase {
    /// The phase that follows this one in the cycle.
    pub fn next(self) -> Phase {
        match self {
            Phase::Wander => Phase::Assemble,
            Phase::Assemble => Phase::Hold,
            Phase::Hold => Phase::Disperse,
            Phase::Disperse => Phase::Wander,
        }
    }
}

/// Active phase plus its timer.
///
/// `elapsed` resets to zero on every transition; `duration` is re-sampled on
/// entry (fixed for Hold). Leftover time past a boundary is not carried over.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseState {
    /// The phase currently driving the force model.
    pub phase: Phase,
    /// Seconds spent in this phase so far.
    pub elapsed: f32,
    /// Seconds this phase will last.
    pub duration: f32,
}

impl PhaseState {
    /// Enter `phase`, sampling its duration from the configured range.
    pub fn enter(phase: Phase, config: &Config, rng: &mut SmallRng) -> Self {
        let duration = match phase {
            Phase::Wander => sample(&config.wander_duration, rng),
            Phase::Assemble => sample(&config.assemble_duration, rng),
            Phase::Hold => config.hold_seconds,
            Phase::Disperse => sample(&config.disperse_duration, rng),
        };
        Self {
            phase,
            elapsed: 0.0,
            duration,
        }
    }

    /// Advance the timer by `dt`. On expiry, enter the next phase and return
    /// it so the caller can run entry effects (the Disperse blast).
    pub fn advance(&mut self, dt: f32, config: &Config, rng: &mut SmallRng) -> Option<Phase> {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            *self = Self::enter(self.phase.next(), config, rng);
            Some(self.phase)
        } else {
            None
        }
    }
}

/// Uniform draw from a duration range; a degenerate range is taken verbatim.
fn sample(range: &std::ops::Range<f32>, rng: &mut SmallRng) -> f32 {
    if range.is_empty() {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(3)
    }

    fn fixed_config() -> Config {
        Config {
            wander_duration: 1.0..1.0,
            assemble_duration: 2.0..2.0,
            hold_seconds: 0.5,
            disperse_duration: 1.5..1.5,
            ..Config::default()
        }
    }

    #[test]
    fn test_cycle_order() {
        assert_eq!(Phase::Wander.next(), Phase::Assemble);
        assert_eq!(Phase::Assemble.next(), Phase::Hold);
        assert_eq!(Phase::Hold.next(), Phase::Disperse);
        assert_eq!(Phase::Disperse.next(), Phase::Wander);
    }

    #[test]
    fn test_enter_samples_from_range() {
        let config = Config {
            wander_duration: 3.0..6.0,
            ..Config::default()
        };
        let mut r = rng();
        for _ in 0..100 {
            let state = PhaseState::enter(Phase::Wander, &config, &mut r);
            assert!(state.duration >= 3.0 && state.duration < 6.0);
            assert_eq!(state.elapsed, 0.0);
        }
    }

    #[test]
    fn test_hold_duration_is_fixed() {
        let config = fixed_config();
        let mut r = rng();
        let state = PhaseState::enter(Phase::Hold, &config, &mut r);
        assert_eq!(state.duration, 0.5);
    }

    #[test]
    fn test_advance_below_duration_stays() {
        let config = fixed_config();
        let mut r = rng();
        let mut state = PhaseState::enter(Phase::Wander, &config, &mut r);
        assert_eq!(state.advance(0.4, &config, &mut r), None);
        assert!((state.elapsed - 0.4).abs() < 1e-6);
        assert_eq!(state.phase, Phase::Wander);
    }

    #[test]
    fn test_advance_transitions_and_resets() {
        let config = fixed_config();
        let mut r = rng();
        let mut state = PhaseState::enter(Phase::Wander, &config, &mut r);
        // Overshoot the 1.0s wander duration; remainder is dropped.
        assert_eq!(state.advance(1.3, &config, &mut r), Some(Phase::Assemble));
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.duration, 2.0);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let config = fixed_config();
        let mut r = rng();
        let mut state = PhaseState::enter(Phase::Wander, &config, &mut r);
        let mut visited = vec![state.phase];
        for _ in 0..4 {
            let remaining = state.duration;
            if let Some(next) = state.advance(remaining, &config, &mut r) {
                visited.push(next);
            }
        }
        assert_eq!(
            visited,
            vec![
                Phase::Wander,
                Phase::Assemble,
                Phase::Hold,
                Phase::Disperse,
                Phase::Wander
            ]
        );
    }
}
