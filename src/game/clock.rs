//! Fixed-interval tick source, decoupled from the render frame rate

use super::error::ConfigError;

/// Default time between simulation steps, in seconds
pub const DEFAULT_TICK_INTERVAL: f32 = 0.2;

/// Accumulates frame time and reports when a simulation tick is due.
///
/// At most one tick fires per [`advance`](SimulationClock::advance) call: a
/// long frame does not trigger catch-up steps, so under slow frame rates the
/// simulation falls behind wall-clock time instead of jumping ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    interval: f32,
    timer: f32,
}

impl SimulationClock {
    pub fn new(interval_secs: f32) -> Result<Self, ConfigError> {
        if !interval_secs.is_finite() || interval_secs <= 0.0 {
            return Err(ConfigError::InvalidTickInterval(interval_secs));
        }

        Ok(Self {
            interval: interval_secs,
            timer: interval_secs,
        })
    }

    /// Consume `delta_secs` of frame time. Returns true when a tick fired.
    ///
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta_secs: f32) -> bool {
        if !delta_secs.is_finite() || delta_secs < 0.0 {
            return false;
        }

        self.timer -= delta_secs;
        if self.timer <= 0.0 {
            self.timer = self.interval;
            return true;
        }
        false
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Time left until the next tick
    pub fn remaining(&self) -> f32 {
        self.timer
    }

    pub fn reset(&mut self) {
        self.timer = self.interval;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
            timer: DEFAULT_TICK_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_interval() {
        assert_eq!(
            SimulationClock::new(0.0),
            Err(ConfigError::InvalidTickInterval(0.0))
        );
        assert!(SimulationClock::new(-0.5).is_err());
        assert!(SimulationClock::new(f32::NAN).is_err());
        assert!(SimulationClock::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_fires_after_interval() {
        let mut clock = SimulationClock::new(0.25).unwrap();

        assert!(!clock.advance(0.125));
        assert!(clock.advance(0.125));
        assert_eq!(clock.remaining(), 0.25);
    }

    #[test]
    fn test_small_frames_accumulate() {
        let mut clock = SimulationClock::default();
        let fired = (0..11).filter(|_| clock.advance(0.02)).count();

        // 0.2 s needs at least ten 0.02 s frames
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_large_delta_fires_once() {
        let mut clock = SimulationClock::new(0.2).unwrap();

        assert!(clock.advance(5.0));
        // The overshoot is discarded rather than carried into the next call
        assert_eq!(clock.remaining(), 0.2);
        assert!(!clock.advance(0.1));
    }

    #[test]
    fn test_zero_delta_never_fires() {
        let mut clock = SimulationClock::new(0.2).unwrap();
        for _ in 0..100 {
            assert!(!clock.advance(0.0));
        }
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = SimulationClock::new(0.2).unwrap();
        clock.advance(0.1);
        let before = clock.remaining();

        assert!(!clock.advance(-1.0));
        assert!(!clock.advance(f32::NAN));
        assert_eq!(clock.remaining(), before);
    }

    #[test]
    fn test_reset_restores_full_interval() {
        let mut clock = SimulationClock::new(0.5).unwrap();
        clock.advance(0.3);
        clock.reset();
        assert_eq!(clock.remaining(), 0.5);
        assert_eq!(clock.interval(), 0.5);
    }
}
