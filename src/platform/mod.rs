//! Host frame timing
//!
//! The host calls [`FrameDriver::on_frame`] from its display-refresh callback
//! with a monotonically increasing timestamp. The driver turns consecutive
//! timestamps into simulation deltas, slowed by [`FRAME_TIME_SCALE`].

use crate::consts::FRAME_TIME_SCALE;
use crate::session::Session;
use crate::sim::TickOutcome;

#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    last_time_ms: Option<f64>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulation delta for a refresh at `time_ms`; `None` on the first frame
    pub fn delta(&mut self, time_ms: f64) -> Option<f32> {
        let previous = self.last_time_ms.replace(time_ms)?;
        let elapsed = (time_ms - previous).max(0.0) as f32;
        Some(elapsed / FRAME_TIME_SCALE)
    }

    /// Feed one refresh into the session. The callback keeps firing while
    /// paused; only `Playing` sessions advance.
    pub fn on_frame(&mut self, session: &mut Session, time_ms: f64) -> TickOutcome {
        let Some(dt) = self.delta(time_ms) else {
            return TickOutcome::Inactive;
        };
        if !session.state().is_playing() {
            return TickOutcome::Inactive;
        }
        session.advance(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::persistence::MemoryStore;
    use crate::sim::{ManualClock, Viewport};

    #[test]
    fn test_first_frame_has_no_delta() {
        let mut driver = FrameDriver::new();
        assert_eq!(driver.delta(1000.0), None);
        let dt = driver.delta(1012.0).unwrap();
        assert!((dt - 10.0).abs() < 1e-4);
        // Clock skew never produces a negative delta
        assert_eq!(driver.delta(1000.0), Some(0.0));
    }

    #[test]
    fn test_only_playing_sessions_advance() {
        let mut session = Session::new(
            GameConfig::without_spawns(),
            Viewport::default(),
            3,
            Box::new(ManualClock::new(0)),
            Box::new(MemoryStore::new()),
        );
        let mut driver = FrameDriver::new();

        assert_eq!(driver.on_frame(&mut session, 0.0), TickOutcome::Inactive);
        assert_eq!(driver.on_frame(&mut session, 16.0), TickOutcome::Inactive);

        session.start();
        assert!(matches!(
            driver.on_frame(&mut session, 32.0),
            TickOutcome::Running(_)
        ));
        assert!(session.state().player.distance > 0.0);

        session.pause();
        let distance = session.state().player.distance;
        assert_eq!(driver.on_frame(&mut session, 48.0), TickOutcome::Inactive);
        assert_eq!(session.state().player.distance, distance);
    }
}
