use std::time::{Duration, Instant};

use tracing::info;

/// Run lifecycle of the poll scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Throttles full detection passes to a configurable frame cadence and
/// enforces the maximum-runtime policy.
///
/// The host invokes [`PollScheduler::on_frame`] once per rendered frame; the
/// scheduler answers whether a detection pass is due this frame. Once the
/// configured runtime is exceeded the state flips to `Stopped` permanently
/// and every later invocation is a cheap no-op — the host keeps calling
/// harmlessly.
#[derive(Debug)]
pub struct PollScheduler {
    frames: u64,
    poll_interval: u32,
    started: Instant,
    max_runtime: Option<Duration>,
    state: RunState,
}

impl PollScheduler {
    /// `max_runtime_secs` of 0 means unlimited.
    pub fn new(poll_interval: u32, max_runtime_secs: u64) -> Self {
        Self {
            frames: 0,
            poll_interval: poll_interval.max(1),
            started: Instant::now(),
            max_runtime: (max_runtime_secs > 0).then(|| Duration::from_secs(max_runtime_secs)),
            state: RunState::Running,
        }
    }

    /// Record one host frame; true when a detection pass is due.
    pub fn on_frame(&mut self) -> bool {
        self.on_frame_at(Instant::now())
    }

    fn on_frame_at(&mut self, now: Instant) -> bool {
        if self.state == RunState::Stopped {
            return false;
        }

        if let Some(limit) = self.max_runtime {
            if now.duration_since(self.started) >= limit {
                info!(
                    "Maximum runtime of {:?} reached after {} frames, stopping detection",
                    limit, self.frames
                );
                self.state = RunState::Stopped;
                return false;
            }
        }

        self.frames += 1;
        self.frames % self.poll_interval as u64 == 0
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// External stop signal; same cooperative mechanism as the runtime limit.
    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes_after(scheduler: &mut PollScheduler, frames: u32) -> u32 {
        (0..frames).filter(|_| scheduler.on_frame()).count() as u32
    }

    #[test]
    fn test_cadence_119_frames_one_pass() {
        let mut scheduler = PollScheduler::new(60, 0);
        // Pass at frame 60, none at 119.
        assert_eq!(passes_after(&mut scheduler, 119), 1);
    }

    #[test]
    fn test_cadence_120_frames_two_passes() {
        let mut scheduler = PollScheduler::new(60, 0);
        assert_eq!(passes_after(&mut scheduler, 120), 2);
    }

    #[test]
    fn test_no_pass_before_first_interval() {
        let mut scheduler = PollScheduler::new(60, 0);
        assert_eq!(passes_after(&mut scheduler, 59), 0);
        assert!(scheduler.on_frame());
    }

    #[test]
    fn test_interval_one_passes_every_frame() {
        let mut scheduler = PollScheduler::new(1, 0);
        assert_eq!(passes_after(&mut scheduler, 10), 10);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut scheduler = PollScheduler::new(0, 0);
        assert!(scheduler.on_frame());
    }

    #[test]
    fn test_max_runtime_flips_to_stopped() {
        let mut scheduler = PollScheduler::new(1, 5);
        let past_limit = scheduler.started + Duration::from_secs(6);

        assert!(!scheduler.on_frame_at(past_limit));
        assert_eq!(scheduler.state(), RunState::Stopped);

        // Stopped is permanent; further frames do nothing.
        assert!(!scheduler.on_frame_at(past_limit + Duration::from_secs(1)));
        assert_eq!(scheduler.frames(), 0);
    }

    #[test]
    fn test_runs_freely_under_the_limit() {
        let mut scheduler = PollScheduler::new(1, 3600);
        let soon = scheduler.started + Duration::from_secs(1);

        assert!(scheduler.on_frame_at(soon));
        assert_eq!(scheduler.state(), RunState::Running);
    }

    #[test]
    fn test_external_stop() {
        let mut scheduler = PollScheduler::new(1, 0);
        assert!(scheduler.on_frame());

        scheduler.stop();
        assert!(!scheduler.on_frame());
        assert_eq!(scheduler.state(), RunState::Stopped);
    }
}
