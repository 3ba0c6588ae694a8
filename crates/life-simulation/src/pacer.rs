//! Monotonic frame pacing
//!
//! Deadlines advance by one interval per frame, so time spent in the sweep is
//! absorbed instead of being added on top of a flat sleep. A frame that
//! finishes more than one interval late re-anchors the schedule to "now"
//! rather than bursting through the missed frames.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const FRAME_WINDOW: usize = 100;

#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    /// Scheduled start of the next frame
    next_frame: Instant,
    last_finish: Instant,
    frame_times: VecDeque<Duration>,
    overruns: u64,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self::new_at(interval, Instant::now())
    }

    /// Pacer whose first frame is due at `start`
    pub fn new_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_frame: start,
            last_finish: start,
            frame_times: VecDeque::with_capacity(FRAME_WINDOW),
            overruns: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next frame should start
    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Time left until the next frame is due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }

    /// Frames that finished more than one interval late
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Mark the current frame as finished at `now` and schedule the next one
    pub fn finish_frame(&mut self, now: Instant) -> Instant {
        if self.frame_times.len() == FRAME_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times
            .push_back(now.saturating_duration_since(self.last_finish));
        self.last_finish = now;

        self.next_frame += self.interval;
        if now.saturating_duration_since(self.next_frame) > self.interval {
            self.overruns += 1;
            if self.overruns.is_power_of_two() {
                log::warn!(
                    "Frame overran its {:.1}ms budget ({} overruns so far)",
                    self.interval.as_secs_f64() * 1000.0,
                    self.overruns
                );
            }
            self.next_frame = now;
        }
        self.next_frame
    }

    /// Finish the current frame and sleep until the next one is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        let next = self.finish_frame(now);
        let remaining = next.saturating_duration_since(now);
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }

    /// Restart the schedule with the next frame due at `start`.
    ///
    /// Frame-time history and the overrun count are kept.
    pub fn reset(&mut self, start: Instant) {
        self.next_frame = start;
        self.last_finish = start;
    }

    /// Average frame rate over the recent window
    pub fn fps(&self) -> f32 {
        let total: Duration = self.frame_times.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.frame_times.len() as f32 / total.as_secs_f32()
    }

    /// Average frame time in milliseconds over the recent window
    pub fn average_frame_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: Duration = self.frame_times.iter().sum();
        total.as_secs_f32() * 1000.0 / self.frame_times.len() as f32
    }
}
