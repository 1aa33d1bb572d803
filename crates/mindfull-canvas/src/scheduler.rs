use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// A simple cancellation token for cooperative cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Work run once per frame.
pub trait FrameTask {
    fn on_frame(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

/// Drives a [`FrameTask`] one frame at a time until its token is cancelled.
///
/// The scheduler never stops on its own; hosts that tear the canvas down
/// cancel the token, and the loop ends at the next frame boundary.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    token: CancellationToken,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: CancellationToken) -> Self {
        Self { token, frames: 0 }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run a single frame unless cancelled.
    pub fn step<T: FrameTask + ?Sized>(&mut self, task: &mut T) -> FrameStatus {
        if self.token.is_cancelled() {
            return FrameStatus::Stopped;
        }
        task.on_frame();
        self.frames += 1;
        FrameStatus::Continue
    }

    /// Run up to `count` frames back to back. Returns how many ran.
    pub fn run_frames<T: FrameTask + ?Sized>(&mut self, task: &mut T, count: u64) -> u64 {
        let start = self.frames;
        for _ in 0..count {
            if self.step(task) == FrameStatus::Stopped {
                break;
            }
        }
        self.frames - start
    }

    /// Run frames `interval` apart until cancelled. Returns how many ran.
    pub fn run_paced<T: FrameTask + ?Sized>(&mut self, task: &mut T, interval: Duration) -> u64 {
        let start = self.frames;
        tracing::debug!(interval_ms = interval.as_millis() as u64, "Frame loop started");
        while self.step(task) == FrameStatus::Continue {
            std::thread::sleep(interval);
        }
        let ran = self.frames - start;
        tracing::debug!(frames = ran, "Frame loop stopped");
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        frames: u32,
        stop_after: Option<(u32, CancellationToken)>,
    }

    impl FrameTask for Counter {
        fn on_frame(&mut self) {
            self.frames += 1;
            if let Some((limit, token)) = &self.stop_after
                && self.frames >= *limit
            {
                token.cancel();
            }
        }
    }

    #[test]
    fn test_run_frames() {
        let mut scheduler = FrameScheduler::new();
        let mut task = Counter {
            frames: 0,
            stop_after: None,
        };
        assert_eq!(scheduler.run_frames(&mut task, 5), 5);
        assert_eq!(task.frames, 5);
        assert_eq!(scheduler.frames(), 5);
    }

    #[test]
    fn test_cancelled_scheduler_runs_nothing() {
        let token = CancellationToken::new();
        let mut scheduler = FrameScheduler::with_token(token.clone());
        token.cancel();

        let mut task = Counter {
            frames: 0,
            stop_after: None,
        };
        assert_eq!(scheduler.step(&mut task), FrameStatus::Stopped);
        assert_eq!(scheduler.run_frames(&mut task, 10), 0);
        assert!(!scheduler.is_running());
        assert_eq!(task.frames, 0);
    }

    #[test]
    fn test_paced_loop_stops_on_cancel() {
        let mut scheduler = FrameScheduler::new();
        let mut task = Counter {
            frames: 0,
            stop_after: Some((3, scheduler.cancellation_token())),
        };
        let ran = scheduler.run_paced(&mut task, Duration::from_millis(1));
        assert_eq!(ran, 3);
        assert_eq!(task.frames, 3);
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let mut scheduler = FrameScheduler::new();
        let token = scheduler.cancellation_token();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            token.cancel();
        });

        let mut task = Counter {
            frames: 0,
            stop_after: None,
        };
        scheduler.run_paced(&mut task, Duration::from_millis(1));
        handle.join().unwrap();
        assert!(task.frames > 0);
        assert!(!scheduler.is_running());
    }
}
