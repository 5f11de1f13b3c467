//! Count-up animation for numeric stats.
//!
//! The value is a pure function of elapsed time:
//!
//! ```text
//! progress = clamp(elapsed / duration, 0, 1)
//! eased    = 1 - (1 - progress)^3
//! current  = floor(eased * target)
//! ```
//!
//! [`CountUp::frame`] applies it per render-loop frame; [`CountUp::animate`]
//! is the minimal scheduling loop on top, gated by a trigger signal such
//! as a reveal latch. Once started an animation always runs to completion
//! and never restarts.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

/// Default animation length
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2400);

/// Animation length used by the stats band
pub const STATS_DURATION: Duration = Duration::from_millis(2200);

/// Roughly one display refresh
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Cubic ease-out for linear progress `p` in 0-1
pub fn ease_out_cubic(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(3)
}

/// Linear progress after `elapsed_ms` of a `duration_ms` animation
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Interpolated value after `elapsed_ms`
pub fn value_at(elapsed_ms: f64, duration_ms: f64, target: u64) -> u64 {
    let p = progress(elapsed_ms, duration_ms);
    if p >= 1.0 {
        return target;
    }
    let value = (ease_out_cubic(p) * target as f64).floor() as u64;
    value.min(target)
}

/// Result of processing one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Trigger not yet seen; nothing happened
    Idle,

    /// Animating; schedule another frame
    Running,

    /// Reached the target; schedule nothing further
    Complete,
}

/// One count-up animator
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    duration: Duration,
    /// Timestamp (ms) of the first processed frame after the trigger
    started_at: Option<f64>,
    current: u64,
    complete: bool,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started_at: None,
            current: 0,
            complete: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Process a frame at `timestamp_ms`.
    ///
    /// Frames are ignored until `trigger` is first seen true. After that
    /// `trigger` no longer matters.
    pub fn frame(&mut self, timestamp_ms: f64, trigger: bool) -> Frame {
        if self.complete {
            return Frame::Complete;
        }

        let start = match self.started_at {
            Some(start) => start,
            None if trigger => {
                self.started_at = Some(timestamp_ms);
                timestamp_ms
            }
            None => return Frame::Idle,
        };

        let duration_ms = self.duration.as_secs_f64() * 1000.0;
        let elapsed = timestamp_ms - start;

        // Never step backwards, even if a frame timestamp does.
        self.current = self.current.max(value_at(elapsed, duration_ms, self.target));

        if progress(elapsed, duration_ms) >= 1.0 {
            self.current = self.target;
            self.complete = true;
            Frame::Complete
        } else {
            Frame::Running
        }
    }

    /// Run the animation on a `frame_interval` ticker.
    ///
    /// Waits for `trigger` to become true, then calls `render` with the
    /// current value on every frame until completion. Returns the final
    /// value. If the trigger's sender goes away before firing, returns
    /// without animating. Drive an instance either with `frame` or with
    /// `animate`, not both: this loop uses its own time base.
    pub async fn animate<F>(
        &mut self,
        mut trigger: watch::Receiver<bool>,
        frame_interval: Duration,
        mut render: F,
    ) -> u64
    where
        F: FnMut(u64),
    {
        if self.complete {
            return self.current;
        }

        if !self.is_started() {
            let fired = trigger.wait_for(|fired| *fired).await.is_ok();
            if !fired {
                return self.current;
            }
        }

        let origin = Instant::now();
        let mut ticker = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let now_ms = origin.elapsed().as_secs_f64() * 1000.0;
            let status = self.frame(now_ms, true);
            render(self.current);

            if status == Frame::Complete {
                return self.current;
            }
        }
    }
}

/// A labelled statistic that counts up when revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub value: u64,
    pub suffix: String,
    pub label: String,
}

impl Stat {
    pub fn new(value: u64, suffix: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value,
            suffix: suffix.into(),
            label: label.into(),
        }
    }

    /// Animator for this stat with the stats-band duration
    pub fn counter(&self) -> CountUp {
        CountUp::new(self.value, STATS_DURATION)
    }

    /// Rendered figure, e.g. `500+`
    pub fn display(&self, current: u64) -> String {
        format!("{}{}", current, self.suffix)
    }
}
