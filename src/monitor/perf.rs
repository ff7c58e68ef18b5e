//! src/monitor/perf.rs
//!
//! Frame-driven performance monitor.
//!
//! Two cadences share one loop: every frame updates the render time, and
//! every window of at least one second recomputes FPS and samples memory.
//! The loop is an explicit `Idle -> Running -> Stopped` state machine; once
//! stopped, frames are ignored and no further samples are produced.

use std::collections::VecDeque;
use std::time::Duration;

use super::heap::HeapProbe;
use super::timing::calculate_fps;

const FPS_WINDOW: Duration = Duration::from_secs(1);
const BYTES_PER_MB: f64 = 1_048_576.0;
/// Frame stamps kept for the short-horizon FPS estimate.
const RECENT_FRAMES: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricSnapshot {
    pub fps: u32,
    pub memory_usage_mb: f64,
    pub render_time_ms: f64,
    /// Supplied by the caller; the monitor never counts points itself.
    pub data_point_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum MonitorState {
    Idle,
    Running {
        last_frame: Duration,
        window_start: Duration,
        frames: u32,
    },
    Stopped,
}

pub struct PerformanceMonitor {
    state: MonitorState,
    heap: HeapProbe,
    fps: u32,
    memory_usage_mb: f64,
    render_time_ms: f64,
    recent: VecDeque<Duration>,
}

impl PerformanceMonitor {
    pub fn new(heap: HeapProbe) -> Self {
        Self {
            state: MonitorState::Idle,
            heap,
            fps: 0,
            memory_usage_mb: 0.0,
            render_time_ms: 0.0,
            recent: VecDeque::with_capacity(RECENT_FRAMES),
        }
    }

    /// Begin observing frames. Only an idle monitor can start.
    pub fn start(&mut self, now: Duration) {
        if self.state != MonitorState::Idle {
            tracing::debug!(state = ?self.state, "performance monitor start ignored");
            return;
        }
        self.state = MonitorState::Running {
            last_frame: now,
            window_start: now,
            frames: 0,
        };
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            tracing::debug!(fps = self.fps, "performance monitor stopped");
        }
        self.state = MonitorState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, MonitorState::Running { .. })
    }

    /// Record a frame at `now`. Returns `true` when this frame closed an FPS
    /// window. A monitor that is not running ignores the call.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        let MonitorState::Running {
            last_frame,
            window_start,
            frames,
        } = self.state
        else {
            return false;
        };

        let delta_ms = now.saturating_sub(last_frame).as_secs_f64() * 1_000.0;
        self.render_time_ms = (delta_ms * 100.0).round() / 100.0;
        let frames = frames + 1;

        if self.recent.len() == RECENT_FRAMES {
            self.recent.pop_front();
        }
        self.recent.push_back(now);

        let elapsed = now.saturating_sub(window_start);
        if elapsed < FPS_WINDOW {
            self.state = MonitorState::Running {
                last_frame: now,
                window_start,
                frames,
            };
            return false;
        }

        let elapsed_ms = elapsed.as_secs_f64() * 1_000.0;
        self.fps = (f64::from(frames) * 1_000.0 / elapsed_ms).round() as u32;
        match self.heap.used_bytes() {
            Ok(bytes) => self.memory_usage_mb = (bytes as f64 / BYTES_PER_MB).round(),
            Err(e) => tracing::trace!(error = %e, "memory sample skipped"),
        }
        self.state = MonitorState::Running {
            last_frame: now,
            window_start: now,
            frames: 0,
        };
        true
    }

    /// Short-horizon FPS over the most recent frames.
    pub fn recent_fps(&self) -> u32 {
        calculate_fps(&self.recent)
    }

    pub fn snapshot(&self, data_point_count: usize) -> MetricSnapshot {
        MetricSnapshot {
            fps: self.fps,
            memory_usage_mb: self.memory_usage_mb,
            render_time_ms: self.render_time_ms,
            data_point_count,
        }
    }
}
