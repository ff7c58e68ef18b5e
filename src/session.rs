//! src/session.rs
//!
//! One dashboard session: owns the stream buffer, its generator and timer,
//! the frame scheduler, the performance monitor, and the drawing surface.
//!
//! The host loop drives it with two calls per iteration:
//! - `advance(now)`: fires due timer ticks, appending to the buffer and
//!   requesting a repaint;
//! - `frame(now)`: the frame boundary, feeding the monitor and running the
//!   pending paint against the current surface.
//!
//! Appends always finish before the paint that observes them, because the
//! paint closure captures a snapshot taken after the last append of the tick.
//! `dispose` (also run on drop) cancels the timer and any pending paint.

use std::rc::Rc;
use std::time::Duration;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::monitor::timing::{Throttle, measure};
use crate::monitor::{HeapProbe, MetricSnapshot, PerformanceMonitor};
use crate::render::{
    ChartConfig, DisplayList, RenderStyle, SurfaceBinding, draw_dashboard, setup_surface,
};
use crate::schedule::FrameScheduler;
use crate::stream::{IntervalTimer, PointGenerator, Snapshot, Strategy, StreamBuffer};

/// How often frame metrics are written to the log.
const METRICS_LOG_PERIOD: Duration = Duration::from_secs(5);

pub struct DashboardSession {
    buffer: StreamBuffer,
    strategy: Strategy,
    generator: Box<dyn PointGenerator>,
    seed: Option<u64>,
    timer: IntervalTimer,
    scheduler: FrameScheduler,
    monitor: PerformanceMonitor,
    surface: Option<DisplayList>,
    charts: Rc<Vec<ChartConfig>>,
    style: Rc<RenderStyle>,
    max_points: Option<usize>,
    /// Wall-clock milliseconds at monotonic time zero.
    origin_ms: i64,
    metrics_log: Throttle,
    disposed: bool,
}

impl DashboardSession {
    /// Mount a session at monotonic time `now` / wall-clock `wall_ms`: fill
    /// the buffer, arm the timer, and start the monitor.
    pub fn create(config: &DashboardConfig, heap: HeapProbe, now: Duration, wall_ms: i64) -> Self {
        let mut generator = config.generator.build(config.seed);
        let buffer = measure("initial fill", || {
            StreamBuffer::initialize(config.capacity, config.interval(), wall_ms, generator.as_mut())
        });

        let mut timer = IntervalTimer::new(config.interval());
        timer.start(now);
        let memory_metric = heap.is_supported();
        let mut monitor = PerformanceMonitor::new(heap);
        monitor.start(now);

        tracing::info!(
            capacity = buffer.capacity(),
            interval_ms = timer.period().as_millis() as u64,
            generator = generator.name(),
            memory_metric,
            "dashboard session created"
        );

        Self {
            buffer,
            strategy: config.generator,
            generator,
            seed: config.seed,
            timer,
            scheduler: FrameScheduler::new(),
            monitor,
            surface: None,
            charts: Rc::new(config.charts.clone()),
            style: Rc::new(RenderStyle::default()),
            max_points: config.max_points,
            origin_ms: wall_ms - now.as_millis() as i64,
            metrics_log: Throttle::new(METRICS_LOG_PERIOD),
            disposed: false,
        }
    }

    /// Rebind the surface after a resize and repaint. A target with no area
    /// leaves the session without a surface; frames are skipped until the
    /// next successful resize.
    pub fn resize(&mut self, binding: SurfaceBinding) {
        if self.disposed {
            return;
        }
        match setup_surface(binding) {
            Ok(surface) => {
                tracing::debug!(backing = ?surface.backing(), "surface bound");
                self.surface = Some(surface);
            }
            Err(e) => {
                tracing::warn!(error = %e, area = ?binding.area, "surface lost");
                self.surface = None;
            }
        }
        self.request_render();
    }

    /// Fire due timer ticks. Returns the number of samples appended.
    pub fn advance(&mut self, now: Duration) -> usize {
        if self.disposed {
            return 0;
        }
        // A long stall cannot usefully append more than a full buffer.
        let due = (self.timer.due(now) as usize).min(self.buffer.capacity());
        if due == 0 {
            return 0;
        }
        let wall_ms = self.origin_ms + now.as_millis() as i64;
        for _ in 0..due {
            self.buffer.append(self.generator.as_mut(), wall_ms);
        }
        self.request_render();
        due
    }

    /// Frame boundary. Returns `true` if a paint ran to completion.
    pub fn frame(&mut self, now: Duration) -> bool {
        if self.disposed {
            return false;
        }
        if self.monitor.on_frame(now) && self.metrics_log.ready(now) {
            let m = self.metrics();
            tracing::info!(
                fps = m.fps,
                memory_mb = m.memory_usage_mb,
                render_ms = m.render_time_ms,
                points = m.data_point_count,
                generated = self.buffer.generated(),
                "frame metrics"
            );
        }

        let Some(surface) = self.surface.as_mut() else {
            if self.scheduler.has_pending() {
                tracing::trace!("{}; frame skipped", DashboardError::SurfaceUnavailable);
            }
            return false;
        };
        match self.scheduler.run_frame(surface) {
            Some(Ok(())) => true,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "paint failed; frame skipped");
                false
            }
            None => false,
        }
    }

    /// Queue a repaint of the current snapshot, replacing any pending one.
    pub fn request_render(&mut self) {
        if self.disposed {
            return;
        }
        let snapshot = self.buffer.snapshot();
        let charts = Rc::clone(&self.charts);
        let style = Rc::clone(&self.style);
        let max_points = self.max_points;
        self.scheduler.schedule_render(move |surface| {
            measure("paint", || {
                draw_dashboard(surface, snapshot.iter(), &charts, max_points, &style)
            });
            Ok(())
        });
    }

    /// Cancel the timer and any pending paint, and stop the monitor. Safe to
    /// call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.timer.cancel();
        let dropped = self.scheduler.cancel();
        self.monitor.stop();
        self.disposed = true;
        tracing::info!(
            pending_paint_dropped = dropped,
            coalesced_paints = self.scheduler.coalesced(),
            "dashboard session disposed"
        );
    }

    /// Swap the whole chart set; takes effect on the next paint.
    pub fn set_charts(&mut self, charts: Vec<ChartConfig>) {
        self.charts = Rc::new(charts);
        self.request_render();
    }

    /// Rebuild the chart set with `edit` applied to chart `index`.
    pub fn update_chart(&mut self, index: usize, edit: impl FnOnce(&mut ChartConfig)) {
        let mut charts = self.charts.as_ref().clone();
        if let Some(chart) = charts.get_mut(index) {
            edit(chart);
            self.set_charts(charts);
        }
    }

    /// Switch to the next generator strategy; the stream continues from the
    /// newest sample.
    pub fn cycle_generator(&mut self) -> Strategy {
        self.strategy = self.strategy.next_strategy();
        self.generator = self.strategy.build(self.seed);
        tracing::info!(generator = self.generator.name(), "generator switched");
        self.strategy
    }

    /// Pause or resume the stream timer. Returns `true` if now paused.
    pub fn toggle_pause(&mut self, now: Duration) -> bool {
        if self.disposed {
            return true;
        }
        if self.timer.is_active() {
            self.timer.cancel();
            true
        } else {
            self.timer.start(now);
            false
        }
    }

    pub fn is_paused(&self) -> bool {
        !self.timer.is_active()
    }

    pub fn metrics(&self) -> MetricSnapshot {
        self.monitor.snapshot(self.buffer.len())
    }

    pub fn recent_fps(&self) -> u32 {
        self.monitor.recent_fps()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.buffer.snapshot()
    }

    pub fn charts(&self) -> &[ChartConfig] {
        &self.charts
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn display_list(&self) -> Option<&DisplayList> {
        self.surface.as_ref()
    }

    pub fn is_rendering(&self) -> bool {
        self.scheduler.is_rendering()
    }

    pub fn has_pending_render(&self) -> bool {
        self.scheduler.has_pending()
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
