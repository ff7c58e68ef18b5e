//! src/app.rs
//!
//! Live streaming dashboard in the terminal.
//!
//! # Overview
//!
//! A synthetic time series is generated on a fixed interval into a bounded
//! buffer and painted onto a braille canvas at frame cadence, next to
//! performance metrics (FPS, frame time, memory) and the newest samples.
//!
//! This loop is the host for the dashboard session: each iteration it
//! 1. rebinds the drawing surface if the chart area changed (debounced),
//! 2. fires due stream ticks (`DashboardSession::advance`),
//! 3. runs the frame boundary (`DashboardSession::frame`), which paints the
//!    latest pending request into the display list,
//! 4. draws all panels, then handles keys and sleeps out the frame.
//!
//! # Running
//!
//! ```text
//! cargo run --release                   # defaults
//! cargo run --release -- dashboard.toml # with a config file
//! ```
//!
//! Set `log_file` in the config to capture tracing output; the filter is
//! read from `DASHBOARD_LOG` (default `info`).
//!
//! # Keyboard Controls
//!
//! - **Tab**: Cycle focus among configured charts.
//! - **v**: Show/hide the focused chart.
//! - **k**: Cycle the focused chart's kind (line, bar, scatter, heatmap).
//! - **g**: Switch generator (random walk, seasonal, spike, trend).
//! - **p**: Pause/resume the stream.
//! - **q**: Quit and restore terminal state.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame, layout::Rect};

use crate::config::DashboardConfig;
use crate::monitor::HeapProbe;
use crate::monitor::timing::Debounce;
use crate::panels::{CanvasPanel, ChartListPanel, MetricsPanel, SamplesPanel, TitlePanel};
use crate::render::SurfaceBinding;
use crate::session::DashboardSession;
use crate::stream::Strategy;
use crate::ui::{DashboardAreas, Panel};

/// Quiet period after the last size change before the surface is rebuilt.
const RESIZE_SETTLE: Duration = Duration::from_millis(150);

fn strategy_label(s: Strategy) -> &'static str {
    match s {
        Strategy::RandomWalk => "random walk",
        Strategy::Seasonal => "seasonal",
        Strategy::Spike => "spike",
        Strategy::Trend => "trend",
    }
}

fn wall_clock_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Tracks which canvas rect the session surface is bound to.
struct SurfaceTracker {
    bound: Option<Rect>,
    wanted: Option<Rect>,
    settle: Debounce,
}

impl SurfaceTracker {
    fn new() -> Self {
        Self {
            bound: None,
            wanted: None,
            settle: Debounce::new(RESIZE_SETTLE),
        }
    }

    /// Bind immediately the first time, then only once resizing has settled.
    fn sync(&mut self, session: &mut DashboardSession, canvas: Rect, now: Duration) {
        if self.bound.is_none() {
            self.bind(session, canvas);
            return;
        }
        if self.bound == Some(canvas) {
            self.wanted = None;
        } else if self.wanted != Some(canvas) {
            self.wanted = Some(canvas);
            self.settle.trigger(now);
        }
        if self.settle.fire(now) {
            if let Some(rect) = self.wanted.take() {
                self.bind(session, rect);
            }
        }
    }

    fn bind(&mut self, session: &mut DashboardSession, rect: Rect) {
        tracing::debug!(?rect, "binding chart surface");
        session.resize(SurfaceBinding::braille(rect));
        self.bound = Some(rect);
    }
}

fn draw_ui(f: &mut Frame<'_>, areas: &DashboardAreas, session: &DashboardSession, focused: usize) {
    TitlePanel::new(
        "Live Data Stream",
        strategy_label(session.strategy()),
        session.is_paused(),
    )
    .draw(f, areas.title);

    let chart_title = session
        .charts()
        .get(focused)
        .and_then(|c| c.title.clone())
        .unwrap_or_else(|| "Chart".to_string());
    CanvasPanel::new(session.display_list(), &chart_title).draw(f, areas.chart);

    MetricsPanel::new(
        session.metrics(),
        session.recent_fps(),
        session.is_rendering(),
        session.has_pending_render(),
    )
    .draw(f, areas.metrics);
    SamplesPanel::new(session.snapshot()).draw(f, areas.samples);
    ChartListPanel::new(session.charts(), focused).draw(f, areas.charts_list);
}

/// Apply one key press. Returns `false` when the app should exit.
fn handle_key(code: KeyCode, session: &mut DashboardSession, focused: &mut usize, now: Duration) -> bool {
    let chart_count = session.charts().len();
    match code {
        KeyCode::Char('q') => return false,
        KeyCode::Tab if chart_count > 0 => *focused = (*focused + 1) % chart_count,
        KeyCode::Char('v') => session.update_chart(*focused, |c| c.visible = !c.visible),
        KeyCode::Char('k') => session.update_chart(*focused, |c| c.kind = c.kind.next_kind()),
        KeyCode::Char('g') => {
            session.cycle_generator();
        }
        KeyCode::Char('p') => {
            let paused = session.toggle_pause(now);
            tracing::info!(paused, "stream toggled");
        }
        _ => {}
    }
    true
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    session: &mut DashboardSession,
    frame_time: Duration,
    clock: Instant,
) -> Result<()> {
    let mut surface = SurfaceTracker::new();
    let mut focused = 0usize;
    let mut running = true;

    while running {
        let frame_start = Instant::now();
        let now = clock.elapsed();

        let size = terminal.size()?;
        let areas = DashboardAreas::split(Rect::new(0, 0, size.width, size.height));
        surface.sync(session, areas.canvas(), now);

        session.advance(now);
        session.frame(now);

        terminal.draw(|f| draw_ui(f, &areas, session, focused))?;

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !handle_key(key.code, session, &mut focused, clock.elapsed()) {
                    running = false;
                }
            }
        }

        let elapsed = frame_start.elapsed();
        if running && elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
    Ok(())
}

pub fn run(config: DashboardConfig) -> Result<()> {
    let clock = Instant::now();
    let mut session =
        DashboardSession::create(&config, HeapProbe::detect(), clock.elapsed(), wall_clock_ms());

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut session, config.frame_time(), clock);
    session.dispose();
    ratatui::restore();
    result
}
