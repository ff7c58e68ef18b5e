//! src/schedule/frame.rs
//!
//! Coalescing render scheduler.
//!
//! At most one draw request is pending at a time. Scheduling again before the
//! next frame boundary replaces the pending request; the host runs whatever is
//! pending exactly once per frame via [`FrameScheduler::run_frame`].

use std::cell::Cell;
use std::rc::Rc;

use crate::error::Result;
use crate::render::Surface;

/// A deferred paint pass.
pub type DrawFn = Box<dyn FnOnce(&mut dyn Surface) -> Result<()>>;

/// Read handle on the scheduler's "is rendering" state. Clones observe the
/// same flag, so a draw function can check it from inside its own body.
#[derive(Clone, Debug, Default)]
pub struct RenderingFlag(Rc<Cell<bool>>);

impl RenderingFlag {
    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// Resets the flag on every exit path, unwinding included.
struct RenderGuard<'a>(&'a Cell<bool>);

impl<'a> RenderGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[derive(Default)]
pub struct FrameScheduler {
    pending: Option<DrawFn>,
    rendering: RenderingFlag,
    /// Requests replaced before their frame fired.
    coalesced: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `draw` for the next frame, discarding any earlier pending
    /// request. Returns `true` if one was discarded.
    pub fn schedule_render<F>(&mut self, draw: F) -> bool
    where
        F: FnOnce(&mut dyn Surface) -> Result<()> + 'static,
    {
        let replaced = self.pending.replace(Box::new(draw)).is_some();
        if replaced {
            self.coalesced += 1;
        }
        replaced
    }

    /// Frame boundary: run the pending request, if any.
    pub fn run_frame(&mut self, surface: &mut dyn Surface) -> Option<Result<()>> {
        let draw = self.pending.take()?;
        let _guard = RenderGuard::enter(&self.rendering.0);
        Some(draw(surface))
    }

    /// Drop the pending request so it never runs. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_rendering(&self) -> bool {
        self.rendering.get()
    }

    #[cfg(test)]
    pub fn rendering_flag(&self) -> RenderingFlag {
        self.rendering.clone()
    }

    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if self.cancel() {
            tracing::trace!("pending frame cancelled on teardown");
        }
    }
}
