//! src/monitor/heap.rs
//!
//! Optional heap introspection, resolved once at startup.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::error::{DashboardError, Result};

type Reader = Box<dyn FnMut() -> Option<u64>>;

/// Whether the host can report memory in use, and how to read it.
pub enum HeapProbe {
    Supported(Reader),
    Unsupported,
}

impl HeapProbe {
    /// Probe the host for this process's resident memory. Falls back to
    /// `Unsupported` when the process cannot be resolved.
    pub fn detect() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::info!(error = e, "heap statistics unavailable; memory metric stays at 0");
                return HeapProbe::Unsupported;
            }
        };
        let mut sys = System::new();
        if resident_bytes(&mut sys, pid).is_none() {
            tracing::info!(%pid, "process not found; memory metric stays at 0");
            return HeapProbe::Unsupported;
        }
        tracing::debug!(%pid, "heap statistics available");
        Self::from_fn(move || resident_bytes(&mut sys, pid))
    }

    pub fn from_fn<F>(reader: F) -> Self
    where
        F: FnMut() -> Option<u64> + 'static,
    {
        HeapProbe::Supported(Box::new(reader))
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, HeapProbe::Supported(_))
    }

    pub fn used_bytes(&mut self) -> Result<u64> {
        match self {
            HeapProbe::Supported(read) => {
                read().ok_or(DashboardError::HostFeatureUnavailable("heap statistics"))
            }
            HeapProbe::Unsupported => Err(DashboardError::HostFeatureUnavailable("heap statistics")),
        }
    }
}

/// Refresh only the memory of `pid` and read its resident set size in bytes.
fn resident_bytes(sys: &mut System, pid: Pid) -> Option<u64> {
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );
    sys.process(pid).map(|p| p.memory())
}
