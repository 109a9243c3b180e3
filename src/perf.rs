//! Performance instrumentation for the pointer-event hot paths.
//!
//! Pointer handlers run once per input event and must finish well inside a
//! frame. Wrap them in `profile_scope!` to get a `warn!` when one overruns.
//!
//! ```ignore
//! fn pointer_move(&mut self, event: PointerEvent) {
//!     profile_scope!("pointer_move");
//!     // ...
//! }
//! ```
//!
//! The macro is free unless the `profiling` feature is on. `ScopedTimer` and
//! `measure_and_log` can be used directly for always-on timing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

// ============================================================================
// Constants
// ============================================================================

/// One frame at 60 FPS
pub const FRAME_BUDGET_MS: f64 = 16.67;

/// Threshold used by `profile_scope!` without an explicit one
pub const PROFILING_THRESHOLD_MS: f64 = 1.0;

/// Global counter for unique timer IDs
static TIMER_COUNTER: AtomicU64 = AtomicU64::new(0);

#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Scoped Timer
// ============================================================================

/// RAII timer; logs on drop when the scope took longer than its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    timer_id: u64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        let timer_id = TIMER_COUNTER.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            timer_id,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Timer with the one-frame threshold.
    pub fn with_frame_budget(name: &'static str) -> Self {
        Self::new(name, FRAME_BUDGET_MS)
    }

    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, PROFILING_THRESHOLD_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> u64 {
        self.timer_id
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}

/// Run `f`, warn if it took longer than `threshold_ms`, and return its result.
pub fn measure_and_log<T, F: FnOnce() -> T>(name: &str, threshold_ms: f64, f: F) -> T {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if elapsed_ms > threshold_ms {
        warn!(
            operation = name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            "Slow operation"
        );
    }
    result
}
