//! Logging setup.
//!
//! Library code only emits `tracing` events. Hosts that want them printed call
//! [`init`] once; later calls are no-ops.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "diagram_canvas=info";

static INIT: OnceCell<()> = OnceCell::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns false if logging was already initialised, either by an earlier
/// call or because another global subscriber is installed.
pub fn init() -> bool {
    let mut installed = false;
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_ok();
    });
    installed
}
