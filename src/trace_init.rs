//! Opt-in JSON tracing for hosts that embed the engine.
//!
//! Built only with the `trace` feature; otherwise [`init_tracing`] does
//! nothing. Events go to `lipi-trace.jsonl` in the directory the host passes.

use std::path::Path;

/// Log file created under the host's log directory.
pub const TRACE_FILE: &str = "lipi-trace.jsonl";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "lipi_engine=debug,lipi_core=debug";

#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    use std::sync::Once;

    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        let (writer, flush_guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, TRACE_FILE));
        // The writer thread must outlive every span; the library is never unloaded.
        std::mem::forget(flush_guard);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host that already installed a subscriber keeps it.
        let _ = tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_writer(writer)
            .try_init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) {}
