//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install the global tracing subscriber. Safe to call repeatedly; only the
/// first call installs anything.
///
/// Test runs (detected via `CARGO_TARGET_TMPDIR`) log at DEBUG through the
/// capturing test writer, so index-build and request diagnostics surface in
/// failing test output. Everything else logs compact INFO to stderr, with
/// `RUST_LOG` overriding either default.
pub fn init() {
    INIT.call_once(|| {
        let is_test = std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .compact();

        if is_test {
            // `set_default` hands back a guard that uninstalls on drop;
            // leak it so the capturing subscriber stays installed for the
            // whole test process.
            let guard = builder.with_test_writer().finish().set_default();
            std::mem::forget(guard);
        } else if let Err(e) = builder.with_writer(std::io::stderr).try_init() {
            eprintln!("Failed to initialize tracing: {e}");
        }
    });
}
