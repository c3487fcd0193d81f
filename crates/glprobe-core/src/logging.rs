//! Process-wide `tracing` subscriber setup.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

use crate::LOG_TARGET;

static INIT: OnceCell<()> = OnceCell::new();

/// Directive used when `RUST_LOG` is unset or unparsable.
pub fn default_directive() -> String {
    format!("{LOG_TARGET}=info")
}

/// Install a formatting subscriber filtered by `RUST_LOG`.
///
/// Safe to call repeatedly; only the first call has an effect. If the host
/// process already installed a global subscriber, that one is kept.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
