//! EGL backend for the GLES shader link probe.
//!
//! Use [`validate`] for the pass/fail answer, or [`validate_with`] for the
//! full [`ProbeReport`]. Native hosts call [`glprobe_link_program`] through
//! the C ABI.
//!
//! ### Warning
//!
//! Only one probe may run at a time. Concurrent invocations share the default
//! display and the global `gl` function table.

use glprobe_core::{ProbeConfig, ProbeFailure, ProbeReport, Validator};
use tracing::error;

mod context;
mod raw_gl;

pub use context::{EglBackend, EglSession};
pub use glprobe_core::LOG_TARGET;
pub use raw_gl::RawGl;

/// Compile and link the built-in shader pair on a fresh ES 3.1 context.
pub fn validate() -> bool {
    Validator::new(EglBackend::default()).validate()
}

/// Run one probe invocation with `config`.
pub fn validate_with(config: &ProbeConfig) -> Result<ProbeReport, ProbeFailure> {
    Validator::new(EglBackend::new(config.clone())).run()
}

/// C ABI entry point. Returns `true` if the built-in program linked.
///
/// Installs the default log subscriber on first use. Panics do not cross the
/// FFI boundary; they are logged and reported as `false`.
#[no_mangle]
pub extern "C" fn glprobe_link_program() -> bool {
    glprobe_core::logging::init();

    std::panic::catch_unwind(validate).unwrap_or_else(|_| {
        error!(target: LOG_TARGET, "probe panicked");
        false
    })
}
