//! Probes against a real EGL implementation.
//!
//! These need a GPU (or Mesa's software rasteriser) exposing an EGL device
//! with ES 3.1 support, so they are ignored by default:
//!
//! ```text
//! cargo test -p glprobe-egl -- --ignored
//! ```

use glprobe_core::{ContextError, ContextVersion, ProbeConfig, ProbeError, Validator};
use glprobe_egl::{validate, validate_with, EglBackend};

#[test]
#[ignore = "requires an EGL device with OpenGL ES 3.1"]
fn builtin_program_links() {
    assert!(validate());
}

#[test]
#[ignore = "requires an EGL device with OpenGL ES 3.1"]
fn report_names_the_driver() {
    let report = validate_with(&ProbeConfig::default()).expect("program links");
    assert!(!report.driver.version.is_empty());
    assert!(report.driver.version.contains("OpenGL ES"));
}

#[test]
#[ignore = "requires an EGL device with OpenGL ES 3.1"]
fn consecutive_invocations_are_independent() {
    let mut validator = Validator::new(EglBackend::default());
    for _ in 0..8 {
        assert!(validator.validate());
    }
}

#[test]
#[ignore = "requires an EGL implementation"]
fn missing_device_is_a_context_error() {
    let config = ProbeConfig {
        device_index: usize::MAX,
        ..ProbeConfig::default()
    };

    let failure = validate_with(&config).expect_err("no such device");

    assert!(matches!(
        failure.error,
        ProbeError::Context(ContextError::Display(_))
    ));
    assert!(failure.diagnostics.is_empty());
}

#[test]
#[ignore = "requires an EGL implementation"]
fn impossible_channel_depth_has_no_config() {
    let config = ProbeConfig {
        context_version: ContextVersion::GLES_3_1,
        color_bits: 64,
        ..ProbeConfig::default()
    };

    let failure = validate_with(&config).expect_err("no 64-bit RGBA config");

    assert!(matches!(
        failure.error,
        ProbeError::Context(ContextError::NoMatchingConfig)
    ));
}
