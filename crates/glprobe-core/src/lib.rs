//! Platform-independent core of the GLES shader link probe.
//!
//! The probe answers a single question: can the driver behind a fresh
//! OpenGL ES 3.1 context compile and link one specific shader pair? It opens
//! a context, compiles the built-in vertex and fragment stages, links them,
//! releases everything and reports pass/fail.
//!
//! # Overview
//!
//! - [`ProbeBackend`] / [`ProbeSession`] / [`ShaderApi`] are the seams a
//!   platform backend implements (see the `glprobe-egl` crate).
//! - [`Validator`] drives one invocation per [`Validator::run`] call.
//! - [`compile::compile_shader`] and [`compile::link_program`] hand out
//!   guards that delete their GL object on drop.
//! - [`shaders`] holds the fixed GLSL ES sources.
//!
//! Compiler and linker logs are always logged when non-empty, on success as
//! well as on failure. Drivers frequently warn while still reporting success.

pub mod api;
pub mod compile;
pub mod config;
pub mod error;
pub mod logging;
pub mod shaders;
pub mod validator;

#[cfg(test)]
mod mock;

/// `tracing` target for every event the probe emits.
pub const LOG_TARGET: &str = "glprobe";

pub use api::{DriverInfo, ObjectName, ProbeBackend, ProbeSession, ShaderApi};
pub use compile::{DiagnosticLog, LogOrigin};
pub use config::{ContextVersion, ProbeConfig};
pub use error::{CompileFailure, ContextError, ProbeError};
pub use shaders::{ShaderSources, ShaderStage};
pub use validator::{ProbeFailure, ProbeReport, Validator};
