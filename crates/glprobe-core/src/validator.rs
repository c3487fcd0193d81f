//! The probe itself: open a context, compile both stages, link, tear down.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::api::{DriverInfo, ProbeBackend, ProbeSession, ShaderApi};
use crate::compile::{compile_shader, link_program, DiagnosticLog};
use crate::error::{ProbeError, Result};
use crate::shaders::{ShaderSources, ShaderStage};
use crate::LOG_TARGET;

/// Outcome of an invocation whose program linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub driver: DriverInfo,
    /// Every non-empty compiler and linker log, in the order produced.
    pub diagnostics: Vec<DiagnosticLog>,
}

/// Outcome of an invocation that stopped early.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ProbeFailure {
    pub error: ProbeError,
    /// Logs collected before the failure, including the failing stage's.
    pub diagnostics: Vec<DiagnosticLog>,
}

/// Compiles and links a fixed shader pair against contexts from `B`.
///
/// Each call to [`Validator::run`] opens its own session and releases every
/// GL object and the context before returning.
pub struct Validator<B> {
    backend: B,
    sources: ShaderSources,
}

impl<B: ProbeBackend> Validator<B> {
    /// Validator for the built-in shader pair.
    pub fn new(backend: B) -> Self {
        Self::with_sources(backend, ShaderSources::BUILTIN)
    }

    pub fn with_sources(backend: B, sources: ShaderSources) -> Self {
        Self { backend, sources }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn sources(&self) -> &ShaderSources {
        &self.sources
    }

    /// Pass/fail form of [`Validator::run`]. The reason for a failure is only
    /// visible in the log stream.
    pub fn validate(&mut self) -> bool {
        self.run().is_ok()
    }

    pub fn run(&mut self) -> std::result::Result<ProbeReport, ProbeFailure> {
        let mut diagnostics = Vec::new();
        match self.probe(&mut diagnostics) {
            Ok(driver) => {
                info!(target: LOG_TARGET, renderer = %driver.renderer, "Program linked");
                Ok(ProbeReport {
                    driver,
                    diagnostics,
                })
            }
            Err(error) => Err(ProbeFailure { error, diagnostics }),
        }
    }

    fn probe(&mut self, diagnostics: &mut Vec<DiagnosticLog>) -> Result<DriverInfo> {
        // Dropped last, after every GL object below.
        let session = self.backend.open().map_err(|err| {
            error!(target: LOG_TARGET, "{err}");
            ProbeError::from(err)
        })?;
        let api = session.api();

        let driver = api.driver_info();
        debug!(
            target: LOG_TARGET,
            vendor = %driver.vendor,
            renderer = %driver.renderer,
            version = %driver.version,
            glsl = %driver.shading_language_version,
            "Context current"
        );

        let vertex = compile_shader(api, ShaderStage::Vertex, self.sources.vertex, diagnostics)?;
        let fragment = compile_shader(
            api,
            ShaderStage::Fragment,
            self.sources.fragment,
            diagnostics,
        )?;
        let _program = link_program(api, &[&vertex, &fragment], diagnostics)?;

        Ok(driver)
    }
}
