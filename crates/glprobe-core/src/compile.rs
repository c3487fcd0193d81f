//! Shader compilation and program linking with scoped object ownership.

use serde::Serialize;
use tracing::{error, info};

use crate::api::{ObjectName, ShaderApi};
use crate::error::{CompileFailure, ProbeError, Result};
use crate::shaders::ShaderStage;
use crate::LOG_TARGET;

/// Where a diagnostic log came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "stage")]
pub enum LogOrigin {
    Compile(ShaderStage),
    Link,
}

/// A non-empty compiler or linker log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticLog {
    pub origin: LogOrigin,
    pub text: String,
}

/// A compiled shader object, deleted on drop.
pub struct ShaderObject<'a, A: ShaderApi + ?Sized> {
    api: &'a A,
    name: ObjectName,
    stage: ShaderStage,
}

impl<A: ShaderApi + ?Sized> ShaderObject<'_, A> {
    pub fn name(&self) -> ObjectName {
        self.name
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<A: ShaderApi + ?Sized> Drop for ShaderObject<'_, A> {
    fn drop(&mut self) {
        self.api.delete_shader(self.name);
    }
}

/// A program object, deleted on drop.
///
/// Attached shaders are only flagged for deletion by GL until the program
/// goes away, so the program must be dropped for their storage to be freed.
pub struct ProgramObject<'a, A: ShaderApi + ?Sized> {
    api: &'a A,
    name: ObjectName,
}

impl<A: ShaderApi + ?Sized> ProgramObject<'_, A> {
    pub fn name(&self) -> ObjectName {
        self.name
    }
}

impl<A: ShaderApi + ?Sized> Drop for ProgramObject<'_, A> {
    fn drop(&mut self) {
        self.api.delete_program(self.name);
    }
}

/// Compile `source` as a `stage` shader.
///
/// The compiler log is recorded in `diagnostics` and logged whenever it is
/// non-empty, even if compilation succeeded.
pub fn compile_shader<'a, A: ShaderApi + ?Sized>(
    api: &'a A,
    stage: ShaderStage,
    source: &str,
    diagnostics: &mut Vec<DiagnosticLog>,
) -> Result<ShaderObject<'a, A>> {
    if source.is_empty() {
        error!(target: LOG_TARGET, "Failed to compile shader: {stage} source is empty");
        return Err(ProbeError::Compile {
            stage,
            reason: CompileFailure::EmptySource,
        });
    }

    let name = api.create_shader(stage);
    if name == 0 {
        error!(target: LOG_TARGET, "glCreateShader returned no {stage} shader object");
        return Err(ProbeError::Compile {
            stage,
            reason: CompileFailure::NoShaderObject,
        });
    }
    let shader = ShaderObject { api, name, stage };

    api.compile_shader(name, source);

    let log = api.shader_info_log(name);
    if !log.is_empty() {
        info!(target: LOG_TARGET, "Shader compile log:\n{log}");
        diagnostics.push(DiagnosticLog {
            origin: LogOrigin::Compile(stage),
            text: log,
        });
    }

    if !api.compile_status(name) {
        error!(target: LOG_TARGET, "Failed to compile {stage} shader");
        return Err(ProbeError::Compile {
            stage,
            reason: CompileFailure::Rejected,
        });
    }

    Ok(shader)
}

/// Attach `shaders` to a new program and link it.
///
/// The linker log is recorded and logged whenever it is non-empty.
pub fn link_program<'a, A: ShaderApi + ?Sized>(
    api: &'a A,
    shaders: &[&ShaderObject<'_, A>],
    diagnostics: &mut Vec<DiagnosticLog>,
) -> Result<ProgramObject<'a, A>> {
    let name = api.create_program();
    if name == 0 {
        error!(target: LOG_TARGET, "glCreateProgram returned no program object");
        return Err(ProbeError::Link);
    }
    let program = ProgramObject { api, name };

    for shader in shaders {
        api.attach_shader(name, shader.name());
    }

    api.link_program(name);

    let log = api.program_info_log(name);
    if !log.is_empty() {
        error!(target: LOG_TARGET, "Program link log:\n{log}");
        diagnostics.push(DiagnosticLog {
            origin: LogOrigin::Link,
            text: log,
        });
    }

    if !api.link_status(name) {
        error!(target: LOG_TARGET, "Program link failed");
        return Err(ProbeError::Link);
    }

    Ok(program)
}
