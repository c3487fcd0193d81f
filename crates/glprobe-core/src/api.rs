//! Seams between the validator and the graphics driver.

use serde::Serialize;

use crate::error::ContextError;
use crate::shaders::ShaderStage;

/// A GL object name as returned by `glCreateShader` / `glCreateProgram`.
///
/// Zero is never a valid object.
pub type ObjectName = u32;

/// The subset of the GLES shader API the probe needs.
///
/// Implementations are only reachable through a live [`ProbeSession`], so
/// every method may assume a current context on the calling thread.
pub trait ShaderApi {
    /// Create an empty shader object for `stage`. Returns `0` on failure.
    fn create_shader(&self, stage: ShaderStage) -> ObjectName;

    /// Upload `source` and compile it.
    fn compile_shader(&self, shader: ObjectName, source: &str);

    /// `GL_COMPILE_STATUS` of the last compile.
    fn compile_status(&self, shader: ObjectName) -> bool;

    /// Compiler output, without the trailing NUL. Empty when the driver
    /// reports no log.
    fn shader_info_log(&self, shader: ObjectName) -> String;

    fn delete_shader(&self, shader: ObjectName);

    /// Create an empty program object. Returns `0` on failure.
    fn create_program(&self) -> ObjectName;

    fn attach_shader(&self, program: ObjectName, shader: ObjectName);

    fn link_program(&self, program: ObjectName);

    /// `GL_LINK_STATUS` of the last link.
    fn link_status(&self, program: ObjectName) -> bool;

    /// Linker output, without the trailing NUL. Empty when the driver
    /// reports no log.
    fn program_info_log(&self, program: ObjectName) -> String;

    fn delete_program(&self, program: ObjectName);

    /// Identification strings of the driver behind the context.
    fn driver_info(&self) -> DriverInfo {
        DriverInfo::default()
    }
}

/// A current graphics context, held for exactly one invocation.
///
/// Dropping the session releases the context and its display.
pub trait ProbeSession {
    type Api: ShaderApi;

    fn api(&self) -> &Self::Api;
}

/// Something that can hand out fresh [`ProbeSession`]s.
pub trait ProbeBackend {
    type Session: ProbeSession;

    /// Acquire a display, pick a config and make a new context current.
    fn open(&mut self) -> Result<Self::Session, ContextError>;
}

/// `glGetString` values for the current context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriverInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shading_language_version: String,
}
