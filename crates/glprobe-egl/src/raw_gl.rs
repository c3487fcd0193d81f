//! [`ShaderApi`] over the global `gl` function table.

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use glprobe_core::{DriverInfo, ObjectName, ShaderApi, ShaderStage};
use glutin::api::egl::display::Display;
use glutin::display::GlDisplay;

/// GL entry points for the context current on this thread. Only
/// [`crate::EglSession`] creates one, and it hands it out only after
/// [`RawGl::load_entry_points`] succeeded.
#[derive(Debug)]
pub struct RawGl {
    // Tied to the thread the context is current on.
    _not_send: PhantomData<*const ()>,
}

impl RawGl {
    pub(crate) fn new() -> Self {
        Self {
            _not_send: PhantomData,
        }
    }

    /// Resolve GL entry points through `display`.
    ///
    /// Returns `false` if the driver does not expose the shader API.
    pub(crate) fn load_entry_points(display: &Display) -> bool {
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => display.get_proc_address(&symbol),
            Err(_) => ptr::null(),
        });

        gl::CreateShader::is_loaded()
            && gl::CreateProgram::is_loaded()
            && gl::LinkProgram::is_loaded()
            && gl::GetShaderInfoLog::is_loaded()
            && gl::GetProgramInfoLog::is_loaded()
    }
}

type GetObjectiv = unsafe fn(GLuint, GLenum, *mut GLint);
type GetInfoLog = unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);

/// # Safety
///
/// A context must be current and `object` must be a name accepted by both
/// query functions.
unsafe fn read_info_log(object: GLuint, get_iv: GetObjectiv, get_log: GetInfoLog) -> String {
    let mut len: GLint = 0;
    get_iv(object, gl::INFO_LOG_LENGTH, &mut len);
    if len <= 0 {
        return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    get_log(object, len, &mut written, buf.as_mut_ptr().cast());
    buf.truncate(written.clamp(0, len) as usize);

    String::from_utf8_lossy(&buf)
        .trim_end_matches('\0')
        .to_owned()
}

/// # Safety
///
/// A context must be current.
unsafe fn gl_string(name: GLenum) -> String {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned()
}

// SAFETY (all methods): a `RawGl` only exists while its session's context is
// current on the calling thread, and it cannot leave that thread.
impl ShaderApi for RawGl {
    fn create_shader(&self, stage: ShaderStage) -> ObjectName {
        unsafe { gl::CreateShader(stage.gl_kind()) }
    }

    fn compile_shader(&self, shader: ObjectName, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = GLint::try_from(source.len()).unwrap_or(GLint::MAX);
        unsafe {
            gl::ShaderSource(shader, 1, &ptr, &len);
            gl::CompileShader(shader);
        }
    }

    fn compile_status(&self, shader: ObjectName) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status) };
        status != 0
    }

    fn shader_info_log(&self, shader: ObjectName) -> String {
        unsafe { read_info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog) }
    }

    fn delete_shader(&self, shader: ObjectName) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> ObjectName {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: ObjectName, shader: ObjectName) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: ObjectName) {
        unsafe { gl::LinkProgram(program) }
    }

    fn link_status(&self, program: ObjectName) -> bool {
        let mut status: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut status) };
        status != 0
    }

    fn program_info_log(&self, program: ObjectName) -> String {
        unsafe { read_info_log(program, gl::GetProgramiv, gl::GetProgramInfoLog) }
    }

    fn delete_program(&self, program: ObjectName) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn driver_info(&self) -> DriverInfo {
        unsafe {
            DriverInfo {
                vendor: gl_string(gl::VENDOR),
                renderer: gl_string(gl::RENDERER),
                version: gl_string(gl::VERSION),
                shading_language_version: gl_string(gl::SHADING_LANGUAGE_VERSION),
            }
        }
    }
}
