//! Surfaceless EGL context acquisition.
//!
//! Each [`EglBackend::open`] call creates a display connection, picks the
//! first config satisfying the requested ES version and RGBA sizes, creates a
//! context and makes it current without a surface. [`EglSession`] owns all of
//! it; dropping the session makes the context not current, destroys it and
//! releases this session's reference to the display. Whether glutin then calls
//! `eglTerminate` depends on `EGL_KHR_display_reference` support.

use glprobe_core::{ContextError, ContextVersion, ProbeBackend, ProbeConfig, ProbeSession};
use glutin::api::egl::context::PossiblyCurrentContext;
use glutin::api::egl::display::Display;
use glutin::config::{Api, ColorBufferType, ConfigSurfaceTypes, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::prelude::*;
use tracing::{debug, trace};

use crate::raw_gl::RawGl;
use crate::LOG_TARGET;

/// Opens a fresh EGL context per probe invocation.
#[derive(Debug, Clone, Default)]
pub struct EglBackend {
    config: ProbeConfig,
}

impl EglBackend {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }
}

impl ProbeBackend for EglBackend {
    type Session = EglSession;

    fn open(&mut self) -> Result<EglSession, ContextError> {
        EglSession::open(&self.config)
    }
}

/// A context current on the calling thread, plus the display it came from.
///
/// Dropping it releases the context on every path, including a failed
/// [`EglSession::open`] once the context has been made current.
pub struct EglSession {
    gl: RawGl,
    // Always `Some` until drop.
    context: Option<PossiblyCurrentContext>,
    display: Display,
}

impl EglSession {
    pub fn open(config: &ProbeConfig) -> Result<Self, ContextError> {
        Self::open_with(config, RawGl::load_entry_points)
    }

    /// [`EglSession::open`] with a custom GL entry point loader.
    pub(crate) fn open_with(
        config: &ProbeConfig,
        load_gl: impl FnOnce(&Display) -> bool,
    ) -> Result<Self, ContextError> {
        let display = open_display(config)?;
        let egl_version = display.version_string();
        debug!(target: LOG_TARGET, "EGL display: {egl_version}");

        let template = ConfigTemplateBuilder::new()
            .with_api(renderable_api(config.context_version))
            .with_buffer_type(ColorBufferType::Rgb {
                r_size: config.color_bits,
                g_size: config.color_bits,
                b_size: config.color_bits,
            })
            .with_alpha_size(config.color_bits)
            .with_surface_type(ConfigSurfaceTypes::empty())
            .build();

        let gl_config = unsafe { display.find_configs(template) }
            .map_err(|err| {
                debug!(target: LOG_TARGET, "eglChooseConfig failed: {err}");
                ContextError::NoMatchingConfig
            })?
            .next()
            .ok_or(ContextError::NoMatchingConfig)?;

        let version = config.context_version;
        let attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(
                version.major,
                version.minor,
            ))))
            .build(None);

        let context = unsafe { display.create_context(&gl_config, &attributes) }
            .map_err(|err| ContextError::CreateContext(err.to_string()))?
            .make_current_surfaceless()
            .map_err(|err| ContextError::MakeCurrent(err.to_string()))?;

        // Owned by the session from here on so that `Drop` releases it.
        let session = Self {
            gl: RawGl::new(),
            context: Some(context),
            display,
        };

        if !load_gl(&session.display) {
            return Err(ContextError::CreateContext(
                "GL shader entry points are unavailable".into(),
            ));
        }

        trace!(target: LOG_TARGET, "ES {version} context current");

        Ok(session)
    }

    pub fn display(&self) -> &Display {
        &self.display
    }
}

impl ProbeSession for EglSession {
    type Api = RawGl;

    fn api(&self) -> &RawGl {
        &self.gl
    }
}

impl Drop for EglSession {
    fn drop(&mut self) {
        if let Some(context) = self.context.take() {
            if let Err(err) = context.make_not_current() {
                debug!(target: LOG_TARGET, "eglMakeCurrent(EGL_NO_CONTEXT) failed: {err}");
            }
        }
        trace!(target: LOG_TARGET, "EGL context released");
        #[cfg(test)]
        tests::RELEASED.with(|released| released.set(released.get() + 1));
    }
}

fn renderable_api(version: ContextVersion) -> Api {
    if version.major >= 3 {
        Api::GLES3
    } else {
        Api::GLES2
    }
}

#[cfg(target_os = "android")]
fn open_display(_config: &ProbeConfig) -> Result<Display, ContextError> {
    use raw_window_handle::{AndroidDisplayHandle, RawDisplayHandle};

    let handle = RawDisplayHandle::Android(AndroidDisplayHandle::new());
    unsafe { Display::new(handle) }.map_err(|err| ContextError::Display(err.to_string()))
}

#[cfg(not(target_os = "android"))]
fn open_display(config: &ProbeConfig) -> Result<Display, ContextError> {
    use glutin::api::egl::device::Device;

    let device = Device::query_devices()
        .map_err(|err| ContextError::Display(err.to_string()))?
        .nth(config.device_index)
        .ok_or_else(|| {
            ContextError::Display(format!("no EGL device at index {}", config.device_index))
        })?;
    debug!(target: LOG_TARGET, "EGL device: {:?}", device.name());

    unsafe { Display::with_device(&device, None) }
        .map_err(|err| ContextError::Display(err.to_string()))
}
