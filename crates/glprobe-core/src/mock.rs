//! Scriptable in-memory driver used by the unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::api::{DriverInfo, ObjectName, ProbeBackend, ProbeSession, ShaderApi};
use crate::error::ContextError;
use crate::shaders::ShaderStage;

/// Outcomes the mock driver reports.
#[derive(Debug, Clone)]
pub(crate) struct Script {
    pub vertex_compiles: bool,
    pub fragment_compiles: bool,
    pub vertex_log: String,
    pub fragment_log: String,
    pub links: bool,
    pub link_log: String,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            vertex_compiles: true,
            fragment_compiles: true,
            vertex_log: String::new(),
            fragment_log: String::new(),
            links: true,
            link_log: String::new(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    next_name: ObjectName,
    shaders: BTreeMap<ObjectName, ShaderStage>,
    programs: BTreeSet<ObjectName>,
    attachments: BTreeMap<ObjectName, Vec<ObjectName>>,
    shaders_created: usize,
    compiled: Vec<ShaderStage>,
    sessions_open: usize,
    sessions_opened: usize,
}

impl State {
    fn allocate(&mut self) -> ObjectName {
        self.next_name += 1;
        self.next_name
    }
}

#[derive(Clone)]
pub(crate) struct MockGl {
    script: Script,
    state: Rc<RefCell<State>>,
}

impl MockGl {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            state: Rc::default(),
        }
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn shaders_created(&self) -> usize {
        self.state.borrow().shaders_created
    }

    /// Stages passed to `compile_shader`, in call order.
    pub fn compiled(&self) -> Vec<ShaderStage> {
        self.state.borrow().compiled.clone()
    }

    pub fn attached(&self, program: ObjectName) -> Vec<ObjectName> {
        self.state
            .borrow()
            .attachments
            .get(&program)
            .cloned()
            .unwrap_or_default()
    }

    pub fn sessions_open(&self) -> usize {
        self.state.borrow().sessions_open
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.borrow().sessions_opened
    }

    fn stage_of(&self, shader: ObjectName) -> ShaderStage {
        self.state.borrow().shaders[&shader]
    }
}

impl ShaderApi for MockGl {
    fn create_shader(&self, stage: ShaderStage) -> ObjectName {
        let mut state = self.state.borrow_mut();
        let name = state.allocate();
        state.shaders.insert(name, stage);
        state.shaders_created += 1;
        name
    }

    fn compile_shader(&self, shader: ObjectName, _source: &str) {
        let stage = self.stage_of(shader);
        self.state.borrow_mut().compiled.push(stage);
    }

    fn compile_status(&self, shader: ObjectName) -> bool {
        match self.stage_of(shader) {
            ShaderStage::Vertex => self.script.vertex_compiles,
            ShaderStage::Fragment => self.script.fragment_compiles,
        }
    }

    fn shader_info_log(&self, shader: ObjectName) -> String {
        match self.stage_of(shader) {
            ShaderStage::Vertex => self.script.vertex_log.clone(),
            ShaderStage::Fragment => self.script.fragment_log.clone(),
        }
    }

    fn delete_shader(&self, shader: ObjectName) {
        let removed = self.state.borrow_mut().shaders.remove(&shader);
        assert!(removed.is_some(), "shader {shader} deleted twice");
    }

    fn create_program(&self) -> ObjectName {
        let mut state = self.state.borrow_mut();
        let name = state.allocate();
        state.programs.insert(name);
        name
    }

    fn attach_shader(&self, program: ObjectName, shader: ObjectName) {
        self.state
            .borrow_mut()
            .attachments
            .entry(program)
            .or_default()
            .push(shader);
    }

    fn link_program(&self, _program: ObjectName) {}

    fn link_status(&self, _program: ObjectName) -> bool {
        self.script.links
    }

    fn program_info_log(&self, _program: ObjectName) -> String {
        self.script.link_log.clone()
    }

    fn delete_program(&self, program: ObjectName) {
        let removed = self.state.borrow_mut().programs.remove(&program);
        assert!(removed, "program {program} deleted twice");
    }

    fn driver_info(&self) -> DriverInfo {
        DriverInfo {
            vendor: "glprobe".into(),
            renderer: "mock".into(),
            version: "OpenGL ES 3.1 mock".into(),
            shading_language_version: "OpenGL ES GLSL ES 3.10".into(),
        }
    }
}

pub(crate) struct MockSession {
    gl: MockGl,
}

impl ProbeSession for MockSession {
    type Api = MockGl;

    fn api(&self) -> &MockGl {
        &self.gl
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        let mut state = self.gl.state.borrow_mut();
        assert!(
            state.shaders.is_empty() && state.programs.is_empty(),
            "session closed with live GL objects"
        );
        state.sessions_open -= 1;
    }
}

/// Backend handing out sessions that share one [`MockGl`] ledger.
pub(crate) struct MockBackend {
    pub gl: MockGl,
    pub fail_open: Option<ContextError>,
}

impl MockBackend {
    pub fn new(script: Script) -> Self {
        Self {
            gl: MockGl::new(script),
            fail_open: None,
        }
    }

    /// Sessions opened after this call run under `script`.
    pub fn set_script(&mut self, script: Script) {
        self.gl.script = script;
    }

    pub fn without_config(script: Script) -> Self {
        Self {
            gl: MockGl::new(script),
            fail_open: Some(ContextError::NoMatchingConfig),
        }
    }
}

impl ProbeBackend for MockBackend {
    type Session = MockSession;

    fn open(&mut self) -> Result<MockSession, ContextError> {
        if let Some(err) = &self.fail_open {
            return Err(err.clone());
        }
        let mut state = self.gl.state.borrow_mut();
        state.sessions_open += 1;
        state.sessions_opened += 1;
        drop(state);
        Ok(MockSession {
            gl: self.gl.clone(),
        })
    }
}

#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return everything it logged.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let writer = CaptureWriter::default();
    let sink = writer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&writer.0.lock().unwrap()).into_owned();
    (out, logs)
}
