//! Built-in GLSL ES 3.10 shader pair exercised by the probe.
//!
//! The fragment stage deliberately pulls in a std140 uniform block and a
//! sampler with an explicit binding, the two features that trip up drivers
//! this probe was written for.

use std::fmt;

use gl::types::GLenum;
use serde::Serialize;

/// Vertex stage: passes position and texture coordinates straight through.
pub const VERTEX_SHADER: &str = r#"
#version 310 es

layout(location = 0) in vec4 vertex_pos;
layout(location = 1) in vec2 vertex_tex0;
layout(location = 0) out vec2 input_TexCoord;

void main()
{
    gl_Position = vertex_pos;
    input_TexCoord = vertex_tex0;
}
"#;

/// Fragment stage: samples `YTex` and transforms it through the
/// `ColorTransformBlock` uniform block.
pub const FRAGMENT_SHADER: &str = r#"
#version 310 es

precision mediump float;
precision highp int;

layout(std140) uniform ColorTransformBlock
{
mat4 yuvCoef;
} colorTransform;

layout(binding = 0) uniform highp sampler2D YTex;

layout(location = 0) in highp vec2 input_TexCoord;
layout(location = 0) out highp vec4 _entryPointOutput;

mat4 dummy(mat4 wrap) { return wrap; }

void main()
{
_entryPointOutput = vec4(texture(YTex, input_TexCoord).x) * dummy(colorTransform.yuvCoef);
}
"#;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `glCreateShader`.
    pub fn gl_kind(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The vertex/fragment pair a validator compiles and links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderSources {
    pub const BUILTIN: ShaderSources = ShaderSources {
        vertex: VERTEX_SHADER,
        fragment: FRAGMENT_SHADER,
    };

    /// Source text for `stage`.
    pub fn get(&self, stage: ShaderStage) -> &'static str {
        match stage {
            ShaderStage::Vertex => self.vertex,
            ShaderStage::Fragment => self.fragment,
        }
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::BUILTIN
    }
}
