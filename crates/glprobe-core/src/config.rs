//! Context requirements for a probe run.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// An OpenGL ES context version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ContextVersion {
    pub major: u8,
    pub minor: u8,
}

impl ContextVersion {
    /// The version the built-in shaders are written against.
    pub const GLES_3_1: ContextVersion = ContextVersion { major: 3, minor: 1 };

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl Default for ContextVersion {
    fn default() -> Self {
        Self::GLES_3_1
    }
}

impl fmt::Display for ContextVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid context version `{0}`, expected MAJOR.MINOR with major 2 or 3")]
pub struct ParseVersionError(String);

impl FromStr for ContextVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError(s.to_owned());
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        let major: u8 = major.parse().map_err(|_| invalid())?;
        let minor: u8 = minor.parse().map_err(|_| invalid())?;
        // EGL only knows how to request ES2 and ES3 class configs.
        if !(2..=3).contains(&major) {
            return Err(invalid());
        }
        Ok(Self { major, minor })
    }
}

/// What the backend must provide before any shader is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeConfig {
    pub context_version: ContextVersion,
    /// Bits per channel for each of R, G, B and A.
    pub color_bits: u8,
    /// EGL device to open on platforms that enumerate devices.
    pub device_index: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            context_version: ContextVersion::GLES_3_1,
            color_bits: 8,
            device_index: 0,
        }
    }
}
