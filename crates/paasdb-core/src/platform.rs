use std::fmt;
use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;

use crate::env::EnvSnapshot;
use crate::error::{PaasDbError, Result};

/// Where dotcloud publishes the per-service environment for an application.
pub const DOTCLOUD_ENV_FILE: &str = "/home/dotcloud/environment.json";

/// Classification of the hosting platform.
///
/// Only the outcome matters to resolution: `Dotcloud` triggers the
/// supplementary-environment merge, everything else does not.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Heroku,
    OpenShift,
    Dotcloud,
    Unknown,
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformKind::Heroku => write!(f, "heroku"),
            PlatformKind::OpenShift => write!(f, "openshift"),
            PlatformKind::Dotcloud => write!(f, "dotcloud"),
            PlatformKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Capability that classifies an environment snapshot as a platform.
///
/// Swappable so a consumer with better platform knowledge (or a test) can
/// substitute its own predicate.
pub trait PlatformDetect {
    fn detect(&self, env: &EnvSnapshot) -> PlatformKind;
}

/// Default detector, driven by well-known marker variables only.
///
/// Heroku sets `DYNO` on every dyno; OpenShift prefixes its injected
/// variables with `OPENSHIFT_`; dotcloud prefixes with `DOTCLOUD_`. No
/// filesystem probes, so detection is a pure function of the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvPlatformDetector;

impl PlatformDetect for EnvPlatformDetector {
    fn detect(&self, env: &EnvSnapshot) -> PlatformKind {
        if env.get("DYNO").is_some() {
            return PlatformKind::Heroku;
        }
        if env.keys().any(|k| k.starts_with("OPENSHIFT_")) {
            return PlatformKind::OpenShift;
        }
        if env.keys().any(|k| k.starts_with("DOTCLOUD_")) {
            return PlatformKind::Dotcloud;
        }
        PlatformKind::Unknown
    }
}

/// Source of supplementary environment entries merged into the working
/// snapshot before matching.
pub trait EnvOverlay {
    fn load(&self) -> Result<IndexMap<String, String>>;
}

/// The dotcloud environment file: a JSON object of string values at a
/// platform-defined path.
#[derive(Debug, Clone)]
pub struct DotcloudEnvFile {
    path: PathBuf,
}

impl DotcloudEnvFile {
    /// Use a file at a non-standard location (tests, local reproduction).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for DotcloudEnvFile {
    fn default() -> Self {
        Self::at(DOTCLOUD_ENV_FILE)
    }
}

impl EnvOverlay for DotcloudEnvFile {
    fn load(&self) -> Result<IndexMap<String, String>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| PaasDbError::EnvironmentLoad {
            message: format!("cannot read {}: {}", self.path.display(), e),
        })?;

        let value: Value =
            serde_json::from_str(&raw).map_err(|e| PaasDbError::EnvironmentLoad {
                message: format!("{} is not valid JSON: {}", self.path.display(), e),
            })?;

        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(PaasDbError::EnvironmentLoad {
                    message: format!(
                        "{} holds a JSON {}, expected an object",
                        self.path.display(),
                        json_type(&other)
                    ),
                });
            }
        };

        let mut entries = IndexMap::with_capacity(object.len());
        for (key, value) in object {
            match value {
                Value::String(s) => {
                    entries.insert(key, s);
                }
                other => {
                    return Err(PaasDbError::EnvironmentLoad {
                        message: format!(
                            "{}: key '{}' holds a JSON {}, expected a string",
                            self.path.display(),
                            key,
                            json_type(&other)
                        ),
                    });
                }
            }
        }
        Ok(entries)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
