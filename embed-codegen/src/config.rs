/// Run configuration: what to embed, where to write it, and how the
/// generated declaration is shaped.
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

use crate::key::KeyDeriver;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error: -{0} option not provided")]
    MissingOption(&'static str),
    #[error("error: -multi flag not given, so want exactly one source; got {got}")]
    SourceCount { got: usize },
    #[error("cannot read manifest {}: {source}", .path.display())]
    ReadManifest { path: PathBuf, source: io::Error },
    #[error("invalid manifest {}: {source}", .path.display())]
    ParseManifest {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Go type of every embedded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `string`
    Text,
    /// `[]byte`
    Bytes,
}

impl ValueKind {
    pub fn go_type(&self) -> &'static str {
        match self {
            ValueKind::Text => "string",
            ValueKind::Bytes => "[]byte",
        }
    }

    /// Text written before the escaped payload.
    pub fn open(&self) -> &'static str {
        match self {
            ValueKind::Text => "\"",
            ValueKind::Bytes => "[]byte(\"",
        }
    }

    /// Text written after the escaped payload.
    pub fn close(&self) -> &'static str {
        match self {
            ValueKind::Text => "\"",
            ValueKind::Bytes => "\")",
        }
    }
}

/// Everything one run needs. Empty strings count as "not provided", as
/// with Go-style flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Label of the rule being executed, quoted in the header.
    pub label: String,
    /// Go package of the generated file.
    pub package: String,
    /// Name of the generated variable.
    pub var: String,
    /// Emit a `map[string]T` keyed by file instead of a single value.
    pub multi: bool,
    /// Files to embed, in declaration order.
    pub sources: Vec<PathBuf>,
    /// Output file; `-` writes to stdout.
    pub out: PathBuf,
    /// Workspace name; `external/<workspace>/` is stripped from keys.
    pub workspace: String,
    /// Key files by base name only.
    pub flatten: bool,
    /// Embed as `string` instead of `[]byte`.
    #[serde(rename = "string")]
    pub string_data: bool,
}

impl Configuration {
    pub fn from_manifest(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadManifest {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::ParseManifest {
            path: path.to_owned(),
            source,
        })
    }

    /// Check required options and the source count. Runs before any output
    /// is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("label", self.label.is_empty()),
            ("package", self.package.is_empty()),
            ("var", self.var.is_empty()),
            ("out", self.out.as_os_str().is_empty()),
            ("workspace", self.workspace.is_empty()),
        ];
        if let Some((name, _)) = required.into_iter().find(|(_, missing)| *missing) {
            return Err(ConfigError::MissingOption(name));
        }
        if !self.multi && self.sources.len() != 1 {
            return Err(ConfigError::SourceCount {
                got: self.sources.len(),
            });
        }
        Ok(())
    }

    pub fn value_kind(&self) -> ValueKind {
        if self.string_data {
            ValueKind::Text
        } else {
            ValueKind::Bytes
        }
    }

    pub fn key_deriver(&self) -> KeyDeriver {
        KeyDeriver::new(&self.workspace, self.flatten)
    }

    /// True when the output goes to stdout rather than a file.
    pub fn writes_stdout(&self) -> bool {
        self.out.as_os_str() == "-"
    }
}
