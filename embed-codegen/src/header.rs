/// The fixed preamble of a generated file: the "do not edit" banner, the
/// package clause and, in multi mode, the map literal pointing at the
/// positional variables that hold the payloads.
use std::io::{self, Write};

use crate::config::Configuration;
use crate::writer::CodeWriter;

const GENERATOR: &str = "go_embed_data";

/// Built once per run from the configuration, then handed to the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    label: String,
    package: String,
    var: String,
    go_type: &'static str,
    /// Quoted keys in source order; `None` for a single value.
    keys: Option<Vec<String>>,
}

impl Header {
    pub fn new(config: &Configuration) -> Self {
        let keys = config.multi.then(|| {
            let deriver = config.key_deriver();
            config.sources.iter().map(|s| deriver.quoted(s)).collect()
        });
        Self {
            label: config.label.clone(),
            package: config.package.clone(),
            var: config.var.clone(),
            go_type: config.value_kind().go_type(),
            keys,
        }
    }

    pub fn write<W: Write>(&self, w: &mut CodeWriter<W>) -> io::Result<()> {
        w.line(&format!(
            "// Generated by {GENERATOR} for {}. DO NOT EDIT.",
            self.label
        ))?;
        w.line("")?;
        w.line(&format!("package {}", self.package))?;
        w.line("")?;

        if let Some(keys) = &self.keys {
            w.line("")?;
            w.open(&format!("var {} = map[string]{}{{", self.var, self.go_type))?;
            for (i, key) in keys.iter().enumerate() {
                w.line(&format!("{key}: {}_{i},", self.var))?;
            }
            w.close("}")?;
        }

        w.line("")?;
        w.line("")
    }
}
