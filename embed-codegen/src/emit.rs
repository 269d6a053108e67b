/// Declaration emission: writes the header followed by the variable(s)
/// holding each file's escaped contents.
use log::{debug, trace};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, Configuration};
use crate::header::Header;
use crate::writer::CodeWriter;

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to embed {}: {source}", .path.display())]
    Embed { path: PathBuf, source: io::Error },
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

pub struct Emitter<'a> {
    config: &'a Configuration,
    header: Header,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self::with_header(config, Header::new(config))
    }

    pub fn with_header(config: &'a Configuration, header: Header) -> Self {
        Self { config, header }
    }

    /// Write the complete generated file.
    pub fn emit<W: Write>(&self, w: &mut CodeWriter<W>) -> Result<(), EmitError> {
        if !self.config.multi && self.config.sources.len() != 1 {
            return Err(ConfigError::SourceCount {
                got: self.config.sources.len(),
            }
            .into());
        }
        self.header.write(w)?;
        if self.config.multi {
            self.embed_multiple_files(w)
        } else {
            self.embed_single_file(w)
        }
    }

    fn embed_single_file<W: Write>(&self, w: &mut CodeWriter<W>) -> Result<(), EmitError> {
        let [source] = self.config.sources.as_slice() else {
            return Err(ConfigError::SourceCount {
                got: self.config.sources.len(),
            }
            .into());
        };
        let kind = self.config.value_kind();

        w.start(&format!("var {} = {}", self.config.var, kind.open()))?;
        embed_file_contents(w, source)?;
        w.end(kind.close())?;
        Ok(())
    }

    fn embed_multiple_files<W: Write>(&self, w: &mut CodeWriter<W>) -> Result<(), EmitError> {
        if self.config.sources.is_empty() {
            return Ok(());
        }
        let kind = self.config.value_kind();

        w.open("var (")?;
        for (i, source) in self.config.sources.iter().enumerate() {
            w.start(&format!("{}_{i} = {}", self.config.var, kind.open()))?;
            embed_file_contents(w, source)?;
            w.end(kind.close())?;
        }
        w.close(")")?;
        Ok(())
    }
}

/// Stream one file through the codec into the current line. The file is
/// closed before this returns, on success or failure.
pub fn embed_file_contents<W: Write>(
    w: &mut CodeWriter<W>,
    path: &Path,
) -> Result<u64, EmitError> {
    trace!("Opening {}", path.display());
    let file = File::open(path).map_err(|source| EmitError::Open {
        path: path.into(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let n = w.payload(&mut reader).map_err(|source| EmitError::Embed {
        path: path.into(),
        source,
    })?;
    debug!("Embedded {} ({n} bytes)", path.display());
    Ok(n)
}
