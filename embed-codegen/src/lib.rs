//! Embed data files into generated Go source code.
//!
//! Each file's bytes are escaped into the body of a Go interpreted string
//! literal and declared either as a single `string`/`[]byte` variable or as
//! entries of a `map[string]T` keyed by file name. The escaping is lossless
//! for arbitrary binary input; the Go compiler reconstructs the exact bytes.
//!
//! ```no_run
//! let config = embed_codegen::config::Configuration {
//!     label: "//assets:files".into(),
//!     package: "assets".into(),
//!     var: "files".into(),
//!     multi: true,
//!     sources: vec!["logo.svg".into(), "index.html".into()],
//!     out: "assets.go".into(),
//!     workspace: "main".into(),
//!     ..Default::default()
//! };
//! embed_codegen::run(&config).unwrap();
//! ```
pub mod args;
pub mod config;
pub mod emit;
pub mod escape;
pub mod header;
pub mod key;
pub mod writer;

use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use config::{ConfigError, Configuration};
use emit::{EmitError, Emitter};
use writer::CodeWriter;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("cannot create {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },
}

/// Write the generated file for `config` into `sink` and flush it.
pub fn generate<W: Write>(config: &Configuration, sink: W) -> Result<W, EmitError> {
    config.validate()?;
    let mut w = CodeWriter::new(sink);
    Emitter::new(config).emit(&mut w)?;
    w.flush()?;
    Ok(w.finish())
}

/// Validate `config`, then generate its output file (or stdout for `-`).
/// Nothing is created when validation fails.
pub fn run(config: &Configuration) -> Result<(), Error> {
    config.validate()?;

    if config.writes_stdout() {
        generate(config, BufWriter::new(io::stdout().lock()))?;
    } else {
        let file = File::create(&config.out).map_err(|source| Error::Create {
            path: config.out.clone(),
            source,
        })?;
        generate(config, BufWriter::new(file))?;
    }

    info!(
        "Embedded {} file(s) into {}",
        config.sources.len(),
        config.out.display()
    );
    Ok(())
}
