use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::{ConfigError, Configuration};

/// Flags taking a value, accepted with one or two leading dashes.
const VALUE_FLAGS: &[&str] = &["label", "package", "var", "out", "workspace", "manifest"];
/// Boolean flags, accepted as `-name`, `-name=true` or `-name=false`.
const BOOL_FLAGS: &[&str] = &[
    "multi", "flatten", "string", "verbose", "quiet", "help", "version",
];

/// Generate a Go source file embedding the contents of data files
#[derive(Debug, Parser)]
#[command(name = "embed-codegen", version)]
pub struct Args {
    /// Turn debugging information on
    #[arg(short, long, action(ArgAction::Count))]
    pub verbose: u8,
    /// Only print errors
    #[arg(short, long, action(ArgAction::Count))]
    pub quiet: u8,
    /// Label of the rule being executed (required)
    #[arg(long)]
    pub label: Option<String>,
    /// Go package name (required)
    #[arg(long)]
    pub package: Option<String>,
    /// Variable name (required)
    #[arg(long)]
    pub var: Option<String>,
    /// Whether the variable is a map or a single value
    #[arg(long)]
    pub multi: bool,
    /// Go file to generate, `-` for stdout (required)
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Name of the workspace (required)
    #[arg(long)]
    pub workspace: Option<String>,
    /// Whether to access files by base name
    #[arg(long)]
    pub flatten: bool,
    /// Whether to store contents as strings
    #[arg(long)]
    pub string: bool,
    /// JSON file with default values for the options above
    #[arg(long)]
    pub manifest: Option<PathBuf>,
    /// Data files to embed
    pub sources: Vec<PathBuf>,
}

impl Args {
    /// Parse a command line that may use Go `flag` package spelling
    /// (`-label x`, `-multi=true`), exiting on error like clap does.
    pub fn parse_go_style<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_flags(args))
    }

    pub fn try_parse_go_style<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_flags(args))
    }

    pub fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (0, 0) => "warn",
            (_, 0) => "error",
            (_, 1) => "info,embed_codegen=debug",
            (_, 2) => "debug",
            _ => "trace",
        }
    }

    /// Merge the flags over the manifest, if one was given.
    pub fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let mut config = match &self.manifest {
            Some(path) => Configuration::from_manifest(path)?,
            None => Configuration::default(),
        };
        if let Some(label) = self.label {
            config.label = label;
        }
        if let Some(package) = self.package {
            config.package = package;
        }
        if let Some(var) = self.var {
            config.var = var;
        }
        if let Some(out) = self.out {
            config.out = out;
        }
        if let Some(workspace) = self.workspace {
            config.workspace = workspace;
        }
        config.multi |= self.multi;
        config.flatten |= self.flatten;
        config.string_data |= self.string;
        config.sources.extend(self.sources);
        Ok(config)
    }
}

/// Rewrite Go-style flags into the `--name=value` form clap understands.
///
/// Like Go's `flag` package, flag parsing stops at `--` or at the first
/// argument that is not a flag; everything from there on is a source path.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out = Vec::new();
    out.extend(args.next());

    while let Some(arg) = args.next() {
        let text = match arg.to_str() {
            Some(text) if text != "--" && text != "-" && text.starts_with('-') => text,
            _ => {
                if arg != "--" {
                    out.push(OsString::from("--"));
                }
                out.push(arg);
                out.extend(args);
                break;
            }
        };

        let flag = text.strip_prefix("--").unwrap_or(&text[1..]);
        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };

        if VALUE_FLAGS.contains(&name) {
            let mut joined = OsString::from(format!("--{name}="));
            match value {
                Some(value) => joined.push(value),
                None => match args.next() {
                    Some(next) => joined.push(next),
                    // Let clap report the missing value.
                    None => joined = OsString::from(format!("--{name}")),
                },
            }
            out.push(joined);
        } else if BOOL_FLAGS.contains(&name) {
            match value.map(parse_go_bool) {
                None | Some(Some(true)) => out.push(OsString::from(format!("--{name}"))),
                Some(Some(false)) => {}
                Some(None) => out.push(OsString::from(format!("--{flag}"))),
            }
        } else {
            out.push(arg);
        }
    }
    out
}

/// Boolean spellings accepted by Go's `strconv.ParseBool`.
fn parse_go_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
