//! Program text loaded from a file or stdin

use miette::{Diagnostic, NamedSource};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const EXTENSION: &str = "bang";
pub const STDIN_NAME: &str = "<stdin>";

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("COULD NOT OPEN {}", path.display())]
    #[diagnostic(
        code(bang::source::open),
        help("Check that the file exists and is readable")
    )]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read program from stdin")]
    #[diagnostic(code(bang::source::stdin))]
    Stdin {
        #[source]
        source: io::Error,
    },
}

/// A named chunk of Bang source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Load from `path`; `None` or `-` reads stdin
    pub fn load(path: Option<&Path>) -> Result<Self, SourceError> {
        match path {
            Some(path) if path.as_os_str() != "-" => Self::from_path(path),
            _ => Self::from_stdin(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
            warn!(path = %path.display(), "expected a .{EXTENSION} file");
        }

        let text = fs::read_to_string(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "loaded source");
        Ok(Self::new(path.display().to_string(), text))
    }

    pub fn from_stdin() -> Result<Self, SourceError> {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| SourceError::Stdin { source })?;
        Ok(Self::new(STDIN_NAME, text))
    }

    /// The text wrapped for attaching to a miette report
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.text.clone())
    }
}
