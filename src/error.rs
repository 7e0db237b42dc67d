use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::DecodeError;

/// Every way a build can fail. None of these are recovered from; the first
/// one ends the run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("error reading config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error
    },

    #[error("error parsing config")]
    Decode(#[from] DecodeError),

    #[error("error initializing template engine from {}", dir.display())]
    TemplateInit {
        dir: PathBuf,
        #[source]
        source: tera::Error
    },

    #[error("error rendering {template}")]
    Render {
        template: String,
        #[source]
        source: tera::Error
    },

    #[error("error writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error
    }
}

impl GenerateError {
    /// The error followed by its chain of causes, one per line.
    pub fn report(&self) -> String {
        let mut lines = vec![format!("Build failed: {self}")];
        let mut cause = std::error::Error::source(self);
        while let Some(inner) = cause {
            lines.push(format!("  caused by: {inner}"));
            cause = inner.source();
        }
        lines.join("\n")
    }
}
