//! C header frontend for the wrapxx generator.
//!
//! Parsing proper is owned by the external `lang-c` parser (preprocessor
//! invocation included); this crate drives it and lowers its AST into the
//! declarator trees the engine consumes. It also resolves candidate header
//! filenames and discovers the upstream version number in the raw header
//! text.

use lang_c::driver::{self, Config};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wrapxx_ast::{FunctionDeclaration, SourceLoc};

mod lower;
pub mod version;

pub use version::{scan_version, ApiVersion};

#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("no input header found (tried: {tried})")]
    NoHeaderFound { tried: String },

    #[error("failed to run the C preprocessor: {0}")]
    Preprocessor(#[source] std::io::Error),

    #[error("C parse error: {0}")]
    Syntax(String),

    #[error("unsupported C construct at {loc}: {what}")]
    Unsupported { what: String, loc: SourceLoc },
}

/// Result type for frontend operations
pub type Result<T> = std::result::Result<T, FrontendError>;

/// Parse `path` with the external C parser and lower every function
/// prototype and definition found in it.
///
/// Parse failures are surfaced unchanged; nothing is retried.
pub fn parse_header(path: &Path, include_dirs: &[PathBuf]) -> Result<Vec<FunctionDeclaration>> {
    let mut config = Config::default();
    for dir in include_dirs {
        config.cpp_options.push(format!("-I{}", dir.display()));
    }
    let parse = driver::parse(&config, path).map_err(|err| match err {
        driver::Error::PreprocessorError(io) => FrontendError::Preprocessor(io),
        driver::Error::SyntaxError(syntax) => FrontendError::Syntax(syntax.to_string()),
    })?;
    lower::lower_unit(&parse, path)
}

/// Return the first candidate filename that exists in `dir`.
pub fn resolve_header(dir: &Path, candidates: &[String]) -> Result<PathBuf> {
    for candidate in candidates {
        let path = dir.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(FrontendError::NoHeaderFound {
        tried: candidates.join(", "),
    })
}
