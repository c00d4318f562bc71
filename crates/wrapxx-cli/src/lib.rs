//! Wrapper generation as a library.
//!
//! This module exposes the end-to-end runs behind the `wrapxx` binary so
//! they can be driven from tests and other tools: resolve the input
//! header, parse it, discover the upstream version, run the engine and
//! write the output.

use std::fs;
use std::path::{Path, PathBuf};
use wrapxx_ast::{SmolStr, SourceLoc};
use wrapxx_frontend::{parse_header, resolve_header, scan_version, FrontendError};
use wrapxx_gen::{Classifier, GenError, MethodDescriptor, TemplateMeta, WrapConfig};

/// Errors that can occur during a generation run
#[derive(Debug)]
pub enum WrapError {
    /// I/O error reading/writing files
    Io(std::io::Error),
    /// Header resolution or parse error
    Frontend(FrontendError),
    /// Template assembly error
    Gen(GenError),
    /// Malformed TOML configuration
    Config(toml::de::Error),
}

impl std::fmt::Display for WrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrapError::Io(e) => write!(f, "I/O error: {}", e),
            WrapError::Frontend(e) => write!(f, "Frontend error: {}", e),
            WrapError::Gen(e) => write!(f, "Generation error: {}", e),
            WrapError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for WrapError {}

impl From<std::io::Error> for WrapError {
    fn from(e: std::io::Error) -> Self {
        WrapError::Io(e)
    }
}

impl From<FrontendError> for WrapError {
    fn from(e: FrontendError) -> Self {
        WrapError::Frontend(e)
    }
}

impl From<GenError> for WrapError {
    fn from(e: GenError) -> Self {
        WrapError::Gen(e)
    }
}

impl From<toml::de::Error> for WrapError {
    fn from(e: toml::de::Error) -> Self {
        WrapError::Config(e)
    }
}

/// Result type for generation runs
pub type WrapResult<T> = Result<T, WrapError>;

/// Everything a `generate` run needs.
pub struct GenerateOptions {
    /// Input header; configured candidates are probed when absent.
    pub header: Option<PathBuf>,
    /// Boilerplate template file.
    pub template: PathBuf,
    /// Output file path.
    pub output: PathBuf,
    /// Extra include directories for the preprocessor.
    pub include_dirs: Vec<PathBuf>,
    pub config: WrapConfig,
}

/// Load the wrapping rules, either the built-in defaults or a TOML file
/// overriding any subset of them.
pub fn load_config(path: Option<&Path>) -> WrapResult<WrapConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(toml::from_str(&text)?)
        }
        None => Ok(WrapConfig::default()),
    }
}

fn resolve_input(explicit: Option<&Path>, config: &WrapConfig) -> WrapResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(resolve_header(Path::new("."), &config.header_candidates)?),
    }
}

/// Run the whole pipeline and write the output file.
///
/// Nothing is written unless every stage succeeds. Returns the header the
/// run actually used.
pub fn run_generate(opts: &GenerateOptions) -> WrapResult<PathBuf> {
    let header = resolve_input(opts.header.as_deref(), &opts.config)?;
    let funcs = parse_header(&header, &opts.include_dirs)?;

    let header_source = fs::read_to_string(&header)?;
    let version = scan_version(&header_source);
    let template_text = fs::read_to_string(&opts.template)?;

    let meta = TemplateMeta {
        include_filename: header
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| header.display().to_string()),
        version_label: version.label(),
        integer_version: version.integer(),
    };
    let output_text = wrapxx_gen::generate(&funcs, &template_text, &meta, &opts.config)?;
    fs::write(&opts.output, output_text)?;
    Ok(header)
}

/// One entry of the `list` view: the original function and what the
/// generator would make of it.
pub struct ListedMethod {
    pub original: SmolStr,
    pub loc: SourceLoc,
    /// `None` when the function is wrapped by hand.
    pub descriptor: Option<MethodDescriptor>,
}

/// Classify every function in `header` without generating anything.
pub fn list_methods(
    header: &Path,
    include_dirs: &[PathBuf],
    config: &WrapConfig,
) -> WrapResult<Vec<ListedMethod>> {
    let funcs = parse_header(header, include_dirs)?;
    let classifier = Classifier::new(config);
    Ok(funcs
        .iter()
        .map(|func| ListedMethod {
            original: func.name.clone(),
            loc: func.loc.clone(),
            descriptor: classifier.classify(func),
        })
        .collect())
}
