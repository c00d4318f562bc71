//! Declaration-to-wrapper transformation engine.
//!
//! Consumes the function declarations delivered by the frontend and
//! produces the final wrapper source by splicing synthesized method text
//! into a boilerplate template:
//!
//! ```text
//! FunctionDeclaration → [classify] → MethodDescriptor
//!                     → [emit]     → WrapperFragment
//!                     → [template] → output document
//! ```
//!
//! Every stage is a pure function over its input; the whole pipeline runs
//! in one pass and preserves declaration order in the implementation
//! block.

use thiserror::Error;
use wrapxx_ast::FunctionDeclaration;

pub mod classify;
pub mod config;
pub mod emit;
pub mod rename;
pub mod spell;
pub mod template;

pub use classify::{Classifier, MethodDescriptor, Param};
pub use config::WrapConfig;
pub use emit::{synthesize, Qualifier, WrapperFragment};
pub use template::{assemble, TemplateMeta};

/// Errors that can occur while assembling the output document.
///
/// All of them are configuration errors: the transformation itself never
/// rejects a well-formed declaration tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("template is missing required marker `{marker}`")]
    MissingMarker { marker: String },

    #[error("template marker `{impl_marker}` must come after `{class_marker}`")]
    MarkerOrder {
        class_marker: String,
        impl_marker: String,
    },

    #[error("template uses `{placeholder}` but no upstream version number was found")]
    UnknownIntegerVersion { placeholder: String },
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Run the whole engine: classify every declaration, synthesize the
/// surviving methods and splice them into `template_text`.
pub fn generate(
    funcs: &[FunctionDeclaration],
    template_text: &str,
    meta: &TemplateMeta,
    config: &WrapConfig,
) -> Result<String> {
    let classifier = Classifier::new(config);
    let fragments: Vec<WrapperFragment> = funcs
        .iter()
        .filter_map(|f| classifier.classify(f))
        .map(|desc| synthesize(&desc, config))
        .collect();
    assemble(&fragments, template_text, meta, config)
}
