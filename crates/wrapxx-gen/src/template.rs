//! Template assembly.
//!
//! Splices the synthesized fragments into the boilerplate document at the
//! two mandatory markers and substitutes the optional metadata
//! placeholders. A template missing either marker is a configuration
//! error: the run fails with no output.

use crate::config::WrapConfig;
use crate::emit::{Qualifier, WrapperFragment};
use crate::{GenError, Result};

/// Separator between instance and static declarations in the class body.
const STATIC_SEPARATOR: &str = "/* Static Methods */";
/// Line opening the out-of-class implementation block.
const IMPL_HEADER: &str = "/* Wrapper Implementation Details Follow */";

/// Metadata substituted into the optional template placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMeta {
    /// Filename of the upstream header, for the include placeholder.
    pub include_filename: String,
    /// Upstream version text, `"Unknown"` when not discovered.
    pub version_label: String,
    /// `major * 1000 + minor`, absent when the version is unknown.
    pub integer_version: Option<u32>,
}

pub fn assemble(
    fragments: &[WrapperFragment],
    template: &str,
    meta: &TemplateMeta,
    config: &WrapConfig,
) -> Result<String> {
    let class_body = render_class_body(fragments);
    let impl_body = render_impl_body(fragments, &config.class_name);

    let class_idx = template
        .find(&config.class_marker)
        .ok_or_else(|| GenError::MissingMarker {
            marker: config.class_marker.clone(),
        })?;
    let impl_idx = template
        .find(&config.impl_marker)
        .ok_or_else(|| GenError::MissingMarker {
            marker: config.impl_marker.clone(),
        })?;
    if impl_idx < class_idx + config.class_marker.len() {
        return Err(GenError::MarkerOrder {
            class_marker: config.class_marker.clone(),
            impl_marker: config.impl_marker.clone(),
        });
    }

    let mut out = String::with_capacity(template.len() + class_body.len() + impl_body.len());
    out.push_str(&template[..class_idx]);
    out.push_str(&class_body);
    out.push_str(&template[class_idx + config.class_marker.len()..impl_idx]);
    out.push_str(&impl_body);
    out.push_str(&template[impl_idx + config.impl_marker.len()..]);

    let mut out = out.replace(&config.include_placeholder, &meta.include_filename);
    out = out.replace(&config.version_placeholder, &meta.version_label);
    if out.contains(&config.int_version_placeholder) {
        match meta.integer_version {
            Some(version) => {
                out = out.replace(&config.int_version_placeholder, &version.to_string());
            }
            None => {
                return Err(GenError::UnknownIntegerVersion {
                    placeholder: config.int_version_placeholder.clone(),
                });
            }
        }
    }
    Ok(out)
}

/// Instance declarations first, then the separator, then the static ones.
fn render_class_body(fragments: &[WrapperFragment]) -> String {
    let mut lines: Vec<String> = fragments
        .iter()
        .filter(|f| f.qualifier == Qualifier::None)
        .map(|f| format!("{} {};", f.ret, f.decl))
        .collect();
    lines.push(STATIC_SEPARATOR.to_string());
    lines.extend(
        fragments
            .iter()
            .filter(|f| f.qualifier == Qualifier::Static)
            .map(|f| format!("static {} {};", f.ret, f.decl)),
    );
    lines.join("\n\t\t")
}

/// One inline definition per fragment, in discovery order.
fn render_impl_body(fragments: &[WrapperFragment], class_name: &str) -> String {
    let mut blocks = vec![IMPL_HEADER.to_string()];
    blocks.extend(fragments.iter().map(|f| {
        format!(
            "inline {} {}::{} {{\n\t{}\n}}",
            f.ret, class_name, f.decl, f.body
        )
    }));
    blocks.join("\n\n")
}
