//! Wrapping rules injected into the pipeline at start-up.
//!
//! Everything that was a module-level constant in earlier generator
//! iterations lives here as immutable data: the sentinel type that marks
//! instance operations, the exclusion list of hand-written wrappers, the
//! identifier translation tables and the template markers. Defaults
//! reproduce the VirtuoseAPI wrapping rules; a TOML file can override any
//! subset of fields.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    /// Name of the generated C++ class.
    pub class_name: String,
    /// Prefix dropped from C function names when deriving method names.
    pub function_prefix: String,
    /// First-parameter type that marks a function as an instance operation.
    pub sentinel_type: String,
    /// Member expression forwarded as the implicit handle argument.
    pub handle_token: String,
    /// Macro wrapping integer-returning instance calls.
    pub checked_call_macro: String,
    /// Functions that are wrapped by hand and must not be generated.
    pub manually_wrapped: Vec<String>,
    /// Parameter identifier translations (identity fallback on miss).
    pub param_renames: BTreeMap<String, String>,
    /// Wholesale method-name remaps, applied after prefix stripping and
    /// before the casing rule, for irregular upstream names.
    pub method_renames: BTreeMap<String, String>,
    /// Marker replaced by the class-body declarations.
    pub class_marker: String,
    /// Marker replaced by the out-of-class implementations.
    pub impl_marker: String,
    /// Placeholder replaced by the upstream header filename.
    pub include_placeholder: String,
    /// Placeholder replaced by the upstream version string.
    pub version_placeholder: String,
    /// Placeholder replaced by the integer upstream version.
    pub int_version_placeholder: String,
    /// Header filenames probed when no input path is given.
    pub header_candidates: Vec<String>,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            class_name: "Virtuose".to_string(),
            function_prefix: "virt".to_string(),
            sentinel_type: "VirtContext".to_string(),
            handle_token: "vc_".to_string(),
            checked_call_macro: "VPP_CHECKED_CALL".to_string(),
            manually_wrapped: vec![
                "virtOpen".to_string(),
                "virtClose".to_string(),
                "virtGetErrorMessage".to_string(),
            ],
            param_renames: renames(&[
                ("fichier", "fh"),
                ("intensite", "intensity"),
                ("clic_gauche", "left_click"),
                ("clic_droit", "right_click"),
                ("btn_gauche", "left_btn"),
                ("btn_droit", "right_btn"),
                ("btn_milieu", "middle_btn"),
                ("actif", "active"),
                ("axe", "axis"),
                ("decalage", "shift"),
            ]),
            method_renames: BTreeMap::new(),
            class_marker: "/* CLASS BODY GOES HERE */".to_string(),
            impl_marker: "/* IMPLEMENTATION BODY GOES HERE */".to_string(),
            include_placeholder: "UPSTREAM_INCLUDE_FILENAME".to_string(),
            version_placeholder: "UPSTREAM_VERSION_GOES_HERE".to_string(),
            int_version_placeholder: "UPSTREAM_INTEGER_VERSION_GOES_HERE".to_string(),
            header_candidates: vec!["VirtuoseAPI.h".to_string(), "virtuoseAPI.h".to_string()],
        }
    }
}

fn renames(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}
