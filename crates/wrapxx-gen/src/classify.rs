//! Method classification and descriptor building.
//!
//! Turns one `FunctionDeclaration` into a `MethodDescriptor`, or nothing
//! when the function is wrapped by hand. A function whose first parameter
//! is the bare sentinel type becomes an instance operation and loses that
//! parameter; everything else (including zero-parameter functions, which
//! have no first parameter to inspect) stays static.

use crate::config::WrapConfig;
use crate::rename::{IdentTranslator, MethodNamer};
use crate::spell::{spell, spell_type};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use wrapxx_ast::{DeclaratorNode, FunctionDeclaration, SourceLoc};

/// One wrapped parameter: the full `type name` spelling used in the
/// declaration, and the translated name used when forwarding the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub text: String,
    pub name: SmolStr,
}

/// Everything the synthesizer needs to emit one wrapper method.
/// Built once per function declaration and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub original_name: SmolStr,
    pub wrapper_name: SmolStr,
    pub is_static: bool,
    pub ret: String,
    pub params: Vec<Param>,
    pub loc: SourceLoc,
}

impl MethodDescriptor {
    /// `name(type name, ...)` as it appears in the class body.
    pub fn declaration_text(&self) -> String {
        let params: Vec<&str> = self.params.iter().map(|p| p.text.as_str()).collect();
        format!("{}({})", self.wrapper_name, params.join(", "))
    }
}

/// Applies the classification and naming rules of one configuration.
#[derive(Debug, Clone)]
pub struct Classifier {
    sentinel_type: String,
    excluded: FxHashSet<SmolStr>,
    translator: IdentTranslator,
    namer: MethodNamer,
}

impl Classifier {
    pub fn new(config: &WrapConfig) -> Self {
        Self {
            sentinel_type: config.sentinel_type.clone(),
            excluded: config
                .manually_wrapped
                .iter()
                .map(|n| SmolStr::new(n))
                .collect(),
            translator: IdentTranslator::from_table(&config.param_renames),
            namer: MethodNamer::new(config.function_prefix.clone(), &config.method_renames),
        }
    }

    /// Build the descriptor for one function, or `None` when the function
    /// is in the manually-wrapped exclusion set.
    pub fn classify(&self, func: &FunctionDeclaration) -> Option<MethodDescriptor> {
        if self.excluded.contains(func.name.as_str()) {
            return None;
        }

        let is_instance = func
            .params
            .first()
            .is_some_and(|p| is_bare_sentinel(&p.node, &self.sentinel_type));
        let kept = if is_instance {
            &func.params[1..]
        } else {
            &func.params[..]
        };

        let params = kept
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let name = match &p.name {
                    Some(n) => self.translator.translate(n),
                    // prototypes may omit names; synthesize one so the
                    // forwarding call stays compilable
                    None => SmolStr::new(format!("arg{index}")),
                };
                let text = spell(&p.node, Some(&name), &self.translator);
                Param { text, name }
            })
            .collect();

        Some(MethodDescriptor {
            original_name: func.name.clone(),
            wrapper_name: self.namer.derive(&func.name),
            is_static: !is_instance,
            ret: spell_type(&func.ret, &self.translator),
            params,
            loc: func.loc.clone(),
        })
    }
}

/// The instance rule only matches the sentinel spelled as a plain base
/// type; a pointer to it does not mark an instance operation.
fn is_bare_sentinel(node: &DeclaratorNode, sentinel: &str) -> bool {
    matches!(node, DeclaratorNode::Base { names } if names.len() == 1 && names[0] == sentinel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wrapxx_ast::{Declaration, DeclaratorNode as N};

    fn classifier() -> Classifier {
        Classifier::new(&WrapConfig::default())
    }

    fn sentinel_param() -> Declaration {
        Declaration::new("vc", N::base(["VirtContext"]))
    }

    #[test]
    fn excluded_functions_produce_no_descriptor() {
        let func = FunctionDeclaration::new(
            "virtOpen",
            N::pointer(N::base(["VirtContext"])),
            vec![Declaration::new("name", N::pointer(N::base(["char"])))],
        );
        assert_eq!(classifier().classify(&func), None);
    }

    #[test]
    fn sentinel_first_parameter_makes_an_instance_method() {
        let func = FunctionDeclaration::new(
            "virtSetForce",
            N::base(["int"]),
            vec![
                sentinel_param(),
                Declaration::new("force", N::base(["float"])),
            ],
        );
        let desc = classifier().classify(&func).unwrap();
        assert!(!desc.is_static);
        assert_eq!(desc.wrapper_name, "setForce");
        // exactly one leading parameter dropped
        assert_eq!(desc.params.len(), func.params.len() - 1);
        assert_eq!(desc.declaration_text(), "setForce(float force)");
    }

    #[test]
    fn non_sentinel_first_parameter_stays_static_with_all_params() {
        let func = FunctionDeclaration::new(
            "virtAPIVersion",
            N::base(["int"]),
            vec![
                Declaration::new("major", N::pointer(N::base(["int"]))),
                Declaration::new("minor", N::pointer(N::base(["int"]))),
            ],
        );
        let desc = classifier().classify(&func).unwrap();
        assert!(desc.is_static);
        assert_eq!(desc.params.len(), 2);
        assert_eq!(desc.declaration_text(), "APIVersion(int *major, int *minor)");
    }

    #[test]
    fn zero_parameter_functions_are_always_static() {
        let func = FunctionDeclaration::new("virtGetErrorCode", N::base(["int"]), vec![]);
        let desc = classifier().classify(&func).unwrap();
        assert!(desc.is_static);
        assert_eq!(desc.declaration_text(), "getErrorCode()");
    }

    #[test]
    fn pointer_to_sentinel_does_not_mark_instance() {
        let func = FunctionDeclaration::new(
            "virtDump",
            N::base(["void"]),
            vec![Declaration::new("vc", N::pointer(N::base(["VirtContext"])))],
        );
        let desc = classifier().classify(&func).unwrap();
        assert!(desc.is_static);
        assert_eq!(desc.params.len(), 1);
    }

    #[test]
    fn parameter_names_are_translated() {
        let func = FunctionDeclaration::new(
            "virtDisplayHardwareStatus",
            N::base(["int"]),
            vec![
                sentinel_param(),
                Declaration::new("fichier", N::pointer(N::base(["FILE"]))),
            ],
        );
        let desc = classifier().classify(&func).unwrap();
        assert_eq!(desc.declaration_text(), "displayHardwareStatus(FILE *fh)");
        assert_eq!(desc.params[0].name, "fh");
    }

    #[test]
    fn unnamed_parameters_get_positional_names() {
        let func = FunctionDeclaration::new(
            "virtSetForce",
            N::base(["int"]),
            vec![sentinel_param(), Declaration::unnamed(N::base(["float"]))],
        );
        let desc = classifier().classify(&func).unwrap();
        assert_eq!(desc.declaration_text(), "setForce(float arg0)");
    }

    #[test]
    fn return_type_spelling_is_reconstructed() {
        let func = FunctionDeclaration::new(
            "virtGetTrackball",
            N::pointer(N::base(["float"])),
            vec![sentinel_param()],
        );
        let desc = classifier().classify(&func).unwrap();
        assert_eq!(desc.ret, "float *");
    }
}
