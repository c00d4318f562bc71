//! Wrapper code synthesis.
//!
//! Turns a `MethodDescriptor` into the text fragments spliced into the
//! template: the declaration, and a body that forwards to the original C
//! function. Integer-returning instance calls go through the checked-call
//! macro so a failing return code can be reported; everything else returns
//! the forwarded call directly.

use crate::classify::MethodDescriptor;
use crate::config::WrapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    None,
    Static,
}

/// The synthesized output unit for one wrapped function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperFragment {
    pub qualifier: Qualifier,
    pub ret: String,
    pub decl: String,
    pub body: String,
}

pub fn synthesize(desc: &MethodDescriptor, config: &WrapConfig) -> WrapperFragment {
    let decl = desc.declaration_text();

    let mut args: Vec<&str> = Vec::with_capacity(desc.params.len() + 1);
    if !desc.is_static {
        args.push(config.handle_token.as_str());
    }
    args.extend(desc.params.iter().map(|p| p.name.as_str()));
    let call = format!("{}({})", desc.original_name, args.join(", "));

    let body = if !desc.is_static && desc.ret == "int" {
        format!(
            "int ret;\n\t{}(ret = {});\n\treturn ret;",
            config.checked_call_macro, call
        )
    } else {
        format!("return {};", call)
    };

    WrapperFragment {
        qualifier: if desc.is_static {
            Qualifier::Static
        } else {
            Qualifier::None
        },
        ret: desc.ret.clone(),
        decl,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use pretty_assertions::assert_eq;
    use wrapxx_ast::{Declaration, DeclaratorNode as N, FunctionDeclaration};

    fn fragment(func: &FunctionDeclaration) -> WrapperFragment {
        let config = WrapConfig::default();
        let desc = Classifier::new(&config).classify(func).unwrap();
        synthesize(&desc, &config)
    }

    #[test]
    fn instance_int_return_uses_checked_call() {
        let func = FunctionDeclaration::new(
            "virtSetForce",
            N::base(["int"]),
            vec![
                Declaration::new("vc", N::base(["VirtContext"])),
                Declaration::new("force", N::base(["float"])),
            ],
        );
        let frag = fragment(&func);
        assert_eq!(frag.qualifier, Qualifier::None);
        assert_eq!(frag.decl, "setForce(float force)");
        assert_eq!(
            frag.body,
            "int ret;\n\tVPP_CHECKED_CALL(ret = virtSetForce(vc_, force));\n\treturn ret;"
        );
    }

    #[test]
    fn instance_non_int_return_forwards_directly() {
        let func = FunctionDeclaration::new(
            "virtGetErrorText",
            N::pointer(N::base(["char"])),
            vec![Declaration::new("vc", N::base(["VirtContext"]))],
        );
        let frag = fragment(&func);
        assert_eq!(frag.body, "return virtGetErrorText(vc_);");
    }

    #[test]
    fn static_int_return_forwards_directly() {
        let func = FunctionDeclaration::new("virtGetErrorCode", N::base(["int"]), vec![]);
        let frag = fragment(&func);
        assert_eq!(frag.qualifier, Qualifier::Static);
        assert_eq!(frag.body, "return virtGetErrorCode();");
    }

    #[test]
    fn static_call_forwards_all_parameters_without_handle() {
        let func = FunctionDeclaration::new(
            "virtAPIVersion",
            N::base(["int"]),
            vec![
                Declaration::new("major", N::pointer(N::base(["int"]))),
                Declaration::new("minor", N::pointer(N::base(["int"]))),
            ],
        );
        let frag = fragment(&func);
        assert_eq!(frag.body, "return virtAPIVersion(major, minor);");
    }

    #[test]
    fn instance_call_prepends_the_handle() {
        let func = FunctionDeclaration::new(
            "virtSaturateTorque",
            N::base(["int"]),
            vec![
                Declaration::new("vc", N::base(["VirtContext"])),
                Declaration::new("forceThreshold", N::base(["float"])),
                Declaration::new("momentThreshold", N::base(["float"])),
            ],
        );
        let frag = fragment(&func);
        assert!(frag
            .body
            .contains("virtSaturateTorque(vc_, forceThreshold, momentThreshold)"));
    }
}
