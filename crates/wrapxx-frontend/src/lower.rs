//! Lowering of the `lang-c` AST into declarator trees.
//!
//! Only the shapes that occur in ordinary function signatures are
//! accepted: base types, pointers, and function declarators. Typedefs and
//! non-function declarations are skipped; anything outside the subset
//! (arrays, variadics, K&R definitions) is reported as unsupported.

use crate::{FrontendError, Result};
use lang_c::ast as c;
use lang_c::driver::Parse;
use lang_c::span::Node;
use smol_str::SmolStr;
use std::path::Path;
use wrapxx_ast::{Declaration, DeclaratorNode, FunctionDeclaration, SourceLoc};

pub(crate) fn lower_unit(parse: &Parse, file: &Path) -> Result<Vec<FunctionDeclaration>> {
    let mut funcs = Vec::new();
    for ext in &parse.unit.0 {
        match &ext.node {
            c::ExternalDeclaration::Declaration(decl) => {
                lower_declaration(parse, file, decl, &mut funcs)?;
            }
            c::ExternalDeclaration::FunctionDefinition(def) => {
                lower_definition(parse, file, def, &mut funcs)?;
            }
            _ => {}
        }
    }
    Ok(funcs)
}

fn lower_declaration(
    parse: &Parse,
    file: &Path,
    decl: &Node<c::Declaration>,
    out: &mut Vec<FunctionDeclaration>,
) -> Result<()> {
    if is_typedef(&decl.node.specifiers) {
        return Ok(());
    }
    for init in &decl.node.declarators {
        let declarator = &init.node.declarator;
        if !declares_function(&declarator.node) {
            continue;
        }
        let loc = loc_of(parse, file, declarator.span);
        let base = lower_base_type(&decl.node.specifiers, &loc)?;
        if let Some(func) = lower_function(parse, file, base, declarator)? {
            out.push(func);
        }
    }
    Ok(())
}

fn lower_definition(
    parse: &Parse,
    file: &Path,
    def: &Node<c::FunctionDefinition>,
    out: &mut Vec<FunctionDeclaration>,
) -> Result<()> {
    let declarator = &def.node.declarator;
    if !declares_function(&declarator.node) {
        return Ok(());
    }
    let loc = loc_of(parse, file, declarator.span);
    let base = lower_base_type(&def.node.specifiers, &loc)?;
    if let Some(func) = lower_function(parse, file, base, declarator)? {
        out.push(func);
    }
    Ok(())
}

/// A function declaration proper: a named declarator with a parameter
/// list. Function-pointer variables nest their name one level deeper and
/// are not functions.
fn declares_function(declarator: &c::Declarator) -> bool {
    matches!(declarator.kind.node, c::DeclaratorKind::Identifier(_))
        && declarator
            .derived
            .iter()
            .any(|dd| matches!(dd.node, c::DerivedDeclarator::Function(_)))
}

fn lower_function(
    parse: &Parse,
    file: &Path,
    base_names: Vec<SmolStr>,
    declarator: &Node<c::Declarator>,
) -> Result<Option<FunctionDeclaration>> {
    let name = match &declarator.node.kind.node {
        c::DeclaratorKind::Identifier(id) => SmolStr::new(&id.node.name),
        _ => return Ok(None),
    };
    let loc = loc_of(parse, file, declarator.span);

    // Pointers among the derived declarators bind to the return type;
    // the single function entry carries the parameter list.
    let mut ret = DeclaratorNode::Base { names: base_names };
    let mut params = None;
    for dd in &declarator.node.derived {
        match &dd.node {
            c::DerivedDeclarator::Pointer(_) => {
                ret = DeclaratorNode::pointer(ret);
            }
            c::DerivedDeclarator::Function(fd) => {
                if params.is_some() {
                    return Err(FrontendError::Unsupported {
                        what: format!("function `{name}` with more than one parameter list"),
                        loc,
                    });
                }
                params = Some(lower_params(parse, file, fd)?);
            }
            other => {
                return Err(FrontendError::Unsupported {
                    what: format!("declarator form {other:?}"),
                    loc,
                });
            }
        }
    }

    Ok(params.map(|params| FunctionDeclaration {
        name,
        ret,
        params,
        loc,
    }))
}

fn lower_params(
    parse: &Parse,
    file: &Path,
    fd: &Node<c::FunctionDeclarator>,
) -> Result<Vec<Declaration>> {
    if matches!(fd.node.ellipsis, c::Ellipsis::Some) {
        return Err(FrontendError::Unsupported {
            what: "variadic parameter list".to_string(),
            loc: loc_of(parse, file, fd.span),
        });
    }
    let mut params = Vec::with_capacity(fd.node.parameters.len());
    for param in &fd.node.parameters {
        params.push(lower_param(parse, file, param)?);
    }
    // a lone `(void)` means "no parameters"
    if params.len() == 1 && params[0].name.is_none() && is_bare_void(&params[0].node) {
        params.clear();
    }
    Ok(params)
}

fn lower_param(
    parse: &Parse,
    file: &Path,
    param: &Node<c::ParameterDeclaration>,
) -> Result<Declaration> {
    let loc = loc_of(parse, file, param.span);
    let base = lower_base_type(&param.node.specifiers, &loc)?;
    let mut node = DeclaratorNode::Base { names: base };
    let mut name = None;
    if let Some(declarator) = &param.node.declarator {
        let (ty, declared) = apply_declarator(parse, file, &declarator.node, node, &loc)?;
        node = ty;
        name = declared;
    }
    Ok(Declaration { name, node, loc })
}

/// Apply one declarator level to the type built so far: pointer prefixes
/// first (they bind to the inner type), then the function suffix, then the
/// nested declarator that carries the declared name.
fn apply_declarator(
    parse: &Parse,
    file: &Path,
    declarator: &c::Declarator,
    base: DeclaratorNode,
    loc: &SourceLoc,
) -> Result<(DeclaratorNode, Option<SmolStr>)> {
    let mut ty = base;
    for dd in &declarator.derived {
        if matches!(dd.node, c::DerivedDeclarator::Pointer(_)) {
            ty = DeclaratorNode::pointer(ty);
        }
    }
    for dd in &declarator.derived {
        match &dd.node {
            c::DerivedDeclarator::Pointer(_) => {}
            c::DerivedDeclarator::Function(fd) => {
                ty = DeclaratorNode::Function {
                    ret: Box::new(ty),
                    params: lower_params(parse, file, fd)?,
                };
            }
            other => {
                return Err(FrontendError::Unsupported {
                    what: format!("declarator form {other:?}"),
                    loc: loc.clone(),
                });
            }
        }
    }
    match &declarator.kind.node {
        c::DeclaratorKind::Abstract => Ok((ty, None)),
        c::DeclaratorKind::Identifier(id) => Ok((ty, Some(SmolStr::new(&id.node.name)))),
        c::DeclaratorKind::Declarator(inner) => apply_declarator(parse, file, &inner.node, ty, loc),
    }
}

fn is_typedef(specifiers: &[Node<c::DeclarationSpecifier>]) -> bool {
    specifiers.iter().any(|spec| {
        matches!(
            &spec.node,
            c::DeclarationSpecifier::StorageClass(sc)
                if matches!(sc.node, c::StorageClassSpecifier::Typedef)
        )
    })
}

fn lower_base_type(
    specifiers: &[Node<c::DeclarationSpecifier>],
    loc: &SourceLoc,
) -> Result<Vec<SmolStr>> {
    let mut names = Vec::new();
    for spec in specifiers {
        match &spec.node {
            c::DeclarationSpecifier::TypeSpecifier(ts) => {
                names.push(type_specifier_token(&ts.node, loc)?);
            }
            c::DeclarationSpecifier::TypeQualifier(tq) => {
                if let Some(token) = type_qualifier_token(&tq.node) {
                    names.push(token);
                }
            }
            // storage class and function specifiers don't contribute to
            // the type spelling
            _ => {}
        }
    }
    if names.is_empty() {
        return Err(FrontendError::Unsupported {
            what: "declaration without a type specifier".to_string(),
            loc: loc.clone(),
        });
    }
    Ok(names)
}

fn type_specifier_token(ts: &c::TypeSpecifier, loc: &SourceLoc) -> Result<SmolStr> {
    Ok(match ts {
        c::TypeSpecifier::Void => SmolStr::new("void"),
        c::TypeSpecifier::Char => SmolStr::new("char"),
        c::TypeSpecifier::Short => SmolStr::new("short"),
        c::TypeSpecifier::Int => SmolStr::new("int"),
        c::TypeSpecifier::Long => SmolStr::new("long"),
        c::TypeSpecifier::Float => SmolStr::new("float"),
        c::TypeSpecifier::Double => SmolStr::new("double"),
        c::TypeSpecifier::Signed => SmolStr::new("signed"),
        c::TypeSpecifier::Unsigned => SmolStr::new("unsigned"),
        c::TypeSpecifier::Bool => SmolStr::new("_Bool"),
        c::TypeSpecifier::TypedefName(id) => SmolStr::new(&id.node.name),
        c::TypeSpecifier::Struct(st) => {
            let keyword = match st.node.kind.node {
                c::StructKind::Struct => "struct",
                c::StructKind::Union => "union",
            };
            match &st.node.identifier {
                Some(id) => SmolStr::new(format!("{} {}", keyword, id.node.name)),
                None => {
                    return Err(FrontendError::Unsupported {
                        what: format!("anonymous {keyword} in a signature"),
                        loc: loc.clone(),
                    });
                }
            }
        }
        c::TypeSpecifier::Enum(en) => match &en.node.identifier {
            Some(id) => SmolStr::new(format!("enum {}", id.node.name)),
            None => {
                return Err(FrontendError::Unsupported {
                    what: "anonymous enum in a signature".to_string(),
                    loc: loc.clone(),
                });
            }
        },
        other => {
            return Err(FrontendError::Unsupported {
                what: format!("type specifier {other:?}"),
                loc: loc.clone(),
            });
        }
    })
}

fn type_qualifier_token(tq: &c::TypeQualifier) -> Option<SmolStr> {
    match tq {
        c::TypeQualifier::Const => Some(SmolStr::new("const")),
        c::TypeQualifier::Volatile => Some(SmolStr::new("volatile")),
        _ => None,
    }
}

fn is_bare_void(node: &DeclaratorNode) -> bool {
    matches!(node, DeclaratorNode::Base { names } if names.len() == 1 && names[0] == "void")
}

/// Line position within the preprocessed source, for diagnostics.
fn loc_of(parse: &Parse, file: &Path, span: lang_c::span::Span) -> SourceLoc {
    let upto = span.start.min(parse.source.len());
    let line = parse.source.as_bytes()[..upto]
        .iter()
        .filter(|&&b| b == b'\n')
        .count() as u32
        + 1;
    SourceLoc::new(file.display().to_string(), line)
}
