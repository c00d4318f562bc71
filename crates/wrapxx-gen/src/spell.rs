//! Type spelling reconstruction.
//!
//! Walks a declarator tree bottom-up and rebuilds the grammatically
//! correct C spelling of the type, optionally with the declared name
//! embedded at the right position. Function-pointer declarators put the
//! name inside the `(*name)` group; everything else appends it after the
//! type tokens.
//!
//! The walk tracks "the construct just emitted was a function-pointer
//! group" as explicit state, so a pointer wrapping a function declarator
//! is absorbed into the `(*` form instead of emitting a second, dangling
//! `*`.

use crate::rename::IdentTranslator;
use wrapxx_ast::{Declaration, DeclaratorNode, SmolStr};

/// One element of a reconstructed spelling.
enum Token {
    /// A base type-name token.
    Word(SmolStr),
    /// A pointer mark.
    Star,
    /// Opening of a function-pointer group: `(*`.
    FnPtrOpen,
    /// Position of the declared name inside a function-pointer group.
    NameSlot,
    /// Closing of a function-pointer group: `)`.
    FnPtrClose,
    /// A fully rendered, parenthesized parameter list.
    ParamList(String),
}

struct TokenStream {
    tokens: Vec<Token>,
    /// True while the most recently emitted construct is a
    /// function-pointer group whose `(*` still accounts for one pointer.
    fn_ptr_group: bool,
}

fn walk(node: &DeclaratorNode, xl: &IdentTranslator, out: &mut TokenStream) {
    match node {
        DeclaratorNode::Base { names } => {
            out.tokens
                .extend(names.iter().map(|n| Token::Word(n.clone())));
            out.fn_ptr_group = false;
        }
        DeclaratorNode::Pointer { inner } => {
            walk(inner, xl, out);
            if out.fn_ptr_group {
                // the `(*` of the group already spells this pointer
                out.fn_ptr_group = false;
            } else {
                out.tokens.push(Token::Star);
            }
        }
        DeclaratorNode::Function { ret, params } => {
            walk(ret, xl, out);
            out.tokens.push(Token::FnPtrOpen);
            out.tokens.push(Token::NameSlot);
            out.tokens.push(Token::FnPtrClose);
            let rendered: Vec<String> = params.iter().map(|p| spell_declaration(p, xl)).collect();
            out.tokens.push(Token::ParamList(rendered.join(", ")));
            out.fn_ptr_group = true;
        }
    }
}

fn assemble(stream: &TokenStream, name: Option<&str>) -> String {
    let has_slot = stream
        .tokens
        .iter()
        .any(|t| matches!(t, Token::NameSlot));
    let mut out = String::new();
    for token in &stream.tokens {
        match token {
            Token::Word(word) => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(word);
            }
            Token::Star => {
                if !out.is_empty() && !out.ends_with('*') {
                    out.push(' ');
                }
                out.push('*');
            }
            Token::FnPtrOpen => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str("(*");
            }
            Token::NameSlot => {
                if let Some(name) = name {
                    out.push_str(name);
                }
            }
            Token::FnPtrClose => out.push(')'),
            Token::ParamList(list) => {
                out.push('(');
                out.push_str(list);
                out.push(')');
            }
        }
    }
    if !has_slot {
        if let Some(name) = name {
            if !out.is_empty() && !out.ends_with('*') {
                out.push(' ');
            }
            out.push_str(name);
        }
    }
    out
}

/// Spell a declarator, embedding `name` at its grammatical position when
/// given. Passing `None` yields the abstract (name-free) spelling.
pub fn spell(node: &DeclaratorNode, name: Option<&str>, xl: &IdentTranslator) -> String {
    let mut stream = TokenStream {
        tokens: Vec::new(),
        fn_ptr_group: false,
    };
    walk(node, xl, &mut stream);
    assemble(&stream, name)
}

/// Abstract spelling of a declarator, e.g. for return types.
pub fn spell_type(node: &DeclaratorNode, xl: &IdentTranslator) -> String {
    spell(node, None, xl)
}

/// Spell one declaration, translating its identifier at capture time.
pub fn spell_declaration(decl: &Declaration, xl: &IdentTranslator) -> String {
    let translated = decl.name.as_ref().map(|n| xl.translate(n));
    spell(&decl.node, translated.as_deref(), xl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wrapxx_ast::DeclaratorNode as N;

    fn xl() -> IdentTranslator {
        IdentTranslator::empty()
    }

    #[test]
    fn base_types_join_tokens_with_spaces() {
        assert_eq!(spell(&N::base(["int"]), Some("power"), &xl()), "int power");
        assert_eq!(
            spell(&N::base(["unsigned", "short"]), Some("flag"), &xl()),
            "unsigned short flag"
        );
    }

    #[test]
    fn pointers_attach_to_the_name() {
        let node = N::pointer(N::base(["float"]));
        assert_eq!(spell(&node, Some("force"), &xl()), "float *force");
        assert_eq!(spell_type(&node, &xl()), "float *");
    }

    #[test]
    fn double_pointers_stack_without_spaces() {
        let node = N::pointer(N::pointer(N::base(["char"])));
        assert_eq!(spell(&node, Some("argv"), &xl()), "char **argv");
    }

    #[test]
    fn function_pointer_embeds_name_in_group() {
        let node = N::pointer(N::function(
            N::base(["void"]),
            vec![
                Declaration::unnamed(N::base(["VirtContext"])),
                Declaration::unnamed(N::pointer(N::base(["void"]))),
            ],
        ));
        assert_eq!(
            spell(&node, Some("fn"), &xl()),
            "void (*fn)(VirtContext, void *)"
        );
    }

    #[test]
    fn function_pointer_without_name_stays_abstract() {
        let node = N::pointer(N::function(
            N::base(["int"]),
            vec![Declaration::unnamed(N::base(["int"]))],
        ));
        assert_eq!(spell_type(&node, &xl()), "int (*)(int)");
    }

    #[test]
    fn pointer_absorbed_by_group_leaves_no_bare_star() {
        let node = N::pointer(N::function(N::base(["void"]), vec![]));
        let spelled = spell(&node, Some("cb"), &xl());
        assert_eq!(spelled, "void (*cb)()");
        assert!(!spelled.contains("*("));
        assert!(!spelled.contains(")*"));
    }

    #[test]
    fn named_parameters_inside_groups_are_translated() {
        let table = [("fichier".to_string(), "fh".to_string())]
            .into_iter()
            .collect();
        let xl = IdentTranslator::from_table(&table);
        let node = N::pointer(N::function(
            N::base(["int"]),
            vec![Declaration::new(
                "fichier",
                N::pointer(N::base(["FILE"])),
            )],
        ));
        assert_eq!(spell(&node, Some("log"), &xl), "int (*log)(FILE *fh)");
    }

    #[test]
    fn function_returning_pointer_spells_return_star_before_group() {
        let node = N::pointer(N::function(N::pointer(N::base(["char"])), vec![]));
        assert_eq!(spell(&node, Some("get"), &xl()), "char * (*get)()");
    }
}
