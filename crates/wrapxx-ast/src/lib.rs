//! C declarator model for the wrapxx wrapper generator.
//!
//! These types mirror the shape of a C declaration as delivered by the
//! frontend: a base type at the bottom of every chain, optionally wrapped
//! in pointer and function declarators. The tree is produced once per run
//! and consumed read-only by the generator; renaming never mutates it.

use std::fmt;

// Re-export for use by other crates
pub use smol_str::SmolStr;

/// Source location (file and line) of a declaration.
///
/// Carried through for diagnostics only; it never influences generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceLoc {
    pub file: String,
    pub line: u32,
}

impl SourceLoc {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// A placeholder location for trees built in memory.
    pub fn unknown() -> Self {
        Self::default()
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file.is_empty() {
            write!(f, "<unknown>")
        } else {
            write!(f, "{}:{}", self.file, self.line)
        }
    }
}

/// One level of a C declarator.
///
/// Exactly one `Base` node terminates every chain. Only the shapes that
/// occur in ordinary function signatures are representable: base types,
/// pointers, and function declarators (with their own parameter lists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaratorNode {
    /// A base type spelled as one or more type-name tokens,
    /// e.g. `["unsigned", "int"]` or `["VirtContext"]`.
    Base { names: Vec<SmolStr> },
    /// A pointer to the wrapped declarator.
    Pointer { inner: Box<DeclaratorNode> },
    /// A function declarator: return type plus ordered parameters.
    Function {
        ret: Box<DeclaratorNode>,
        params: Vec<Declaration>,
    },
}

impl DeclaratorNode {
    pub fn base<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        DeclaratorNode::Base {
            names: names.into_iter().map(|n| SmolStr::new(n.as_ref())).collect(),
        }
    }

    pub fn pointer(inner: DeclaratorNode) -> Self {
        DeclaratorNode::Pointer {
            inner: Box::new(inner),
        }
    }

    pub fn function(ret: DeclaratorNode, params: Vec<Declaration>) -> Self {
        DeclaratorNode::Function {
            ret: Box::new(ret),
            params,
        }
    }

    /// The type-name tokens of the terminal base node.
    pub fn base_names(&self) -> &[SmolStr] {
        match self {
            DeclaratorNode::Base { names } => names,
            DeclaratorNode::Pointer { inner } => inner.base_names(),
            DeclaratorNode::Function { ret, .. } => ret.base_names(),
        }
    }
}

/// A named binding of one declarator, e.g. a single parameter.
///
/// Parameters in prototypes may be unnamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: Option<SmolStr>,
    pub node: DeclaratorNode,
    pub loc: SourceLoc,
}

impl Declaration {
    pub fn new(name: impl AsRef<str>, node: DeclaratorNode) -> Self {
        Self {
            name: Some(SmolStr::new(name.as_ref())),
            node,
            loc: SourceLoc::unknown(),
        }
    }

    pub fn unnamed(node: DeclaratorNode) -> Self {
        Self {
            name: None,
            node,
            loc: SourceLoc::unknown(),
        }
    }

    pub fn with_loc(mut self, loc: SourceLoc) -> Self {
        self.loc = loc;
        self
    }
}

/// One C function signature to be wrapped: name, return declarator and
/// ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    pub name: SmolStr,
    pub ret: DeclaratorNode,
    pub params: Vec<Declaration>,
    pub loc: SourceLoc,
}

impl FunctionDeclaration {
    pub fn new(name: impl AsRef<str>, ret: DeclaratorNode, params: Vec<Declaration>) -> Self {
        Self {
            name: SmolStr::new(name.as_ref()),
            ret,
            params,
            loc: SourceLoc::unknown(),
        }
    }

    pub fn with_loc(mut self, loc: SourceLoc) -> Self {
        self.loc = loc;
        self
    }
}
