//! Identifier translation.
//!
//! Two deterministic renaming mechanisms: a lookup table with identity
//! fallback for parameter identifiers, and the method-name derivation
//! (prefix strip, wholesale remap, casing normalization).

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::collections::BTreeMap;

/// Table-based identifier translation. Lookups that miss return the input
/// unchanged; translation is never an error.
#[derive(Debug, Clone, Default)]
pub struct IdentTranslator {
    table: FxHashMap<SmolStr, SmolStr>,
}

impl IdentTranslator {
    pub fn from_table(table: &BTreeMap<String, String>) -> Self {
        Self {
            table: table
                .iter()
                .map(|(from, to)| (SmolStr::new(from), SmolStr::new(to)))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn translate(&self, id: &str) -> SmolStr {
        match self.table.get(id) {
            Some(translated) => translated.clone(),
            None => SmolStr::new(id),
        }
    }
}

/// Derives wrapper method names from C function names.
#[derive(Debug, Clone)]
pub struct MethodNamer {
    prefix: String,
    renames: FxHashMap<SmolStr, SmolStr>,
}

impl MethodNamer {
    pub fn new(prefix: impl Into<String>, renames: &BTreeMap<String, String>) -> Self {
        Self {
            prefix: prefix.into(),
            renames: renames
                .iter()
                .map(|(from, to)| (SmolStr::new(from), SmolStr::new(to)))
                .collect(),
        }
    }

    /// Strip the API prefix, apply any wholesale remap for irregular
    /// upstream names, then normalize the leading letter's case.
    pub fn derive(&self, original: &str) -> SmolStr {
        let stripped = original.strip_prefix(&self.prefix).unwrap_or(original);
        if let Some(mapped) = self.renames.get(stripped) {
            return mapped.clone();
        }
        decapitalize_leading(stripped)
    }
}

/// Lowercase the leading letter of a title-cased name.
///
/// Names whose second character is uppercase (acronym-led names such as
/// `APIVersion`) are left untouched: lowercasing only the first letter
/// would corrupt them. One-character names count as title-cased.
pub fn decapitalize_leading(name: &str) -> SmolStr {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return SmolStr::default();
    };
    let second_is_upper = name.chars().nth(1).is_some_and(|c| c.is_ascii_uppercase());
    if second_is_upper {
        SmolStr::new(name)
    } else {
        let mut out = String::with_capacity(name.len());
        out.push(first.to_ascii_lowercase());
        out.push_str(chars.as_str());
        SmolStr::new(out)
    }
}
