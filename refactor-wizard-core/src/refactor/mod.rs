// refactor module - substitution pairs and the operations over them

pub mod engine;
pub mod parser;

// re-export key public items for convenient access
pub use engine::{compile_pairs, has_regex_metacharacters, refactor_string, CompiledPair};
pub use parser::parse_input;

use std::path::PathBuf;

/// a single source -> replacement substitution
///
/// the source is a regular-expression pattern and the replacement a template:
/// backreferences such as $1 are expanded by the regex engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPair {
    pub source: String,
    pub replacement: String,
}

/// an ordered list of substitution pairs parsed from one pair-text input
///
/// immutable after parsing; applied in stored order on every use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refactor {
    pub pairs: Vec<SubstitutionPair>,
}

/// what a refactor is applied to
#[derive(Debug, Clone)]
pub enum RefactorTarget {
    /// a host-supplied text span, rewritten and handed back
    Selection(String),
    /// a directory tree, rewritten recursively (contents and names)
    Directory(PathBuf),
}
