// substitution engine - sequential global regex replacement

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{RefactorError, Result};
use crate::refactor::Refactor;

/// a substitution pair compiled for application
#[derive(Debug, Clone)]
pub struct CompiledPair {
    pub pattern: Regex,
    pub replacement: String,
}

/// compile every pair of a refactor, in order
///
/// sources are compiled verbatim: regex metacharacters in user input keep
/// their special meaning.
pub fn compile_pairs(refactor: &Refactor) -> Result<Vec<CompiledPair>> {
    refactor
        .pairs
        .iter()
        .map(|pair| {
            let pattern =
                Regex::new(&pair.source).map_err(|source| RefactorError::InvalidPattern {
                    pattern: pair.source.clone(),
                    source,
                })?;
            Ok(CompiledPair {
                pattern,
                replacement: pair.replacement.clone(),
            })
        })
        .collect()
}

/// apply every pair in order, each over the output of the previous one
///
/// replacements run sequentially, not simultaneously: a later pair may match
/// text produced by an earlier pair's replacement. callers rely on that order.
pub fn refactor_string(pairs: &[CompiledPair], text: &str) -> String {
    let mut result = text.to_string();
    for pair in pairs {
        result = pair
            .pattern
            .replace_all(&result, pair.replacement.as_str())
            .into_owned();
    }
    result
}

lazy_static! {
    static ref METACHARACTERS: Regex = Regex::new(r"[\\.+*?()\[\]{}|^$]").unwrap();
}

/// true when pair text contains regex metacharacters worth a heads-up
pub fn has_regex_metacharacters(input: &str) -> bool {
    METACHARACTERS.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refactor::{parse_input, SubstitutionPair};

    fn compiled(pairs: &[(&str, &str)]) -> Vec<CompiledPair> {
        let refactor = Refactor {
            pairs: pairs
                .iter()
                .map(|(source, replacement)| SubstitutionPair {
                    source: source.to_string(),
                    replacement: replacement.to_string(),
                })
                .collect(),
        };
        compile_pairs(&refactor).unwrap()
    }

    #[test]
    fn capitalized_variant_applies_before_literal() {
        let refactor = parse_input("ge wk").unwrap();
        let pairs = compile_pairs(&refactor).unwrap();
        assert_eq!(refactor_string(&pairs, "Germany germany"), "Wkrmany wkrmany");
    }

    #[test]
    fn pair_order_is_not_commutative() {
        let forward = compiled(&[("a", "b"), ("b", "c")]);
        let reverse = compiled(&[("b", "c"), ("a", "b")]);
        assert_eq!(refactor_string(&forward, "a b"), "c c");
        assert_eq!(refactor_string(&reverse, "a b"), "b c");
    }

    #[test]
    fn empty_text_maps_to_empty_text() {
        let pairs = compiled(&[("ge", "wk")]);
        assert_eq!(refactor_string(&pairs, ""), "");
    }

    #[test]
    fn empty_pair_list_leaves_text_unchanged() {
        assert_eq!(refactor_string(&[], "left alone"), "left alone");
    }

    #[test]
    fn sources_are_regular_expressions() {
        let pairs = compiled(&[("c.t", "dog")]);
        assert_eq!(refactor_string(&pairs, "cat cot cut"), "dog dog dog");
    }

    #[test]
    fn replacements_expand_captures() {
        let pairs = compiled(&[(r"(\w+)@example\.com", "$1@test.dev")]);
        assert_eq!(
            refactor_string(&pairs, "mail me at jo@example.com"),
            "mail me at jo@test.dev"
        );
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let refactor = Refactor {
            pairs: vec![SubstitutionPair {
                source: "(".to_string(),
                replacement: "x".to_string(),
            }],
        };
        assert!(matches!(
            compile_pairs(&refactor),
            Err(RefactorError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn metacharacter_detection() {
        assert!(has_regex_metacharacters("foo.* bar"));
        assert!(!has_regex_metacharacters("channels groups"));
    }
}
