//! Property tests for the path tokenizer.

use aml_schema::{Token, tokenize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn never_panics(path in ".{0,40}") {
        let _ = tokenize(&path);
    }

    #[test]
    fn dotted_identifiers_become_fields(names in prop::collection::vec("[a-z_][a-z0-9_]{0,8}", 1..6)) {
        let path = format!("$.{}", names.join("."));
        let expected: Vec<Token> = names.iter().cloned().map(Token::Field).collect();
        prop_assert_eq!(tokenize(&path), expected);
    }

    #[test]
    fn indices_become_wildcards(name in "[a-z]{1,6}", index in 0u32..1000) {
        let path = format!("$.{name}[{index}]");
        prop_assert_eq!(tokenize(&path), vec![Token::Field(name), Token::ArrayWildcard]);
    }
}
