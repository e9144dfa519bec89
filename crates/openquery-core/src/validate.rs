//! Query-string character validation
//!
//! Free-text `search` and `sort` input is accepted only if every character
//! belongs to a fixed class: ASCII letters, digits, and the punctuation the
//! query grammar needs for field paths, quoting, ranges, and boolean
//! operators. Containment is the whole contract — no attempt is made to
//! validate query syntax semantically. Anything outside the class is the
//! injection surface, so it is rejected before the string can reach the
//! cluster.

/// Punctuation permitted in query strings, beyond ASCII alphanumerics.
///
/// Covers field paths (`.` `_`), field/value separators (`:`), grouping
/// (`( )`), phrases (`"` `'`), ranges (`[ ]` `{ }` `>` `<` `=`), signs and
/// joins (`- +` `,` `%` `&` `/`), and the space between terms.
pub const SUPPORTED_PUNCTUATION: &[char] = &[
    '.', '_', ':', '(', ')', '"', '[', ']', '{', '}', '-', '+', '>', '<', '=', ',', '%', '&', '/',
    '\'', ' ',
];

const fn is_supported_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '.' | '_'
                | ':'
                | '('
                | ')'
                | '"'
                | '['
                | ']'
                | '{'
                | '}'
                | '-'
                | '+'
                | '>'
                | '<'
                | '='
                | ','
                | '%'
                | '&'
                | '/'
                | '\''
                | ' '
        )
}

/// Whether every character of `s` belongs to the supported query class.
///
/// Pure and side-effect free; the same check guards both `search` strings
/// and `sort` expressions. The empty string is trivially supported.
#[must_use]
pub fn is_supported_query_string(s: &str) -> bool {
    s.chars().all(is_supported_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_typical_field_query() {
        assert!(is_supported_query_string(
            "patient.drug.medicinalproduct:\"ASPIRIN\""
        ));
    }

    #[test]
    fn accepts_range_and_boolean_syntax() {
        assert!(is_supported_query_string(
            "receivedate:[20040101+TO+20081231] AND (serious:1 OR seriousnessdeath:1)"
        ));
    }

    #[test]
    fn accepts_empty_string() {
        assert!(is_supported_query_string(""));
    }

    #[test]
    fn rejects_semicolon() {
        assert!(!is_supported_query_string("brand_name:advil;drop"));
    }

    #[test]
    fn rejects_backslash_and_caret() {
        assert!(!is_supported_query_string(r"field:\x00"));
        assert!(!is_supported_query_string("boost^2"));
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(!is_supported_query_string("naïve"));
        assert!(!is_supported_query_string("字段:值"));
    }

    #[test]
    fn punctuation_table_matches_checker() {
        for &c in SUPPORTED_PUNCTUATION {
            assert!(is_supported_query_string(&c.to_string()), "{c:?}");
        }
    }

    proptest! {
        /// Strings drawn entirely from the supported class always validate.
        #[test]
        fn supported_alphabet_always_accepted(
            s in r#"[A-Za-z0-9._:()\[\]{}"'\-+><=,%&/ ]{0,64}"#
        ) {
            prop_assert!(is_supported_query_string(&s));
        }

        /// One character outside the class anywhere in the string rejects it.
        #[test]
        fn single_unsupported_char_rejected(
            prefix in r#"[A-Za-z0-9._: ]{0,16}"#,
            bad in r"[;!?@#^~\\|*$]",
            suffix in r#"[A-Za-z0-9._: ]{0,16}"#,
        ) {
            let s = format!("{prefix}{bad}{suffix}");
            prop_assert!(!is_supported_query_string(&s));
        }
    }
}
