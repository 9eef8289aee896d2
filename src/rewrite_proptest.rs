//! Property-based tests for the pure rewrite functions.
//!
//! Re-running a provisioning step must not keep editing the same files, so
//! every rewrite is checked to be a no-op on its own output.

#[cfg(test)]
mod proptest_tests {
    use crate::rewrite::compression::append_level_directive;
    use crate::rewrite::document_root::{placeholder_pattern, substitute_document_root};
    use crate::rewrite::fancy_indexing::{toggle_icons_alias, ICONS_ALIAS};
    use proptest::prelude::*;

    fn config_line() -> impl Strategy<Value = Vec<u8>> {
        prop_oneof![
            "[ -~]{0,40}".prop_map(|s| format!("{}\n", s)),
            Just("DocumentRoot /var/www/$DOCUMENT_ROOT\n".to_string()),
            Just("<Directory /var/www/${DOCUMENT_ROOT}/>\n".to_string()),
            Just("\t<Directory \"/usr/share/apache2/icons\">\n".to_string()),
            Just(format!("\t#{}\n", ICONS_ALIAS)),
            Just("DeflateCompressionLevel 3\n".to_string()),
        ]
        .prop_map(String::into_bytes)
    }

    fn raw_line() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(any::<u8>(), 0..40).prop_map(|mut bytes| {
            bytes.push(b'\n');
            bytes
        })
    }

    fn config_file() -> impl Strategy<Value = Vec<Vec<u8>>> {
        prop::collection::vec(prop_oneof![4 => config_line(), 1 => raw_line()], 0..20)
    }

    // ============================================================================
    // document root substitution
    // ============================================================================

    proptest! {
        /// Property: a second substitution with the same value changes nothing
        #[test]
        fn substitution_is_idempotent(lines in config_file(), value in "[a-z0-9_/-]{1,20}") {
            let pattern = placeholder_pattern().unwrap();
            let (once, _) = substitute_document_root(&lines, &pattern, &value);
            let (twice, changed) = substitute_document_root(&once, &pattern, &value);
            prop_assert!(!changed);
            prop_assert_eq!(once, twice);
        }

        /// Property: lines without a `$` are returned untouched
        #[test]
        fn substitution_ignores_lines_without_dollar(
            lines in prop::collection::vec("[ -#%-~]{0,40}\n".prop_map(String::into_bytes), 0..20)
        ) {
            let pattern = placeholder_pattern().unwrap();
            let (result, changed) = substitute_document_root(&lines, &pattern, "custom");
            prop_assert!(!changed);
            prop_assert_eq!(result, lines);
        }
    }

    // ============================================================================
    // compression level directive
    // ============================================================================

    proptest! {
        /// Property: appending the same level twice adds exactly one line
        #[test]
        fn level_directive_is_idempotent(lines in config_file(), level in "[1-9]") {
            let (once, _) = append_level_directive(&lines, &level);
            let (twice, changed) = append_level_directive(&once, &level);
            prop_assert!(!changed);
            prop_assert!(once.len() <= lines.len() + 1);
            prop_assert_eq!(once, twice);
        }
    }

    // ============================================================================
    // icons alias toggle
    // ============================================================================

    proptest! {
        /// Property: toggling to the same state twice changes nothing the second time
        #[test]
        fn icons_toggle_is_idempotent(lines in config_file(), enabled in any::<bool>()) {
            let (once, _) = toggle_icons_alias(&lines, enabled);
            let (twice, changed) = toggle_icons_alias(&once, enabled);
            prop_assert!(!changed);
            prop_assert_eq!(once, twice);
        }

        /// Property: disabling never adds or removes lines
        #[test]
        fn icons_disable_preserves_line_count(lines in config_file()) {
            let (result, _) = toggle_icons_alias(&lines, false);
            prop_assert_eq!(result.len(), lines.len());
        }
    }
}
