// headgate-core/src/infrastructure/config/env.rs
//
// Environment-variable substitution for the pipeline documents.
//
// Supported forms:
//   ${VAR}          -> value of VAR; collected as missing when unset
//   ${VAR:-default} -> value of VAR, or `default` when unset
//   $${...}         -> literal ${...} (for values the remote service itself
//                      interpolates, e.g. namespace formats)

use std::sync::LazyLock;

use regex::{Captures, Regex};

static ENV_VAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$\{[^}]*\}|\$\{([a-zA-Z_][a-zA-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("env var regex pattern is invalid - this is a bug")
});

/// Expand environment placeholders in `content`.
///
/// Returns the expanded text plus the names of every referenced variable
/// that is unset and has no default, deduplicated in order of appearance.
/// Unresolved placeholders are left in place so the caller can abort with
/// the full list instead of shipping half-expanded configuration.
pub fn expand_env(content: &str) -> (String, Vec<String>) {
    let mut missing: Vec<String> = Vec::new();

    let expanded = ENV_VAR_REGEX.replace_all(content, |caps: &Captures| {
        let whole = &caps[0];
        if let Some(stripped) = whole.strip_prefix("$$") {
            // Escaped: `$${X}` becomes the literal `${X}`.
            return format!("${stripped}");
        }
        let name = &caps[1];
        match std::env::var(name) {
            Ok(value) => value,
            Err(_) => match caps.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                    whole.to_string()
                }
            },
        }
    });

    (expanded.into_owned(), missing)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // PATH is guaranteed present in any test environment; the
    // HEADGATE_TEST_* names are guaranteed absent.

    #[test]
    fn test_set_variable_is_substituted() {
        let (expanded, missing) = expand_env("bin: ${PATH}");
        assert_eq!(expanded, format!("bin: {}", std::env::var("PATH").unwrap()));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_default_applies_when_unset() {
        let (expanded, missing) = expand_env("port: ${HEADGATE_TEST_UNSET_PORT:-1433}");
        assert_eq!(expanded, "port: 1433");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_escaped_placeholder_stays_literal() {
        let (expanded, missing) = expand_env("format: $${SOURCE_NAMESPACE}");
        assert_eq!(expanded, "format: ${SOURCE_NAMESPACE}");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_all_missing_variables_are_collected() {
        let content = "a: ${HEADGATE_TEST_MISSING_A}\nb: ${HEADGATE_TEST_MISSING_B}\nc: ${HEADGATE_TEST_MISSING_A}";
        let (expanded, missing) = expand_env(content);
        assert_eq!(
            missing,
            vec!["HEADGATE_TEST_MISSING_A", "HEADGATE_TEST_MISSING_B"]
        );
        // Placeholders stay intact for the error report.
        assert!(expanded.contains("${HEADGATE_TEST_MISSING_A}"));
    }

    #[test]
    fn test_plain_text_passes_through() {
        let (expanded, missing) = expand_env("name: loans\ncount: 4");
        assert_eq!(expanded, "name: loans\ncount: 4");
        assert!(missing.is_empty());
    }
}
