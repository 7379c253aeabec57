//! Derivation of storage-collection identifiers from tenant names.
//!
//! [`sanitize_collection_name`] is total: any input, including one made
//! entirely of invalid characters, yields an identifier that passes
//! [`is_valid_collection_name`], starts with [`COLLECTION_PREFIX`] and
//! contains only `[a-z0-9_]`.
//!
//! The function is not idempotent in general. A name whose sanitized
//! core is empty maps to the bare prefix `org_`, and sanitizing `org_`
//! again yields `org_org`. Renames always re-derive from the raw tenant
//! name, never from a previous identifier, so this never compounds.

/// Prefix carried by every tenant collection identifier.
pub const COLLECTION_PREFIX: &str = "org_";

/// Identifiers starting with this are reserved by the storage engine.
const RESERVED_PREFIX: &str = "system.";

/// Derive the collection identifier for a tenant name.
pub fn sanitize_collection_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    // Invalid characters become `_`, and runs of `_` collapse to one.
    let mut collapsed = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            c
        } else {
            '_'
        };
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }

    let mut sanitized = collapsed.trim_matches('_').to_string();

    if sanitized
        .chars()
        .next()
        .is_some_and(|c| !(c.is_ascii_lowercase() || c == '_'))
    {
        sanitized.insert_str(0, COLLECTION_PREFIX);
    }

    if !sanitized.starts_with(COLLECTION_PREFIX) {
        sanitized.insert_str(0, COLLECTION_PREFIX);
    }

    if sanitized.len() < COLLECTION_PREFIX.len() {
        sanitized.insert_str(0, COLLECTION_PREFIX);
    }

    sanitized
}

/// Structural check applied to every identifier before it is used.
pub fn is_valid_collection_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('$') && !name.starts_with(RESERVED_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_gets_prefixed() {
        assert_eq!(sanitize_collection_name("TestOrg"), "org_testorg");
    }

    #[test]
    fn spaces_and_punctuation_collapse() {
        assert_eq!(sanitize_collection_name("  Acme -- Corp!  "), "org_acme_corp");
        assert_eq!(sanitize_collection_name("a...b___c"), "org_a_b_c");
    }

    #[test]
    fn leading_digit_is_prefixed_once() {
        assert_eq!(sanitize_collection_name("123 Widgets"), "org_123_widgets");
    }

    #[test]
    fn existing_prefix_is_kept() {
        assert_eq!(sanitize_collection_name("Org Acme"), "org_acme");
        assert_eq!(sanitize_collection_name("org_acme"), "org_acme");
    }

    #[test]
    fn all_invalid_characters_yield_bare_prefix() {
        assert_eq!(sanitize_collection_name("!!!"), "org_");
        assert_eq!(sanitize_collection_name("   "), "org_");
        assert_eq!(sanitize_collection_name("日本"), "org_");
    }

    #[test]
    fn non_ascii_letters_are_replaced() {
        assert_eq!(sanitize_collection_name("Café Noir"), "org_caf_noir");
    }

    #[test]
    fn regex_metacharacters_are_plain_characters() {
        assert_eq!(sanitize_collection_name("a.*b$"), "org_a_b");
    }

    #[test]
    fn resanitizing_bare_prefix_stacks() {
        let once = sanitize_collection_name("???");
        assert_eq!(once, "org_");
        assert_eq!(sanitize_collection_name(&once), "org_org");
    }

    #[test]
    fn resanitizing_regular_output_is_stable() {
        let once = sanitize_collection_name("Acme Corp");
        assert_eq!(sanitize_collection_name(&once), once);
    }

    #[test]
    fn validator_rejects_reserved_and_dollar() {
        assert!(!is_valid_collection_name(""));
        assert!(!is_valid_collection_name("system.users"));
        assert!(!is_valid_collection_name("org_$cash"));
        assert!(is_valid_collection_name("org_acme"));
        assert!(is_valid_collection_name("org_"));
    }
}
