// crates/observatory-gate-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Unit tests for catalog parity and locale parsing.
// Purpose: Ensure CLI localization remains consistent across supported locales.
// Dependencies: observatory-gate-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies the CLI message catalogs stay in sync, locale parsing is tolerant,
//! and locale templates preserve placeholder parity with English.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate_in;

fn placeholder_names(template: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let end = after.find('}').unwrap_or_else(|| panic!("unclosed placeholder in {template}"));
        names.insert(after[..end].to_string());
        rest = &after[end + 1..];
    }
    names
}

#[test]
fn catalogs_have_identical_keys() {
    let english: BTreeSet<&str> = catalog_entries_for(Locale::En).iter().map(|(k, _)| *k).collect();
    for locale in SUPPORTED_LOCALES {
        let keys: BTreeSet<&str> = catalog_entries_for(*locale).iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, english, "key mismatch for {}", locale.as_str());
    }
}

#[test]
fn catalogs_have_no_duplicate_keys() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        assert_eq!(catalog_for(*locale).len(), entries.len(), "dupes in {}", locale.as_str());
    }
}

#[test]
fn placeholders_match_english() {
    let english = catalog_for(Locale::En);
    for locale in SUPPORTED_LOCALES {
        for (key, template) in catalog_entries_for(*locale) {
            let reference = english.get(key).unwrap();
            assert_eq!(
                placeholder_names(template),
                placeholder_names(reference),
                "placeholder mismatch for {key} in {}",
                locale.as_str()
            );
        }
    }
}

#[test]
fn locale_parse_is_tolerant() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse(" CA "), Some(Locale::Ca));
    assert_eq!(Locale::parse("en_US"), Some(Locale::En));
    assert_eq!(Locale::parse("ca-ES"), Some(Locale::Ca));
    assert_eq!(Locale::parse("fr"), None);
    assert_eq!(Locale::parse(""), None);
}

#[test]
fn translate_substitutes_placeholders() {
    let output = translate_in(Locale::En, "gate.result.passed", vec![
        MessageArg::new("score", "100"),
        MessageArg::new("threshold", "90"),
    ]);
    assert_eq!(output, "Observatory score 100 meets the passing score 90.");
}

#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate_in(Locale::Ca, "missing.key", Vec::new()), "missing.key");
}
