//! Language rule registry
//!
//! Embedded rule sets are compiled lazily, once per language, and shared for
//! the lifetime of the process. After first use a lookup only reads
//! immutable data.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::language::config::{is_well_formed_code, LanguageConfig};
use crate::language::rules::RuleSet;

/// What to do with a code that resolves to no embedded language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Fail with `Error::UnsupportedLanguage`
    #[default]
    Strict,
    /// Use the named language instead
    Default(String),
}

/// Code and display name of an embedded language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: String,
}

macro_rules! embedded {
    ($($code:literal),* $(,)?) => {
        &[$(($code, include_str!(concat!("../../configs/languages/", $code, ".toml")))),*]
    };
}

/// Embedded language configurations
const EMBEDDED: &[(&str, &str)] = embedded![
    "am", "ar", "bg", "bn", "ca", "da", "de", "el", "en", "es", "fi", "fr", "gu", "hi", "hy",
    "it", "ja", "kk", "kn", "ml", "mr", "my", "nl", "pa", "pl", "pt", "ru", "sk", "ta", "te",
    "zh",
];

const FALLBACKS_TOML: &str = include_str!("../../configs/fallbacks.toml");

struct Entry {
    source: &'static str,
    rules: OnceLock<Arc<RuleSet>>,
}

#[derive(Debug, Deserialize)]
struct FallbackTable {
    fallbacks: HashMap<String, Vec<String>>,
}

static REGISTRY: OnceLock<HashMap<&'static str, Entry>> = OnceLock::new();
static FALLBACKS: OnceLock<HashMap<String, Vec<String>>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, Entry> {
    REGISTRY.get_or_init(|| {
        EMBEDDED
            .iter()
            .map(|&(code, source)| {
                (
                    code,
                    Entry {
                        source,
                        rules: OnceLock::new(),
                    },
                )
            })
            .collect()
    })
}

fn fallbacks() -> &'static HashMap<String, Vec<String>> {
    FALLBACKS.get_or_init(|| match toml::from_str::<FallbackTable>(FALLBACKS_TOML) {
        Ok(table) => table.fallbacks,
        Err(e) => {
            log::warn!("failed to load language fallbacks: {e}");
            HashMap::new()
        }
    })
}

/// Normalize a language code: trim, lowercase, `_` to `-`
///
/// Returns `None` for malformed codes.
pub fn normalize(code: &str) -> Option<String> {
    let normalized: String = code
        .trim()
        .chars()
        .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect();
    is_well_formed_code(&normalized).then_some(normalized)
}

/// Resolve a normalized code to an embedded language
///
/// Tries the code itself, then its fallback chain, then its primary subtag.
/// Each code is visited at most once, so cyclic fallback data terminates.
pub fn resolve(code: &str) -> Option<&'static str> {
    let registry = registry();
    let fallbacks = fallbacks();

    let mut visited = HashSet::new();
    let mut stack = vec![code.to_string()];

    while let Some(candidate) = stack.pop() {
        if !visited.insert(candidate.clone()) {
            continue;
        }
        if let Some((&key, _)) = registry.get_key_value(candidate.as_str()) {
            return Some(key);
        }
        if let Some((primary, _)) = candidate.split_once('-') {
            stack.push(primary.to_string());
        }
        if let Some(chain) = fallbacks.get(&candidate) {
            stack.extend(chain.iter().rev().cloned());
        }
    }

    None
}

/// Look up rules for a language code, failing on unknown codes
pub fn lookup(code: &str) -> Result<Arc<RuleSet>> {
    lookup_with(code, &FallbackPolicy::Strict)
}

/// Look up rules for a language code under the given fallback policy
pub fn lookup_with(code: &str, policy: &FallbackPolicy) -> Result<Arc<RuleSet>> {
    if let Some(resolved) = normalize(code).as_deref().and_then(resolve) {
        if resolved != code {
            log::debug!("language '{code}' resolved to '{resolved}'");
        }
        return load(resolved, &mut Vec::new());
    }

    match policy {
        FallbackPolicy::Strict => Err(Error::unsupported(code)),
        FallbackPolicy::Default(fallback) => {
            let resolved = normalize(fallback)
                .as_deref()
                .and_then(resolve)
                .ok_or_else(|| Error::unsupported(fallback.as_str()))?;
            log::debug!("language '{code}' is not supported, using '{resolved}'");
            load(resolved, &mut Vec::new())
        }
    }
}

/// Compile (once) and return an embedded language
fn load(code: &'static str, chain: &mut Vec<&'static str>) -> Result<Arc<RuleSet>> {
    let entry = registry()
        .get(code)
        .ok_or_else(|| Error::unsupported(code))?;

    if let Some(rules) = entry.rules.get() {
        return Ok(Arc::clone(rules));
    }

    if chain.contains(&code) {
        chain.push(code);
        return Err(Error::config(
            code,
            format!("inheritance cycle: {}", chain.join(" -> ")),
        ));
    }

    let config: LanguageConfig =
        toml::from_str(entry.source).map_err(|e| Error::config(code, e.to_string()))?;

    chain.push(code);
    let parents = config
        .metadata
        .inherits
        .iter()
        .map(|parent| {
            let resolved = normalize(parent)
                .as_deref()
                .and_then(resolve)
                .ok_or_else(|| Error::unsupported(parent.as_str()))?;
            load(resolved, chain)
        })
        .collect::<Result<Vec<_>>>();
    chain.pop();

    let rules = Arc::new(RuleSet::compile(&config, &parents?)?);
    log::debug!(
        "compiled rule set '{code}' ({} abbreviations)",
        rules.stats().abbreviations
    );

    // A concurrent first use may have won the race; both results are identical.
    Ok(Arc::clone(entry.rules.get_or_init(|| rules)))
}

/// Whether a code resolves to an embedded language
pub fn is_supported(code: &str) -> bool {
    normalize(code).as_deref().and_then(resolve).is_some()
}

/// Embedded languages sorted by code
pub fn supported_languages() -> Vec<LanguageInfo> {
    let mut languages: Vec<LanguageInfo> = EMBEDDED
        .iter()
        .filter_map(|&(code, _)| match load(code, &mut Vec::new()) {
            Ok(rules) => Some(LanguageInfo {
                code,
                name: rules.name().to_string(),
            }),
            Err(e) => {
                log::warn!("embedded language '{code}' failed to load: {e}");
                None
            }
        })
        .collect();
    languages.sort_by_key(|info| info.code);
    languages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_embedded_language_compiles() {
        for &(code, _) in EMBEDDED {
            let rules = load(code, &mut Vec::new())
                .unwrap_or_else(|e| panic!("embedded language '{code}' failed: {e}"));
            assert_eq!(rules.code(), code);
        }
        assert_eq!(supported_languages().len(), EMBEDDED.len());
    }

    #[test]
    fn test_fallback_table_parses() {
        let table: FallbackTable = toml::from_str(FALLBACKS_TOML).unwrap();
        assert!(!table.fallbacks.is_empty());
        for targets in table.fallbacks.values() {
            assert!(!targets.is_empty());
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("en_US").as_deref(), Some("en-us"));
        assert_eq!(normalize(" DE ").as_deref(), Some("de"));
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("e n"), None);
        assert_eq!(normalize("en;rm"), None);
        assert_eq!(normalize(&"x".repeat(40)), None);
    }

    #[test]
    fn test_resolve_direct_and_chained() {
        assert_eq!(resolve("en"), Some("en"));
        assert_eq!(resolve("en-gb"), Some("en"));
        assert_eq!(resolve("de-at"), Some("de"));
        assert_eq!(resolve("cs"), Some("sk"));
        assert_eq!(resolve("bar"), Some("de"));
        assert_eq!(resolve("zh-hant"), Some("zh"));
        assert_eq!(resolve("pt-br"), Some("pt"));
        assert_eq!(resolve("xx"), None);
    }

    #[test]
    fn test_lookup_is_cached() {
        let first = lookup("fr").unwrap();
        let second = lookup("fr").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_strict_policy_rejects_unknown() {
        let err = lookup("tlh").unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage { code } if code == "tlh"));

        let err = lookup("not a code").unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage { code } if code == "not a code"));
    }

    #[test]
    fn test_default_policy_substitutes() {
        let policy = FallbackPolicy::Default("en".to_string());
        let rules = lookup_with("tlh", &policy).unwrap();
        assert_eq!(rules.code(), "en");

        // Known codes are unaffected by the policy
        let rules = lookup_with("ja", &policy).unwrap();
        assert_eq!(rules.code(), "ja");
    }

    #[test]
    fn test_default_policy_with_unknown_default() {
        let policy = FallbackPolicy::Default("zz".to_string());
        let err = lookup_with("tlh", &policy).unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage { code } if code == "zz"));
    }

    #[test]
    fn test_inherited_languages_share_english_abbreviations() {
        let de = lookup("de").unwrap();
        assert!(de.is_abbreviation("Dr"));
        assert!(de.is_abbreviation("bzw"));
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("EN"));
        assert!(is_supported("de_CH"));
        assert!(!is_supported("xx"));
    }
}
