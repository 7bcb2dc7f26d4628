//! Language-specific rules for sentence boundary detection
//!
//! Language variation is data: each language is a TOML rule set compiled
//! into an immutable [`RuleSet`] and served from a process-wide registry.

pub mod config;
pub mod registry;
pub mod rules;
pub mod tables;

pub use config::{LanguageConfig, TerminatorClass};
pub use registry::{
    is_supported, lookup, lookup_with, supported_languages, FallbackPolicy, LanguageInfo,
};
pub use rules::{RuleSet, RuleSetStats};
