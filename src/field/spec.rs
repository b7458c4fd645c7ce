//! Static field table and the registry built from it.
//!
//! The original validation logic was a map keyed by dynamic string lookup;
//! here it is a declarative table of descriptors checked once at startup.
//! We keep two representations:
//! - FIELDS: the raw table (one entry per recognized annotation)
//! - Registry: the checked table plus compiled grammar regexes

use crate::field::grammar::{Grammar, Grammars, Toggle};
use std::collections::BTreeSet;
use thiserror::Error;

/// Namespace prefix carried by every recognized annotation key.
pub const ANNOTATION_PREFIX: &str = "nginx.ingress.kubernetes.io/";

// Field names. The resolver looks validated values up by these, so they are
// shared constants rather than string literals scattered across modules.
pub const BODY_SIZE: &str = "proxy-body-size";
pub const CONNECT_TIMEOUT: &str = "proxy-connect-timeout";
pub const SEND_TIMEOUT: &str = "proxy-send-timeout";
pub const READ_TIMEOUT: &str = "proxy-read-timeout";
pub const BUFFERING: &str = "proxy-buffering";
pub const BUFFER_SIZE: &str = "proxy-buffer-size";
pub const REQUEST_BUFFERING: &str = "proxy-request-buffering";
pub const REDIRECT_FROM: &str = "proxy-redirect-from";
pub const REDIRECT_TO: &str = "proxy-redirect-to";
pub const NEXT_UPSTREAM: &str = "proxy-next-upstream";
pub const NEXT_UPSTREAM_TRIES: &str = "proxy-next-upstream-tries";
pub const COOKIE_DOMAIN: &str = "proxy-cookie-domain";
pub const COOKIE_PATH: &str = "proxy-cookie-path";

/// Fallback applied when a field is absent or fails its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// Emit nothing; the engine's built-in default applies.
    Omit,
    /// Emit the directive with this toggle value.
    EmitToggle(Toggle),
}

/// Immutable descriptor for one recognized annotation.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Short name, appended to [`ANNOTATION_PREFIX`] for map lookup.
    pub name: &'static str,
    pub grammar: Grammar,
    pub default: DefaultPolicy,
}

const fn field(name: &'static str, grammar: Grammar) -> FieldSpec {
    FieldSpec {
        name,
        grammar,
        default: DefaultPolicy::Omit,
    }
}

/// The recognized fields, in directive emission order.
const FIELDS: &[FieldSpec] = &[
    field(BODY_SIZE, Grammar::Size),
    field(CONNECT_TIMEOUT, Grammar::Seconds),
    field(SEND_TIMEOUT, Grammar::Seconds),
    field(READ_TIMEOUT, Grammar::Seconds),
    FieldSpec {
        name: BUFFERING,
        grammar: Grammar::Toggle,
        default: DefaultPolicy::EmitToggle(Toggle::Off),
    },
    field(BUFFER_SIZE, Grammar::Size),
    FieldSpec {
        name: REQUEST_BUFFERING,
        grammar: Grammar::Toggle,
        default: DefaultPolicy::EmitToggle(Toggle::On),
    },
    field(REDIRECT_FROM, Grammar::Token),
    field(REDIRECT_TO, Grammar::Token),
    field(NEXT_UPSTREAM, Grammar::ConditionSet),
    field(NEXT_UPSTREAM_TRIES, Grammar::Seconds),
    field(COOKIE_DOMAIN, Grammar::TokenList),
    field(COOKIE_PATH, Grammar::TokenList),
];

/// Registry contract violations. These are programming errors caught at
/// construction time, never conditions raised by user input.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate field name in registry: {0}")]
    DuplicateName(&'static str),
    #[error("grammar pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

/// The checked field table plus compiled grammars.
///
/// Built once at process start; read-only afterwards, so it can be shared
/// across worker threads without locking.
#[derive(Debug)]
pub struct Registry {
    specs: &'static [FieldSpec],
    grammars: Grammars,
}

impl Registry {
    /// Build the standard registry, enforcing the table contract
    /// (unique field names, compilable grammar patterns).
    pub fn standard() -> Result<Self, RegistryError> {
        Self::from_table(FIELDS)
    }

    fn from_table(specs: &'static [FieldSpec]) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        for spec in specs {
            if !seen.insert(spec.name) {
                return Err(RegistryError::DuplicateName(spec.name));
            }
        }
        Ok(Self {
            specs,
            grammars: Grammars::compile()?,
        })
    }

    /// Field descriptors in emission order.
    pub fn specs(&self) -> &[FieldSpec] {
        self.specs
    }

    pub fn grammars(&self) -> &Grammars {
        &self.grammars
    }

    /// The full annotation key for a field name.
    pub fn annotation_key(name: &str) -> String {
        format!("{ANNOTATION_PREFIX}{name}")
    }
}
