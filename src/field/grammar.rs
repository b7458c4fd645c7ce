//! Value grammars for annotation fields.
//!
//! Every grammar is conservative: a value either matches exactly or the
//! field falls back to its default policy. Nothing is coerced, so a body
//! size like "15r" or a timeout like "50k" can never leak into a directive
//! the engine would reject at its own parse time (which would take down the
//! whole generated configuration file, not just this resource).

use regex::Regex;

/// Conditions accepted by `proxy_next_upstream`.
const NEXT_UPSTREAM_CONDITIONS: &[&str] = &[
    "error",
    "timeout",
    "invalid_header",
    "http_500",
    "http_502",
    "http_503",
    "http_504",
    "http_403",
    "http_404",
    "non_idempotent",
    "off",
];

/// Grammar kind for one field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `\d+[kKmMgG]?` — byte size with optional unit, e.g. "8m".
    Size,
    /// Bare non-negative integer, no unit. Rendered with an `s` appended.
    Seconds,
    /// `on` | `off`.
    Toggle,
    /// Space-separated subset of the next-upstream condition set,
    /// order preserved.
    ConditionSet,
    /// One or more space-separated tokens, passed through verbatim.
    TokenList,
    /// A single token, e.g. a redirect endpoint.
    Token,
}

/// `on`/`off` switch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn as_str(self) -> &'static str {
        match self {
            Toggle::On => "on",
            Toggle::Off => "off",
        }
    }
}

/// One validated value, ready for rendering. The inner strings are the
/// validated input text carried verbatim; a `FieldValue` never holds text
/// that failed its grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Size(String),
    Seconds(String),
    Toggle(Toggle),
    Tokens(String),
}

impl FieldValue {
    /// The rendered text for string-carrying values.
    pub fn text(&self) -> Option<&str> {
        match self {
            FieldValue::Size(s) | FieldValue::Seconds(s) | FieldValue::Tokens(s) => Some(s),
            FieldValue::Toggle(_) => None,
        }
    }

    pub fn toggle(&self) -> Option<Toggle> {
        match self {
            FieldValue::Toggle(t) => Some(*t),
            _ => None,
        }
    }
}

/// Grammar regexes, compiled once when the registry is built.
#[derive(Debug)]
pub struct Grammars {
    size: Regex,
    seconds: Regex,
    token: Regex,
}

impl Grammars {
    /// Compile all patterns. A failure here is a registry contract
    /// violation, never a per-compile condition.
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            size: Regex::new(r"^\d+[kKmMgG]?$")?,
            seconds: Regex::new(r"^\d+$")?,
            // Tokens land verbatim inside a generated config line, so the
            // config metacharacters `;` `{` `}` and control bytes are out.
            token: Regex::new(r"^[^\s;{}[:cntrl:]]+$")?,
        })
    }

    /// Validate one raw value against a grammar. Returns the typed value,
    /// or `None` on mismatch — the caller decides the fallback.
    pub fn validate(&self, grammar: Grammar, raw: &str) -> Option<FieldValue> {
        match grammar {
            Grammar::Size => self
                .size
                .is_match(raw)
                .then(|| FieldValue::Size(raw.to_string())),
            Grammar::Seconds => self
                .seconds
                .is_match(raw)
                .then(|| FieldValue::Seconds(raw.to_string())),
            Grammar::Toggle => match raw {
                "on" => Some(FieldValue::Toggle(Toggle::On)),
                "off" => Some(FieldValue::Toggle(Toggle::Off)),
                _ => None,
            },
            Grammar::ConditionSet => {
                self.token_list(raw, |tok| NEXT_UPSTREAM_CONDITIONS.contains(&tok))
            }
            Grammar::TokenList => self.token_list(raw, |tok| self.token.is_match(tok)),
            Grammar::Token => self
                .token
                .is_match(raw)
                .then(|| FieldValue::Tokens(raw.to_string())),
        }
    }

    /// Validate each whitespace-separated token and re-join with single
    /// spaces: order and duplicates are preserved verbatim, only the
    /// inter-token spacing is normalized so the same logical value cannot
    /// render two different lines.
    fn token_list(&self, raw: &str, accept: impl Fn(&str) -> bool) -> Option<FieldValue> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() || !tokens.iter().all(|tok| accept(tok)) {
            return None;
        }
        Some(FieldValue::Tokens(tokens.join(" ")))
    }
}
