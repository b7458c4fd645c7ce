//! Cross-field rules, evaluated after every field has validated on its own.
//!
//! Keeping these rules out of the per-field grammars keeps each grammar
//! independently testable. Rules are additive only: a field becoming valid
//! can enable more output, never suppress another field's directive.

use crate::compile::ValidatedFields;
use crate::field::grammar::Toggle;
use crate::field::spec::{self, DefaultPolicy, Registry};
use tracing::warn;

/// The resolved `proxy_redirect` concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Redirect {
    Off,
    Default,
    Rewrite { from: String, to: String },
}

/// One value per logical concern, ready for ordered rendering.
/// `None` means the concern is silently omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub body_size: Option<String>,
    pub connect_timeout: Option<String>,
    pub send_timeout: Option<String>,
    pub read_timeout: Option<String>,
    pub buffering: Option<Toggle>,
    pub buffer_size: Option<String>,
    pub request_buffering: Option<Toggle>,
    pub redirect: Option<Redirect>,
    pub next_upstream: Option<String>,
    pub next_upstream_tries: Option<String>,
    pub cookie_domain: Option<String>,
    pub cookie_path: Option<String>,
}

pub(crate) fn resolve(registry: &Registry, fields: &ValidatedFields) -> Resolved {
    let owned = |name: &str| fields.text(name).map(str::to_string);

    Resolved {
        body_size: owned(spec::BODY_SIZE),
        connect_timeout: owned(spec::CONNECT_TIMEOUT),
        send_timeout: owned(spec::SEND_TIMEOUT),
        read_timeout: owned(spec::READ_TIMEOUT),
        // The two buffering toggles are always present: absent or malformed
        // input resolves to the table default rather than omission.
        buffering: fields
            .toggle(spec::BUFFERING)
            .or_else(|| default_toggle(registry, spec::BUFFERING)),
        // The size pair is gated only on the size value itself validating;
        // the buffering toggle is an independent input.
        buffer_size: owned(spec::BUFFER_SIZE),
        request_buffering: fields
            .toggle(spec::REQUEST_BUFFERING)
            .or_else(|| default_toggle(registry, spec::REQUEST_BUFFERING)),
        redirect: resolve_redirect(fields),
        // Conditions and tries are independent; either may appear alone.
        next_upstream: owned(spec::NEXT_UPSTREAM),
        next_upstream_tries: owned(spec::NEXT_UPSTREAM_TRIES),
        cookie_domain: owned(spec::COOKIE_DOMAIN),
        cookie_path: owned(spec::COOKIE_PATH),
    }
}

fn default_toggle(registry: &Registry, name: &str) -> Option<Toggle> {
    registry
        .specs()
        .iter()
        .find(|s| s.name == name)
        .and_then(|s| match s.default {
            DefaultPolicy::EmitToggle(t) => Some(t),
            DefaultPolicy::Omit => None,
        })
}

/// Redirect pairing:
/// - `from = off` / `from = default` emit the one-token form, `to` ignored
/// - a custom `from` needs a valid `to`; without one the whole directive
///   is omitted (same silent fallback as a grammar mismatch)
fn resolve_redirect(fields: &ValidatedFields) -> Option<Redirect> {
    let from = fields.text(spec::REDIRECT_FROM)?;
    match from {
        "off" => Some(Redirect::Off),
        "default" => Some(Redirect::Default),
        custom => match fields.text(spec::REDIRECT_TO) {
            Some(to) => Some(Redirect::Rewrite {
                from: custom.to_string(),
                to: to.to_string(),
            }),
            None => {
                warn!(
                    from = custom,
                    "proxy-redirect-from names a custom source but proxy-redirect-to is absent or invalid, omitting proxy_redirect"
                );
                None
            }
        },
    }
}
