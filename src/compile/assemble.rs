//! Render resolved concerns into the final directive set.
//!
//! Concerns are rendered in a fixed, registry-defined order, never in
//! input-map order: identical annotation content must produce byte-identical
//! output no matter how the caller's map iterates. Absent concerns are
//! skipped silently, with no placeholder or comment.

use crate::compile::resolve::{Redirect, Resolved};
use crate::directive::DirectiveSet;

pub(crate) fn assemble(r: &Resolved) -> DirectiveSet {
    let mut out = DirectiveSet::new();

    if let Some(v) = &r.body_size {
        out.push(format!("client_max_body_size {};", v));
    }

    // Timeouts validated as bare integers; the engine unit is appended here,
    // exactly once.
    if let Some(v) = &r.connect_timeout {
        out.push(format!("proxy_connect_timeout {}s;", v));
    }
    if let Some(v) = &r.send_timeout {
        out.push(format!("proxy_send_timeout {}s;", v));
    }
    if let Some(v) = &r.read_timeout {
        out.push(format!("proxy_read_timeout {}s;", v));
    }

    if let Some(t) = r.buffering {
        out.push(format!("proxy_buffering {};", t.as_str()));
    }
    // The size pair is atomic: both lines or neither.
    if let Some(v) = &r.buffer_size {
        out.push(format!("proxy_buffer_size {};", v));
        out.push(format!("proxy_buffers 4 {};", v));
    }
    if let Some(t) = r.request_buffering {
        out.push(format!("proxy_request_buffering {};", t.as_str()));
    }

    match &r.redirect {
        Some(Redirect::Off) => out.push("proxy_redirect off;".to_string()),
        Some(Redirect::Default) => out.push("proxy_redirect default;".to_string()),
        Some(Redirect::Rewrite { from, to }) => {
            out.push(format!("proxy_redirect {} {};", from, to));
        }
        None => {}
    }

    if let Some(v) = &r.next_upstream {
        out.push(format!("proxy_next_upstream {};", v));
    }
    if let Some(v) = &r.next_upstream_tries {
        out.push(format!("proxy_next_upstream_tries {};", v));
    }

    if let Some(v) = &r.cookie_domain {
        out.push(format!("proxy_cookie_domain {};", v));
    }
    if let Some(v) = &r.cookie_path {
        out.push(format!("proxy_cookie_path {};", v));
    }

    out
}
