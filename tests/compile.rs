//! End-to-end properties over the public API: one compile per scenario,
//! asserting on the rendered directive lines the way the downstream
//! renderer's consumers grep the generated server block.

use pretty_assertions::assert_eq;
use proxy_annotations::{AnnotationMap, Compiler, DirectiveSet};

fn compile(pairs: &[(&str, &str)]) -> DirectiveSet {
    let compiler = Compiler::new().unwrap();
    let map: AnnotationMap = pairs
        .iter()
        .map(|(k, v)| {
            (
                format!("nginx.ingress.kubernetes.io/{}", k),
                v.to_string(),
            )
        })
        .collect();
    compiler.compile(&map)
}

#[test]
fn sets_proxy_redirect_to_off() {
    let out = compile(&[
        ("proxy-redirect-from", "off"),
        ("proxy-redirect-to", "goodbye.com"),
    ]);
    assert!(out.contains("proxy_redirect off;"));
    assert!(!out.contains("goodbye.com"));
}

#[test]
fn sets_proxy_redirect_to_default() {
    let out = compile(&[
        ("proxy-redirect-from", "default"),
        ("proxy-redirect-to", "goodbye.com"),
    ]);
    assert!(out.contains("proxy_redirect default;"));
    assert!(!out.contains("goodbye.com"));
}

#[test]
fn sets_proxy_redirect_pair() {
    let out = compile(&[
        ("proxy-redirect-from", "hello.com"),
        ("proxy-redirect-to", "goodbye.com"),
    ]);
    assert!(out.contains("proxy_redirect hello.com goodbye.com;"));
}

#[test]
fn redirect_from_without_to_emits_nothing() {
    let out = compile(&[("proxy-redirect-from", "hello.com")]);
    assert!(!out.contains("proxy_redirect"));
}

#[test]
fn sets_client_max_body_size() {
    let out = compile(&[("proxy-body-size", "8m")]);
    let lines: Vec<_> = out
        .lines()
        .iter()
        .filter(|l| l.starts_with("client_max_body_size"))
        .collect();
    assert_eq!(lines, vec!["client_max_body_size 8m;"]);
}

#[test]
fn drops_invalid_body_size() {
    let out = compile(&[("proxy-body-size", "15r")]);
    assert!(!out.contains("client_max_body_size"));
    assert!(!out.contains("15r"));
}

#[test]
fn sets_valid_proxy_timeouts_with_single_unit() {
    let out = compile(&[
        ("proxy-connect-timeout", "50"),
        ("proxy-send-timeout", "20"),
        ("proxy-read-timeout", "20"),
    ]);
    assert!(out.contains("proxy_connect_timeout 50s;"));
    assert!(out.contains("proxy_send_timeout 20s;"));
    assert!(out.contains("proxy_read_timeout 20s;"));
    assert!(!out.contains("50ss"));
}

#[test]
fn drops_invalid_proxy_timeouts_entirely() {
    let out = compile(&[
        ("proxy-connect-timeout", "50k"),
        ("proxy-send-timeout", "20k"),
        ("proxy-read-timeout", "20k"),
    ]);
    // No mangled unit, and no substitute numeric default either.
    assert!(!out.contains("proxy_connect_timeout"));
    assert!(!out.contains("proxy_send_timeout"));
    assert!(!out.contains("proxy_read_timeout"));
    assert!(!out.contains("50ks;"));
    assert!(!out.contains("60s;"));
}

#[test]
fn buffering_on_with_size_emits_all_four_lines() {
    let out = compile(&[("proxy-buffering", "on"), ("proxy-buffer-size", "8k")]);
    assert!(out.contains("proxy_buffering on;"));
    assert!(out.contains("proxy_buffer_size 8k;"));
    assert!(out.contains("proxy_buffers 4 8k;"));
    assert!(out.contains("proxy_request_buffering on;"));
}

#[test]
fn buffer_size_emits_even_with_buffering_off() {
    let out = compile(&[("proxy-buffer-size", "8k")]);
    assert!(out.contains("proxy_buffering off;"));
    assert!(out.contains("proxy_buffer_size 8k;"));
    assert!(out.contains("proxy_buffers 4 8k;"));
}

#[test]
fn invalid_buffer_size_drops_the_pair_but_not_the_toggle() {
    let out = compile(&[("proxy-buffering", "on"), ("proxy-buffer-size", "8kb")]);
    assert!(out.contains("proxy_buffering on;"));
    assert!(!out.contains("proxy_buffer_size"));
    assert!(!out.contains("proxy_buffers"));
}

#[test]
fn turns_off_request_buffering() {
    let out = compile(&[("proxy-request-buffering", "off")]);
    assert!(out.contains("proxy_request_buffering off;"));
}

#[test]
fn builds_proxy_next_upstream() {
    let out = compile(&[
        ("proxy-next-upstream", "error timeout http_502"),
        ("proxy-next-upstream-tries", "5"),
    ]);
    assert!(out.contains("proxy_next_upstream error timeout http_502;"));
    assert!(out.contains("proxy_next_upstream_tries 5;"));
}

#[test]
fn next_upstream_tries_stand_alone() {
    let out = compile(&[("proxy-next-upstream-tries", "5")]);
    assert!(out.contains("proxy_next_upstream_tries 5;"));
    assert!(!out.contains("proxy_next_upstream "));
}

#[test]
fn unknown_next_upstream_condition_drops_the_directive() {
    let out = compile(&[("proxy-next-upstream", "error http_42")]);
    assert!(!out.contains("proxy_next_upstream"));
}

#[test]
fn sets_proxy_cookies_verbatim() {
    let out = compile(&[
        ("proxy-cookie-domain", "localhost example.org"),
        ("proxy-cookie-path", "/one/ /"),
    ]);
    assert!(out.contains("proxy_cookie_domain localhost example.org;"));
    assert!(out.contains("proxy_cookie_path /one/ /;"));
}

#[test]
fn empty_map_compiles_to_default_toggles() {
    let out = compile(&[]);
    assert_eq!(
        out.into_lines(),
        vec![
            "proxy_buffering off;".to_string(),
            "proxy_request_buffering on;".to_string(),
        ]
    );
}

#[test]
fn malformed_fields_do_not_block_the_rest() {
    let out = compile(&[
        ("proxy-body-size", "15r"),
        ("proxy-connect-timeout", "50"),
        ("proxy-cookie-path", "/one/ /"),
    ]);
    assert!(!out.contains("client_max_body_size"));
    assert!(out.contains("proxy_connect_timeout 50s;"));
    assert!(out.contains("proxy_cookie_path /one/ /;"));
}

#[test]
fn unrecognized_keys_are_ignored() {
    let compiler = Compiler::new().unwrap();
    let mut map = AnnotationMap::new();
    map.insert(
        "nginx.ingress.kubernetes.io/no-such-field".to_string(),
        "8m".to_string(),
    );
    map.insert("proxy-body-size".to_string(), "8m".to_string());
    let out = compiler.compile(&map);
    assert!(!out.contains("8m"));
}

#[test]
fn compile_is_deterministic_and_idempotent() {
    let compiler = Compiler::new().unwrap();

    // Same content built in two different insertion orders.
    let forward: AnnotationMap = serde_json::from_str(
        r#"{
            "nginx.ingress.kubernetes.io/proxy-body-size": "8m",
            "nginx.ingress.kubernetes.io/proxy-buffering": "on",
            "nginx.ingress.kubernetes.io/proxy-buffer-size": "8k",
            "nginx.ingress.kubernetes.io/proxy-cookie-domain": "localhost example.org",
            "nginx.ingress.kubernetes.io/proxy-next-upstream": "error timeout",
            "nginx.ingress.kubernetes.io/proxy-read-timeout": "20"
        }"#,
    )
    .unwrap();
    let mut backward = AnnotationMap::new();
    for (k, v) in forward.iter().rev() {
        backward.insert(k.clone(), v.clone());
    }

    let a = compiler.compile(&forward);
    let b = compiler.compile(&backward);
    let c = compiler.compile(&forward);
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(a.to_string(), c.to_string());
}

#[test]
fn full_map_renders_in_fixed_order() {
    let out = compile(&[
        ("proxy-cookie-path", "/one/ /"),
        ("proxy-cookie-domain", "localhost"),
        ("proxy-next-upstream-tries", "5"),
        ("proxy-next-upstream", "error timeout http_502"),
        ("proxy-redirect-from", "hello.com"),
        ("proxy-redirect-to", "goodbye.com"),
        ("proxy-request-buffering", "off"),
        ("proxy-buffer-size", "8k"),
        ("proxy-buffering", "on"),
        ("proxy-read-timeout", "20"),
        ("proxy-send-timeout", "20"),
        ("proxy-connect-timeout", "50"),
        ("proxy-body-size", "8m"),
    ]);
    assert_eq!(
        out.into_lines(),
        vec![
            "client_max_body_size 8m;".to_string(),
            "proxy_connect_timeout 50s;".to_string(),
            "proxy_send_timeout 20s;".to_string(),
            "proxy_read_timeout 20s;".to_string(),
            "proxy_buffering on;".to_string(),
            "proxy_buffer_size 8k;".to_string(),
            "proxy_buffers 4 8k;".to_string(),
            "proxy_request_buffering off;".to_string(),
            "proxy_redirect hello.com goodbye.com;".to_string(),
            "proxy_next_upstream error timeout http_502;".to_string(),
            "proxy_next_upstream_tries 5;".to_string(),
            "proxy_cookie_domain localhost;".to_string(),
            "proxy_cookie_path /one/ /;".to_string(),
        ]
    );
}
