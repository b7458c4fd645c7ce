//! Compile proxy annotations from a routing resource into nginx directives.
//!
//! The input is an untrusted map of string key/value pairs attached to an
//! Ingress-style resource. Each recognized key is validated against its own
//! grammar; a malformed value falls back silently (usually by omitting the
//! directive) so one bad annotation never blocks the rest of the resource.
//!
//! The output is an ordered list of literal directive lines for the caller
//! to embed into a generated server block. Writing the config file and
//! reloading the proxy belong to the surrounding controller, not this crate.
//!
//! ```
//! use proxy_annotations::{AnnotationMap, Compiler};
//!
//! let compiler = Compiler::new()?;
//! let mut annotations = AnnotationMap::new();
//! annotations.insert(
//!     "nginx.ingress.kubernetes.io/proxy-body-size".into(),
//!     "8m".into(),
//! );
//! let directives = compiler.compile(&annotations);
//! assert!(directives.lines().contains(&"client_max_body_size 8m;".to_string()));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod compile;
pub mod directive;
pub mod field;

pub use compile::Compiler;
pub use directive::DirectiveSet;
pub use field::{ANNOTATION_PREFIX, Registry};

use std::collections::BTreeMap;

/// Raw annotations as supplied by the resource watcher. Keys carry the full
/// [`ANNOTATION_PREFIX`]; keys outside the prefix or with unrecognized names
/// are ignored. The compiler only reads the map, never mutates it.
pub type AnnotationMap = BTreeMap<String, String>;

pub type Result<T> = anyhow::Result<T>;
