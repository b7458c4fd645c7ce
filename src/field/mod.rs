//! Field layer: value grammars + the static field registry.
//!
//! This module is intentionally separate from compilation and rendering.
//! It owns:
//! - Grammar kinds and per-value validation (one grammar per field, pure)
//! - FieldSpec table and the Registry built from it at startup

pub mod grammar;
pub mod spec;

pub use grammar::{FieldValue, Grammar, Grammars, Toggle};
pub use spec::{ANNOTATION_PREFIX, DefaultPolicy, FieldSpec, Registry, RegistryError};
