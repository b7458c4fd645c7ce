//! Compiler facade: validate each field, reconcile cross-field rules,
//! render in fixed order.

pub mod assemble;
pub mod resolve;

use crate::directive::DirectiveSet;
use crate::field::grammar::{FieldValue, Toggle};
use crate::field::spec::Registry;
use crate::AnnotationMap;
use anyhow::Context;
use std::collections::BTreeMap;
use tracing::warn;

/// Single entry point for turning an annotation map into directives.
#[derive(Debug)]
pub struct Compiler {
    registry: Registry,
}

impl Compiler {
    /// Build a compiler over the standard field registry. Fails only on a
    /// registry contract violation, never on user input.
    pub fn new() -> crate::Result<Self> {
        let registry = Registry::standard().context("field registry failed its contract checks")?;
        Ok(Self { registry })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Compile one resource's annotations into an ordered directive set.
    ///
    /// Never fails: a malformed value falls back per field (usually to
    /// omission) and the rest of the map still applies. Identical map
    /// content yields byte-identical output regardless of how the caller
    /// built the map.
    pub fn compile(&self, annotations: &AnnotationMap) -> DirectiveSet {
        let fields = validate_fields(&self.registry, annotations);
        let resolved = resolve::resolve(&self.registry, &fields);
        assemble::assemble(&resolved)
    }
}

/// Per-compile scratch: field name -> validated value. Fields that were
/// absent or failed their grammar are simply missing; a value present here
/// has already passed validation.
pub(crate) struct ValidatedFields(BTreeMap<&'static str, FieldValue>);

impl ValidatedFields {
    pub(crate) fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(FieldValue::text)
    }

    pub(crate) fn toggle(&self, name: &str) -> Option<Toggle> {
        self.0.get(name).and_then(FieldValue::toggle)
    }
}

fn validate_fields(registry: &Registry, annotations: &AnnotationMap) -> ValidatedFields {
    let mut out = BTreeMap::new();
    for spec in registry.specs() {
        let key = Registry::annotation_key(spec.name);
        let Some(raw) = annotations.get(&key) else {
            continue;
        };
        match registry.grammars().validate(spec.grammar, raw) {
            Some(value) => {
                out.insert(spec.name, value);
            }
            None => {
                warn!(field = spec.name, value = %raw, "annotation failed its grammar, falling back");
            }
        }
    }
    ValidatedFields(out)
}
