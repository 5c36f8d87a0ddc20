//! Field schemas: the recognized fields of each resource kind and which of them are mandatory.

mod kinds;
pub use kinds::*;

use serde_json::{Map, Value};

/// One resource instance as an untyped field -> value mapping.
pub type Record = Map<String, Value>;

/// Per-field rule. Only presence is checked; types and ranges are left to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub required: bool,
}

impl FieldRule {
    pub const REQUIRED: FieldRule = FieldRule { required: true };
    pub const OPTIONAL: FieldRule = FieldRule { required: false };
}

/// Immutable field declaration for one resource kind. Declared once as a static constant.
#[derive(Clone, Copy, Debug)]
pub struct FieldSchema {
    fields: &'static [(&'static str, FieldRule)],
}

impl FieldSchema {
    pub const fn new(fields: &'static [(&'static str, FieldRule)]) -> Self {
        FieldSchema { fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, FieldRule)> + '_ {
        self.fields.iter().copied()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|(_, rule)| rule.required)
            .map(|(name, _)| *name)
    }

    pub fn rule(&self, field: &str) -> Option<FieldRule> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| *rule)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.rule(field).is_some()
    }
}
