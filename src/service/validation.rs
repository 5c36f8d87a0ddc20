//! Schema validation: required-field checks, field extraction and the owner-field rule.

use crate::schema::{FieldSchema, Record};
use serde_json::Value;

pub struct SchemaValidator;

impl SchemaValidator {
    /// True iff every required field is present with a non-null value. Unknown fields are ignored.
    pub fn validate(record: &Record, schema: &FieldSchema) -> bool {
        schema
            .required_fields()
            .all(|field| is_defined(record.get(field)))
    }

    /// Copy of `record` restricted to the fields the schema declares. Values are kept as-is.
    pub fn extract(record: &Record, schema: &FieldSchema) -> Record {
        record
            .iter()
            .filter(|(k, _)| schema.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// First owner-identifying field whose value differs between the stored and the replacement record.
    pub fn changed_owner_field<'a>(
        existing: &Record,
        updated: &Record,
        owner_fields: &[&'a str],
    ) -> Option<&'a str> {
        owner_fields
            .iter()
            .copied()
            .find(|field| existing.get(*field) != updated.get(*field))
    }
}

fn is_defined(v: Option<&Value>) -> bool {
    !matches!(v, None | Some(Value::Null))
}
