//! Column types of each resource table. Field names match the resource schemas.

use crate::schema::ResourceKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    BigInt,
    Double,
    Text,
}

impl ColumnType {
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnType::BigInt => "bigint",
            ColumnType::Double => "double precision",
            ColumnType::Text => "text",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

const fn col(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty }
}

const BUSINESS_COLUMNS: &[Column] = &[
    col("ownerid", ColumnType::BigInt),
    col("name", ColumnType::Text),
    col("address", ColumnType::Text),
    col("city", ColumnType::Text),
    col("state", ColumnType::Text),
    col("zip", ColumnType::Text),
    col("phone", ColumnType::Text),
    col("category", ColumnType::Text),
    col("subcategory", ColumnType::Text),
    col("website", ColumnType::Text),
    col("email", ColumnType::Text),
];

const REVIEW_COLUMNS: &[Column] = &[
    col("userid", ColumnType::BigInt),
    col("businessid", ColumnType::BigInt),
    col("dollars", ColumnType::BigInt),
    col("stars", ColumnType::Double),
    col("review", ColumnType::Text),
];

const PHOTO_COLUMNS: &[Column] = &[
    col("userid", ColumnType::BigInt),
    col("businessid", ColumnType::BigInt),
    col("caption", ColumnType::Text),
];

/// Data columns of a kind's table, excluding the `id` primary key.
pub fn columns(kind: ResourceKind) -> &'static [Column] {
    match kind {
        ResourceKind::Business => BUSINESS_COLUMNS,
        ResourceKind::Review => REVIEW_COLUMNS,
        ResourceKind::Photo => PHOTO_COLUMNS,
    }
}

pub fn column(kind: ResourceKind, name: &str) -> Option<&'static Column> {
    columns(kind).iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_field_has_a_column() {
        for kind in ResourceKind::ALL {
            let schema_fields: Vec<_> = kind.schema().field_names().collect();
            let column_names: Vec<_> = columns(kind).iter().map(|c| c.name).collect();
            assert_eq!(schema_fields, column_names, "{kind}");
        }
    }
}
