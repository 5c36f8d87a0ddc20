//! Convert serde_json::Value to types that sqlx can bind, according to the target column type.

use crate::sql::ColumnType;
use crate::store::StoreError;
use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A value that can be bound to a PostgreSQL query. Null keeps the column type so the parameter stays typed.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Null(ColumnType),
    I64(i64),
    F64(f64),
    String(String),
}

impl PgBindValue {
    /// Convert a record value for a column. Values are taken as submitted: integers for bigint,
    /// numbers for double, strings for text. Anything else is rejected.
    pub fn for_column(column: &str, ty: ColumnType, v: &Value) -> Result<Self, StoreError> {
        let invalid = |reason: &str| StoreError::InvalidValue {
            column: column.to_string(),
            reason: reason.to_string(),
        };
        Ok(match (ty, v) {
            (_, Value::Null) => PgBindValue::Null(ty),
            (ColumnType::BigInt, Value::Number(n)) => {
                PgBindValue::I64(n.as_i64().ok_or_else(|| invalid("expected an integer"))?)
            }
            (ColumnType::Double, Value::Number(n)) => {
                PgBindValue::F64(n.as_f64().ok_or_else(|| invalid("expected a number"))?)
            }
            (ColumnType::Text, Value::String(s)) => PgBindValue::String(s.clone()),
            (ColumnType::BigInt, _) => return Err(invalid("expected an integer")),
            (ColumnType::Double, _) => return Err(invalid("expected a number")),
            (ColumnType::Text, _) => return Err(invalid("expected a string")),
        })
    }

    /// The JSON a column of this type reads back as (`4` stored in a double comes back as `4.0`).
    pub fn into_value(self) -> Value {
        match self {
            PgBindValue::Null(_) => Value::Null,
            PgBindValue::I64(n) => Value::from(n),
            PgBindValue::F64(n) => serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null),
            PgBindValue::String(s) => Value::String(s),
        }
    }

    fn column_type(&self) -> ColumnType {
        match self {
            PgBindValue::Null(ty) => *ty,
            PgBindValue::I64(_) => ColumnType::BigInt,
            PgBindValue::F64(_) => ColumnType::Double,
            PgBindValue::String(_) => ColumnType::Text,
        }
    }
}

fn type_info(ty: ColumnType) -> PgTypeInfo {
    match ty {
        ColumnType::BigInt => <i64 as sqlx::Type<Postgres>>::type_info(),
        ColumnType::Double => <f64 as sqlx::Type<Postgres>>::type_info(),
        ColumnType::Text => <String as sqlx::Type<Postgres>>::type_info(),
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            PgBindValue::Null(_) => IsNull::Yes,
            PgBindValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::F64(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::String(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(type_info(self.column_type()))
    }
}

impl sqlx::Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}
