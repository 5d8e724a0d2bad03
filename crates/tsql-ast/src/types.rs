//! Data type references

use crate::expr::ScalarExpression;
use crate::names::SchemaObjectName;
use serde::Serialize;

node_enum! {
    pub enum DataTypeReference {
        SqlDataTypeReference,
        UserDataTypeReference,
        XmlDataTypeReference,
    }
}

impl DataTypeReference {
    pub fn name(&self) -> &SchemaObjectName {
        match self {
            DataTypeReference::SqlDataTypeReference(t) => &t.name,
            DataTypeReference::UserDataTypeReference(t) => &t.name,
            DataTypeReference::XmlDataTypeReference(t) => &t.name,
        }
    }
}

/// Built-in types recognized by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SqlDataTypeOption {
    BigInt,
    Int,
    SmallInt,
    TinyInt,
    Bit,
    Decimal,
    Numeric,
    Money,
    SmallMoney,
    Float,
    Real,
    DateTime,
    SmallDateTime,
    Date,
    Time,
    DateTime2,
    DateTimeOffset,
    Char,
    VarChar,
    Text,
    NChar,
    NVarChar,
    NText,
    Binary,
    VarBinary,
    Image,
    Cursor,
    SqlVariant,
    Table,
    Timestamp,
    Rowversion,
    UniqueIdentifier,
}

impl SqlDataTypeOption {
    /// Look up an unqualified built-in type name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let option = match name.to_ascii_uppercase().as_str() {
            "BIGINT" => Self::BigInt,
            "INT" | "INTEGER" => Self::Int,
            "SMALLINT" => Self::SmallInt,
            "TINYINT" => Self::TinyInt,
            "BIT" => Self::Bit,
            "DECIMAL" | "DEC" => Self::Decimal,
            "NUMERIC" => Self::Numeric,
            "MONEY" => Self::Money,
            "SMALLMONEY" => Self::SmallMoney,
            "FLOAT" => Self::Float,
            "REAL" => Self::Real,
            "DATETIME" => Self::DateTime,
            "SMALLDATETIME" => Self::SmallDateTime,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "DATETIME2" => Self::DateTime2,
            "DATETIMEOFFSET" => Self::DateTimeOffset,
            "CHAR" | "CHARACTER" => Self::Char,
            "VARCHAR" => Self::VarChar,
            "TEXT" => Self::Text,
            "NCHAR" => Self::NChar,
            "NVARCHAR" => Self::NVarChar,
            "NTEXT" => Self::NText,
            "BINARY" => Self::Binary,
            "VARBINARY" => Self::VarBinary,
            "IMAGE" => Self::Image,
            "CURSOR" => Self::Cursor,
            "SQL_VARIANT" => Self::SqlVariant,
            "TABLE" => Self::Table,
            "TIMESTAMP" => Self::Timestamp,
            "ROWVERSION" => Self::Rowversion,
            "UNIQUEIDENTIFIER" => Self::UniqueIdentifier,
            _ => return None,
        };
        Some(option)
    }
}

/// A built-in type with optional `(length)` / `(precision, scale)` / `(MAX)`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct SqlDataTypeReference {
    pub sql_data_type_option: SqlDataTypeOption,
    pub name: SchemaObjectName,
    pub parameters: Vec<ScalarExpression>,
}

/// Any type name that is not built in (alias types, CLR types, `sysname`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct UserDataTypeReference {
    pub name: SchemaObjectName,
    pub parameters: Vec<ScalarExpression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum XmlDataTypeOption {
    None,
    Content,
    Document,
}

/// `XML [(CONTENT|DOCUMENT schema_collection)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "$type", rename_all = "PascalCase")]
pub struct XmlDataTypeReference {
    pub xml_data_type_option: XmlDataTypeOption,
    pub xml_schema_collection: Option<SchemaObjectName>,
    pub name: SchemaObjectName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        assert_eq!(SqlDataTypeOption::from_name("nvarchar"), Some(SqlDataTypeOption::NVarChar));
        assert_eq!(SqlDataTypeOption::from_name("Integer"), Some(SqlDataTypeOption::Int));
        assert_eq!(SqlDataTypeOption::from_name("sysname"), None);
    }
}
