//! Table metadata read from the database
//!
//! A [`TableDescriptor`] is read once per generation run from a
//! [`MetadataSource`] and is immutable afterwards.

use crate::error::CrudResult;
use std::fmt;

/// Declared SQL type of a column, normalized across backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    /// `INTEGER`, `INT`, `SMALLINT`, ...
    Integer,
    /// `BIGINT`
    BigInt,
    /// `DECIMAL`, `NUMERIC`
    Decimal,
    /// `FLOAT`, `REAL`, `DOUBLE`
    Float,
    /// `VARCHAR`, `CHAR`, `CHARACTER VARYING`
    String,
    /// `TEXT` and its sized variants
    Text,
    /// `BOOLEAN`, `BOOL`, `TINYINT(1)`
    Boolean,
    /// `DATE`
    Date,
    /// `DATETIME`, `TIMESTAMP WITHOUT TIME ZONE`
    DateTime,
    /// `TIME`
    Time,
    /// `TIMESTAMP`, `TIMESTAMPTZ`
    Timestamp,
    /// `JSON`, `JSONB`
    Json,
    /// `UUID`
    Uuid,
    /// `ENUM('a', 'b')` with its variants
    Enum(Vec<String>),
    /// `BLOB`, `BYTEA`, `BINARY`
    Binary,
    /// Anything else, kept verbatim
    Other(String),
}

impl SqlType {
    /// Parse a declared column type as reported by the database
    ///
    /// ```
    /// use crudgen::schema::SqlType;
    ///
    /// assert_eq!(SqlType::parse("VARCHAR(255)"), SqlType::String);
    /// assert_eq!(SqlType::parse("tinyint(1)"), SqlType::Boolean);
    /// assert_eq!(
    ///     SqlType::parse("enum('draft','published')"),
    ///     SqlType::Enum(vec!["draft".to_string(), "published".to_string()])
    /// );
    /// ```
    #[must_use]
    pub fn parse(declared: &str) -> Self {
        let lower = declared.trim().to_lowercase();

        if lower.starts_with("enum(") {
            return Self::Enum(parse_enum_variants(declared));
        }
        if lower == "tinyint(1)" {
            return Self::Boolean;
        }

        // Strip size/precision and modifiers: "decimal(10,2) unsigned" -> "decimal"
        let base = lower
            .split(['(', ' '])
            .next()
            .unwrap_or_default();

        match base {
            "int" | "integer" | "smallint" | "tinyint" | "mediumint" | "int2" | "int4"
            | "serial" | "smallserial" => Self::Integer,
            "bigint" | "int8" | "bigserial" => Self::BigInt,
            "decimal" | "numeric" | "money" => Self::Decimal,
            "float" | "float4" | "float8" | "real" | "double" => Self::Float,
            "varchar" | "char" | "character" | "nvarchar" | "nchar" | "citext" => Self::String,
            "text" | "tinytext" | "mediumtext" | "longtext" | "clob" => Self::Text,
            "bool" | "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "time" => Self::Time,
            "timestamp" | "timestamptz" => {
                if lower.contains("without time zone") {
                    Self::DateTime
                } else {
                    Self::Timestamp
                }
            }
            "json" | "jsonb" => Self::Json,
            "uuid" => Self::Uuid,
            "blob" | "bytea" | "binary" | "varbinary" | "longblob" => Self::Binary,
            _ => Self::Other(declared.trim().to_string()),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::BigInt => write!(f, "bigint"),
            Self::Decimal => write!(f, "decimal"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Text => write!(f, "text"),
            Self::Boolean => write!(f, "boolean"),
            Self::Date => write!(f, "date"),
            Self::DateTime => write!(f, "datetime"),
            Self::Time => write!(f, "time"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Json => write!(f, "json"),
            Self::Uuid => write!(f, "uuid"),
            Self::Enum(variants) => write!(f, "enum({})", variants.join(",")),
            Self::Binary => write!(f, "binary"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

fn parse_enum_variants(declared: &str) -> Vec<String> {
    let start = declared.find('(').map_or(0, |idx| idx + 1);
    let end = declared.rfind(')').unwrap_or(declared.len());
    declared
        .get(start..end)
        .unwrap_or_default()
        .split(',')
        .map(|variant| variant.trim().trim_matches(['\'', '"']).to_string())
        .filter(|variant| !variant.is_empty())
        .collect()
}

/// A single column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name as stored in the database
    pub name: String,
    /// Normalized SQL type
    pub sql_type: SqlType,
    /// Whether the column accepts NULL
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// Create a column descriptor
    pub fn new(name: impl Into<String>, sql_type: SqlType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            sql_type,
            nullable,
        }
    }
}

/// Outgoing foreign key of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Local column holding the key
    pub column: String,
    /// Referenced table
    pub references_table: String,
    /// Referenced column (usually `id`)
    pub references_column: String,
}

/// A table and its ordered columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Table name
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,
    /// Foreign keys in declaration order
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDescriptor {
    /// Create a descriptor without foreign keys
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            columns,
            foreign_keys: Vec::new(),
        }
    }

    /// Attach foreign keys
    #[must_use]
    pub fn with_foreign_keys(mut self, foreign_keys: Vec<ForeignKey>) -> Self {
        self.foreign_keys = foreign_keys;
        self
    }

    /// Whether the table has a column with this name
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }
}

/// Read-only database introspection
pub trait MetadataSource {
    /// Whether `table` exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried
    fn table_exists(&self, table: &str) -> CrudResult<bool>;

    /// Read the columns and foreign keys of `table`
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried
    fn describe(&self, table: &str) -> CrudResult<TableDescriptor>;
}
