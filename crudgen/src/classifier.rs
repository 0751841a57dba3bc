//! Column classification
//!
//! Decides which columns show up in generated views and forms, and which input
//! widget each one gets. Everything here is a pure function over metadata.

use crate::schema::{ColumnDescriptor, SqlType};

/// Columns that never appear in generated views, forms or `$fillable`
pub const DEFAULT_UNWANTED_COLUMNS: &[&str] = &[
    "id",
    "uuid",
    "ulid",
    "password",
    "email_verified_at",
    "remember_token",
    "created_at",
    "updated_at",
    "deleted_at",
];

/// View input control for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Single-line text box
    Text,
    /// Multi-line text area
    TextArea,
    /// Checkbox
    Checkbox,
    /// Date picker
    Date,
    /// Drop-down select
    Select,
}

impl WidgetKind {
    /// Every widget kind, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::TextArea,
        Self::Checkbox,
        Self::Date,
        Self::Select,
    ];

    /// Stable lowercase name, also used for stub file names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Select => "select",
        }
    }

    /// Widget for a SQL type
    ///
    /// | SQL type                                  | Widget     |
    /// |-------------------------------------------|------------|
    /// | string, uuid, integer, bigint, decimal, float | `Text` |
    /// | text, json                                | `TextArea` |
    /// | boolean                                   | `Checkbox` |
    /// | date, datetime, time, timestamp           | `Date`     |
    /// | enum                                      | `Select`   |
    /// | anything else                             | `Text`     |
    #[must_use]
    pub const fn for_sql_type(sql_type: &SqlType) -> Self {
        match sql_type {
            SqlType::Text | SqlType::Json => Self::TextArea,
            SqlType::Boolean => Self::Checkbox,
            SqlType::Date | SqlType::DateTime | SqlType::Time | SqlType::Timestamp => Self::Date,
            SqlType::Enum(_) => Self::Select,
            SqlType::String
            | SqlType::Uuid
            | SqlType::Integer
            | SqlType::BigInt
            | SqlType::Decimal
            | SqlType::Float
            | SqlType::Binary
            | SqlType::Other(_) => Self::Text,
        }
    }
}

/// Applies the exclusion list to table columns
#[derive(Debug, Clone)]
pub struct ColumnClassifier {
    unwanted: Vec<String>,
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_UNWANTED_COLUMNS.iter().map(ToString::to_string))
    }
}

impl ColumnClassifier {
    /// Create a classifier with a custom exclusion list
    pub fn new(unwanted: impl IntoIterator<Item = String>) -> Self {
        Self {
            unwanted: unwanted.into_iter().collect(),
        }
    }

    /// Whether a column name is on the exclusion list
    #[must_use]
    pub fn is_unwanted(&self, name: &str) -> bool {
        self.unwanted.iter().any(|unwanted| unwanted == name)
    }

    /// Columns that take part in generated views, in table order
    #[must_use]
    pub fn classify(&self, columns: &[ColumnDescriptor]) -> Vec<ColumnDescriptor> {
        columns
            .iter()
            .filter(|column| !self.is_unwanted(&column.name))
            .cloned()
            .collect()
    }
}

/// Classify with the default exclusion list
#[must_use]
pub fn classify(columns: &[ColumnDescriptor]) -> Vec<ColumnDescriptor> {
    ColumnClassifier::default().classify(columns)
}

/// Widget for a column
#[must_use]
pub const fn field_widget(column: &ColumnDescriptor) -> WidgetKind {
    WidgetKind::for_sql_type(&column.sql_type)
}

/// Human title for a column: underscores become spaces, each word title-cased
///
/// ```
/// use crudgen::classifier::column_title;
///
/// assert_eq!(column_title("first_name"), "First Name");
/// assert_eq!(column_title("in_stock"), "In Stock");
/// ```
#[must_use]
pub fn column_title(column: &str) -> String {
    column
        .replace('_', " ")
        .split(' ')
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
