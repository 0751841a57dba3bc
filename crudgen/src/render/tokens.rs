//! Typed token records
//!
//! Each artifact builder fills one of these records; [`TokenSet::to_token_map`]
//! flattens it into the key/value pairs [`super::render`] substitutes.

use super::TokenMap;

/// Every placeholder the generator knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    /// Blade layout to extend (`layouts.app`)
    Layout,
    /// `Product`
    ModelName,
    /// `Product`, or the `--title` override
    ModelTitle,
    /// `Products`
    ModelTitlePlural,
    /// `App\Models`
    ModelNamespace,
    /// `App\Http\Controllers`
    ControllerNamespace,
    /// `products` in camelCase plural
    ModelNamePluralLowerCase,
    /// `Products`
    ModelNamePluralUpperCase,
    /// `product` in camelCase
    ModelNameLowerCase,
    /// Route name, `products` or the `--route` override
    ModelRoute,
    /// View folder, `product`
    ModelView,
    /// Database table name
    TableName,
    /// Table name as used by the model's `$table`
    Table,
    /// Quoted, comma separated fillable columns
    Fillable,
    /// Validation rules array body
    Rules,
    /// `$casts` array body
    Casts,
    /// Index filter comparisons, column => kind
    Filters,
    /// Relation methods
    Relations,
    /// `@property` docblock lines
    Properties,
    /// `use ...\SoftDeletes;` import, or empty
    SoftDeletesNamespace,
    /// `use SoftDeletes;` trait, or empty
    SoftDeletes,
    /// `<th>` cells
    TableHeader,
    /// `<td>` cells
    TableBody,
    /// Filter inputs for the index table
    TableColumnFilters,
    /// Read-only rows for the show view
    ViewRows,
    /// Form inputs
    Form,
    /// Column title inside a field fragment
    Title,
    /// Column name inside a field fragment
    Column,
    /// `snake_case` column name inside a field fragment
    ColumnSnake,
    /// `<option>` list inside a select fragment
    Options,
    /// HTML `type` of a date picker
    InputType,
    /// PHP expression for the current value of a date field
    FieldValue,
}

impl Token {
    /// Placeholder text as it appears in stubs
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Layout => "{{layout}}",
            Self::ModelName => "{{modelName}}",
            Self::ModelTitle => "{{modelTitle}}",
            Self::ModelTitlePlural => "{{modelTitlePlural}}",
            Self::ModelNamespace => "{{modelNamespace}}",
            Self::ControllerNamespace => "{{controllerNamespace}}",
            Self::ModelNamePluralLowerCase => "{{modelNamePluralLowerCase}}",
            Self::ModelNamePluralUpperCase => "{{modelNamePluralUpperCase}}",
            Self::ModelNameLowerCase => "{{modelNameLowerCase}}",
            Self::ModelRoute => "{{modelRoute}}",
            Self::ModelView => "{{modelView}}",
            Self::TableName => "{{tableName}}",
            Self::Table => "{{table}}",
            Self::Fillable => "{{fillable}}",
            Self::Rules => "{{rules}}",
            Self::Casts => "{{casts}}",
            Self::Filters => "{{filters}}",
            Self::Relations => "{{relations}}",
            Self::Properties => "{{properties}}",
            Self::SoftDeletesNamespace => "{{softDeletesNamespace}}",
            Self::SoftDeletes => "{{softDeletes}}",
            Self::TableHeader => "{{tableHeader}}",
            Self::TableBody => "{{tableBody}}",
            Self::TableColumnFilters => "{{tableColumnFilters}}",
            Self::ViewRows => "{{viewRows}}",
            Self::Form => "{{form}}",
            Self::Title => "{{title}}",
            Self::Column => "{{column}}",
            Self::ColumnSnake => "{{column_snake}}",
            Self::Options => "{{options}}",
            Self::InputType => "{{inputType}}",
            Self::FieldValue => "{{fieldValue}}",
        }
    }
}

/// A record that can be flattened into token pairs
pub trait TokenSet {
    /// Write this record's pairs into `map`
    fn fill(&self, map: &mut TokenMap);

    /// Flatten into a fresh map
    fn to_token_map(&self) -> TokenMap {
        let mut map = TokenMap::new();
        self.fill(&mut map);
        map
    }
}

/// Tokens shared by every artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonTokens {
    /// Blade layout
    pub layout: String,
    /// Class name
    pub model_name: String,
    /// Display title
    pub model_title: String,
    /// Plural display title
    pub model_title_plural: String,
    /// Model namespace
    pub model_namespace: String,
    /// Controller namespace
    pub controller_namespace: String,
    /// camelCase plural
    pub plural_lower: String,
    /// `StudlyCase` plural
    pub plural_upper: String,
    /// camelCase singular
    pub lower: String,
    /// Route name
    pub route: String,
    /// View folder
    pub view: String,
    /// Table name
    pub table_name: String,
}

impl TokenSet for CommonTokens {
    fn fill(&self, map: &mut TokenMap) {
        map.insert(Token::Layout, &self.layout);
        map.insert(Token::ModelName, &self.model_name);
        map.insert(Token::ModelTitle, &self.model_title);
        map.insert(Token::ModelTitlePlural, &self.model_title_plural);
        map.insert(Token::ModelNamespace, &self.model_namespace);
        map.insert(Token::ControllerNamespace, &self.controller_namespace);
        map.insert(Token::ModelNamePluralLowerCase, &self.plural_lower);
        map.insert(Token::ModelNamePluralUpperCase, &self.plural_upper);
        map.insert(Token::ModelNameLowerCase, &self.lower);
        map.insert(Token::ModelRoute, &self.route);
        map.insert(Token::ModelView, &self.view);
        map.insert(Token::TableName, &self.table_name);
    }
}

/// Tokens for the controller stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerTokens {
    /// Shared tokens
    pub common: CommonTokens,
    /// Rendered `'column' => 'comparison',` lines
    pub filters: String,
}

impl TokenSet for ControllerTokens {
    fn fill(&self, map: &mut TokenMap) {
        self.common.fill(map);
        map.insert(Token::Filters, &self.filters);
    }
}

/// Tokens for the model stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTokens {
    /// Shared tokens
    pub common: CommonTokens,
    /// `$table`
    pub table: String,
    /// Fillable column names, unquoted
    pub fillable: Vec<String>,
    /// Rendered `'column' => 'rule',` lines
    pub rules: String,
    /// Rendered `'column' => 'cast',` lines
    pub casts: String,
    /// Rendered relation methods
    pub relations: String,
    /// Rendered docblock body
    pub properties: String,
    /// Whether the table has a soft-delete column
    pub soft_deletes: bool,
}

impl ModelTokens {
    /// `'name', 'price', 'in_stock'`
    #[must_use]
    pub fn fillable_list(&self) -> String {
        self.fillable
            .iter()
            .map(|column| format!("'{column}'"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TokenSet for ModelTokens {
    fn fill(&self, map: &mut TokenMap) {
        self.common.fill(map);
        map.insert(Token::Table, &self.table);
        map.insert(Token::Fillable, self.fillable_list());
        map.insert(Token::Rules, &self.rules);
        map.insert(Token::Casts, &self.casts);
        map.insert(Token::Relations, &self.relations);
        map.insert(Token::Properties, &self.properties);
        if self.soft_deletes {
            map.insert(
                Token::SoftDeletesNamespace,
                "use Illuminate\\Database\\Eloquent\\SoftDeletes;\n",
            );
            map.insert(Token::SoftDeletes, "use SoftDeletes;\n");
        } else {
            map.insert(Token::SoftDeletesNamespace, "");
            map.insert(Token::SoftDeletes, "");
        }
    }
}

/// Tokens shared by the five view stubs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTokens {
    /// Shared tokens
    pub common: CommonTokens,
    /// `<th>` cells
    pub table_header: String,
    /// `<td>` cells
    pub table_body: String,
    /// Filter inputs
    pub table_column_filters: String,
    /// Show view rows
    pub view_rows: String,
    /// Form fields
    pub form: String,
}

impl TokenSet for ViewTokens {
    fn fill(&self, map: &mut TokenMap) {
        self.common.fill(map);
        map.insert(Token::TableHeader, &self.table_header);
        map.insert(Token::TableBody, &self.table_body);
        map.insert(Token::TableColumnFilters, &self.table_column_filters);
        map.insert(Token::ViewRows, &self.view_rows);
        map.insert(Token::Form, &self.form);
    }
}

/// Tokens for a single per-column fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTokens<'a> {
    /// Shared tokens
    pub common: &'a CommonTokens,
    /// Column title
    pub title: String,
    /// Column name
    pub column: String,
    /// Rendered `<option>` elements, empty unless the widget is a select
    pub options: String,
    /// `date`, `datetime-local` or `time` for date pickers, `text` otherwise
    pub input_type: &'static str,
    /// PHP expression for the field's current value
    pub value: String,
}

impl TokenSet for FieldTokens<'_> {
    fn fill(&self, map: &mut TokenMap) {
        self.common.fill(map);
        map.insert(Token::Title, &self.title);
        map.insert(Token::Column, &self.column);
        map.insert(
            Token::ColumnSnake,
            crate::naming::NamingHelpers::to_snake_case(&self.column),
        );
        map.insert(Token::Options, &self.options);
        map.insert(Token::InputType, self.input_type);
        map.insert(Token::FieldValue, &self.value);
    }
}
