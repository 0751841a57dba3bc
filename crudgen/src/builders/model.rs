//! Model builder

use super::{Artifact, GenerationContext, Workspace};
use crate::error::CrudResult;
use crate::naming::{ClassName, NamingHelpers};
use crate::render::{render_with, ModelTokens};
use crate::schema::SqlType;
use crate::stubs::Stub;

/// Column whose presence turns on soft deletes
pub const SOFT_DELETE_COLUMN: &str = "deleted_at";

/// Eloquent cast for a SQL type, `None` when the attribute stays a string
#[must_use]
pub const fn date_cast(sql_type: &SqlType) -> Option<&'static str> {
    match sql_type {
        SqlType::Date => Some("date"),
        SqlType::DateTime | SqlType::Timestamp => Some("datetime"),
        _ => None,
    }
}

/// Builds `{Class}.php`
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    context: &'a GenerationContext,
}

impl<'a> ModelBuilder<'a> {
    /// Builder for `context`
    #[must_use]
    pub const fn new(context: &'a GenerationContext) -> Self {
        Self { context }
    }

    /// Tokens for the model stub
    #[must_use]
    pub fn tokens(&self) -> ModelTokens {
        let context = self.context;
        ModelTokens {
            common: context.common.clone(),
            table: context.table.name.clone(),
            fillable: context
                .columns
                .iter()
                .map(|column| column.name.clone())
                .collect(),
            rules: self.rules(),
            casts: self.casts(),
            relations: self.relations(),
            properties: self.properties(),
            soft_deletes: context.table.has_column(SOFT_DELETE_COLUMN),
        }
    }

    /// Render and write the model
    ///
    /// # Errors
    ///
    /// Returns an error if the stub is missing, the prompt fails or the file
    /// cannot be written
    pub fn build(&self, workspace: &Workspace<'_>, log: &mut Vec<Artifact>) -> CrudResult<()> {
        workspace.prompter.info("Creating Model...");
        let path = self.context.paths.model(&self.context.class_name);

        workspace.emit(
            "Model",
            &path,
            || {
                let stub = workspace.stubs.load(Stub::Model)?;
                Ok(render_with(&stub, &self.tokens()))
            },
            log,
        )?;
        Ok(())
    }

    /// `'column' => 'required',` for every non-nullable classified column
    fn rules(&self) -> String {
        self.context
            .columns
            .iter()
            .filter(|column| !column.nullable)
            .map(|column| format!("\n        '{}' => 'required',", column.name))
            .collect()
    }

    /// `'column' => 'date',` for every classified date or timestamp column
    fn casts(&self) -> String {
        self.context
            .columns
            .iter()
            .filter_map(|column| {
                date_cast(&column.sql_type)
                    .map(|cast| format!("\n        '{}' => '{cast}',", column.name))
            })
            .collect()
    }

    /// Docblock `@property` lines for every column and relation
    fn properties(&self) -> String {
        let columns = self
            .context
            .table
            .columns
            .iter()
            .map(|column| format!("* @property ${}", column.name));
        let relations = self.context.table.foreign_keys.iter().map(|key| {
            format!(
                "* @property {} ${}",
                ClassName::from_table(&key.references_table),
                NamingHelpers::to_relation_name(&key.references_table)
            )
        });

        let lines: Vec<String> = columns.chain(relations).collect();
        if lines.is_empty() {
            "*".to_string()
        } else {
            format!("{}\n *", lines.join("\n "))
        }
    }

    /// A `belongsTo` method per foreign key
    fn relations(&self) -> String {
        let namespace = &self.context.common.model_namespace;
        self.context
            .table
            .foreign_keys
            .iter()
            .map(|key| {
                let related = ClassName::from_table(&key.references_table);
                let method = NamingHelpers::to_relation_name(&key.references_table);
                format!(
                    "    /**\n     \
                     * @return \\Illuminate\\Database\\Eloquent\\Relations\\BelongsTo\n     \
                     */\n    \
                     public function {method}()\n    \
                     {{\n        \
                     return $this->belongsTo(\\{namespace}\\{related}::class, '{}', '{}');\n    \
                     }}\n",
                    key.column, key.references_column
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::NameOverrides;
    use crate::render::{Token, TokenSet};
    use crate::schema::{ColumnDescriptor, ForeignKey, SqlType, TableDescriptor};
    use crate::testing::{
        assert_fully_rendered, assert_no_nested_keys, MemoryFiles, MemoryStubs, ScriptedPrompter,
    };
    use crate::CrudConfig;

    fn products() -> TableDescriptor {
        TableDescriptor::new(
            "products",
            vec![
                ColumnDescriptor::new("id", SqlType::BigInt, false),
                ColumnDescriptor::new("name", SqlType::String, false),
                ColumnDescriptor::new("price", SqlType::Decimal, false),
                ColumnDescriptor::new("in_stock", SqlType::Boolean, true),
                ColumnDescriptor::new("created_at", SqlType::Timestamp, true),
            ],
        )
    }

    fn context(table: TableDescriptor) -> GenerationContext {
        GenerationContext::new(table, &CrudConfig::default(), &NameOverrides::default())
    }

    #[test]
    fn test_model_tokens() {
        let context = context(products());
        let tokens = ModelBuilder::new(&context).tokens();

        assert_eq!(tokens.table, "products");
        assert_eq!(tokens.fillable, vec!["name", "price", "in_stock"]);
        assert_eq!(
            tokens.rules,
            "\n        'name' => 'required',\n        'price' => 'required',"
        );
        assert!(tokens.relations.is_empty());
        assert!(tokens.casts.is_empty());
        assert!(!tokens.soft_deletes);
        assert_no_nested_keys(&tokens.to_token_map());
    }

    #[test]
    fn test_properties_cover_every_column() {
        let context = context(products());
        let properties = ModelBuilder::new(&context).tokens().properties;

        assert!(properties.starts_with("* @property $id\n * @property $name"));
        assert!(properties.ends_with("* @property $created_at\n *"));
    }

    #[test]
    fn test_relations_and_soft_deletes() {
        let table = TableDescriptor::new(
            "blog_posts",
            vec![
                ColumnDescriptor::new("title", SqlType::String, false),
                ColumnDescriptor::new("author_id", SqlType::BigInt, false),
                ColumnDescriptor::new("deleted_at", SqlType::Timestamp, true),
            ],
        )
        .with_foreign_keys(vec![ForeignKey {
            column: "author_id".to_string(),
            references_table: "users".to_string(),
            references_column: "id".to_string(),
        }]);
        let context = context(table);
        let tokens = ModelBuilder::new(&context).tokens();

        assert!(tokens.soft_deletes);
        assert!(tokens.relations.contains("public function user()"));
        assert!(tokens
            .relations
            .contains("return $this->belongsTo(\\App\\Models\\User::class, 'author_id', 'id');"));
        assert!(tokens.properties.contains("* @property User $user"));

        let map = tokens.to_token_map();
        assert_eq!(
            map.get(Token::SoftDeletes),
            Some("use SoftDeletes;\n")
        );
        assert_no_nested_keys(&map);
    }

    #[test]
    fn test_date_columns_are_cast() {
        let table = TableDescriptor::new(
            "events",
            vec![
                ColumnDescriptor::new("id", SqlType::BigInt, false),
                ColumnDescriptor::new("starts_on", SqlType::Date, false),
                ColumnDescriptor::new("published_at", SqlType::Timestamp, true),
                ColumnDescriptor::new("opens", SqlType::Time, true),
                ColumnDescriptor::new("created_at", SqlType::Timestamp, true),
            ],
        );
        let context = context(table);
        let stubs = MemoryStubs::new();
        let files = MemoryFiles::new();
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        let workspace = Workspace {
            stubs: &stubs,
            files: &files,
            prompter: &prompter,
        };
        let mut log = Vec::new();

        let builder = ModelBuilder::new(&context);
        assert_eq!(
            builder.tokens().casts,
            "\n        'starts_on' => 'date',\n        'published_at' => 'datetime',"
        );

        builder.build(&workspace, &mut log).unwrap();
        let model = files.contents("app/Models/Event.php").unwrap();
        assert!(model.contains(
            "protected $casts = [\n        'starts_on' => 'date',\n        'published_at' => 'datetime',\n    ];"
        ));
        assert!(!model.contains("'opens' =>"));
        assert_fully_rendered(&model);
    }

    #[test]
    fn test_builds_model_file() {
        let context = context(products());
        let stubs = MemoryStubs::new();
        let files = MemoryFiles::new();
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        let workspace = Workspace {
            stubs: &stubs,
            files: &files,
            prompter: &prompter,
        };
        let mut log = Vec::new();

        ModelBuilder::new(&context).build(&workspace, &mut log).unwrap();

        let model = files.contents("app/Models/Product.php").unwrap();
        assert!(model.contains("class Product extends Model"));
        assert!(model.contains("protected $table = 'products';"));
        assert!(model.contains("protected $fillable = ['name', 'price', 'in_stock'];"));
        assert!(!model.contains("SoftDeletes"));
        assert_fully_rendered(&model);
    }
}
