//! Table introspection over sqlx
//!
//! Supports `SQLite` and `PostgreSQL`, chosen from the URL scheme. The
//! generator itself is synchronous, so [`SqlxMetadata`] owns a
//! current-thread tokio runtime and blocks on every query.

use crate::error::{CrudError, CrudResult};
use crate::schema::{ColumnDescriptor, ForeignKey, MetadataSource, SqlType, TableDescriptor};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tokio::runtime::{Builder, Runtime};

/// `data_type` Postgres reports for enum columns
const PG_USER_DEFINED: &str = "USER-DEFINED";

enum Pool {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

/// [`MetadataSource`] backed by a live database
pub struct SqlxMetadata {
    runtime: Runtime,
    pool: Pool,
}

impl SqlxMetadata {
    /// Connect to `url` (`sqlite:...`, `postgres://...` or `postgresql://...`)
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::UnsupportedDatabase`] for other schemes and
    /// [`CrudError::Database`] if the connection fails
    pub fn connect(url: &str) -> CrudResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let pool = if url.starts_with("sqlite:") {
            let pool = SqlitePoolOptions::new().max_connections(1).connect(url);
            Pool::Sqlite(runtime.block_on(pool)?)
        } else if url.starts_with("postgres:") || url.starts_with("postgresql:") {
            let pool = PgPoolOptions::new().max_connections(1).connect(url);
            Pool::Postgres(runtime.block_on(pool)?)
        } else {
            let scheme = url.split(':').next().unwrap_or_default();
            return Err(CrudError::UnsupportedDatabase(scheme.to_string()));
        };

        tracing::debug!(backend = pool.backend(), "database connected");
        Ok(Self { runtime, pool })
    }

    /// `sqlite` or `postgres`
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        self.pool.backend()
    }
}

impl Pool {
    const fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
        }
    }
}

impl MetadataSource for SqlxMetadata {
    fn table_exists(&self, table: &str) -> CrudResult<bool> {
        let exists = match &self.pool {
            Pool::Sqlite(pool) => self.runtime.block_on(sqlite::table_exists(pool, table))?,
            Pool::Postgres(pool) => self.runtime.block_on(postgres::table_exists(pool, table))?,
        };
        tracing::debug!(table, exists, "table lookup");
        Ok(exists)
    }

    fn describe(&self, table: &str) -> CrudResult<TableDescriptor> {
        let descriptor = match &self.pool {
            Pool::Sqlite(pool) => self.runtime.block_on(sqlite::describe(pool, table))?,
            Pool::Postgres(pool) => self.runtime.block_on(postgres::describe(pool, table))?,
        };
        tracing::debug!(
            table,
            columns = descriptor.columns.len(),
            foreign_keys = descriptor.foreign_keys.len(),
            "table described"
        );
        Ok(descriptor)
    }
}

mod sqlite {
    use super::{ColumnDescriptor, ForeignKey, SqlType, TableDescriptor};
    use sqlx::SqlitePool;

    pub async fn table_exists(pool: &SqlitePool, table: &str) -> sqlx::Result<bool> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
        )
        .bind(table)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn describe(pool: &SqlitePool, table: &str) -> sqlx::Result<TableDescriptor> {
        let columns: Vec<(String, String, i64)> = sqlx::query_as(
            r#"SELECT name, type, "notnull" FROM pragma_table_info(?1) ORDER BY cid"#,
        )
        .bind(table)
        .fetch_all(pool)
        .await?;

        let foreign_keys: Vec<(String, String, Option<String>)> = sqlx::query_as(
            r#"SELECT "from", "table", "to" FROM pragma_foreign_key_list(?1) ORDER BY id, seq"#,
        )
        .bind(table)
        .fetch_all(pool)
        .await?;

        let columns = columns
            .into_iter()
            .map(|(name, declared, not_null)| {
                ColumnDescriptor::new(name, SqlType::parse(&declared), not_null == 0)
            })
            .collect();
        let foreign_keys = foreign_keys
            .into_iter()
            .map(|(column, references_table, references_column)| ForeignKey {
                column,
                references_table,
                references_column: references_column.unwrap_or_else(|| "id".to_string()),
            })
            .collect();

        Ok(TableDescriptor::new(table, columns).with_foreign_keys(foreign_keys))
    }
}

mod postgres {
    use super::{ColumnDescriptor, ForeignKey, SqlType, TableDescriptor, PG_USER_DEFINED};
    use sqlx::PgPool;

    pub async fn table_exists(pool: &PgPool, table: &str) -> sqlx::Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )",
        )
        .bind(table)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    pub async fn describe(pool: &PgPool, table: &str) -> sqlx::Result<TableDescriptor> {
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            "SELECT column_name::text, data_type::text, udt_name::text, is_nullable::text
             FROM information_schema.columns
             WHERE table_schema = current_schema() AND table_name = $1
             ORDER BY ordinal_position",
        )
        .bind(table)
        .fetch_all(pool)
        .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for (name, data_type, udt_name, is_nullable) in rows {
            let sql_type = if data_type == PG_USER_DEFINED {
                enum_type(pool, &udt_name).await?
            } else {
                SqlType::parse(&data_type)
            };
            columns.push(ColumnDescriptor::new(name, sql_type, is_nullable == "YES"));
        }

        let foreign_keys: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT kcu.column_name::text, ccu.table_name::text, ccu.column_name::text
             FROM information_schema.table_constraints tc
             JOIN information_schema.key_column_usage kcu
               ON kcu.constraint_name = tc.constraint_name AND kcu.table_schema = tc.table_schema
             JOIN information_schema.constraint_column_usage ccu
               ON ccu.constraint_name = tc.constraint_name AND ccu.table_schema = tc.table_schema
             WHERE tc.constraint_type = 'FOREIGN KEY'
               AND tc.table_schema = current_schema()
               AND tc.table_name = $1
             ORDER BY kcu.ordinal_position",
        )
        .bind(table)
        .fetch_all(pool)
        .await?;

        let foreign_keys = foreign_keys
            .into_iter()
            .map(|(column, references_table, references_column)| ForeignKey {
                column,
                references_table,
                references_column,
            })
            .collect();

        Ok(TableDescriptor::new(table, columns).with_foreign_keys(foreign_keys))
    }

    /// Labels of a Postgres enum type, or the raw type name for other user types
    async fn enum_type(pool: &PgPool, type_name: &str) -> sqlx::Result<SqlType> {
        let labels: Vec<(String,)> = sqlx::query_as(
            "SELECT e.enumlabel::text
             FROM pg_enum e
             JOIN pg_type t ON t.oid = e.enumtypid
             WHERE t.typname = $1
             ORDER BY e.enumsortorder",
        )
        .bind(type_name)
        .fetch_all(pool)
        .await?;

        if labels.is_empty() {
            return Ok(SqlType::Other(type_name.to_string()));
        }
        Ok(SqlType::Enum(labels.into_iter().map(|(label,)| label).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_scheme() {
        let err = SqlxMetadata::connect("mysql://localhost/app").err().unwrap();
        assert!(matches!(err, CrudError::UnsupportedDatabase(ref scheme) if scheme == "mysql"));
    }

    #[test]
    fn test_in_memory_sqlite() {
        let metadata = SqlxMetadata::connect("sqlite::memory:").unwrap();
        assert_eq!(metadata.backend(), "sqlite");
        assert!(!metadata.table_exists("products").unwrap());
    }
}
