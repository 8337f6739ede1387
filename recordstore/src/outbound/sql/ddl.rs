//! Record table DDL.

use crate::domain::{Column, Dialect};

use super::dialect::{quote_column, quote_identifier};

/// `CREATE TABLE IF NOT EXISTS` for the record table on `dialect`.
///
/// `soft_deleted_at` is nullable in the schema, although the store always
/// writes the far-future sentinel instead of `NULL`.
pub fn create_table_sql(dialect: Dialect, table: &str) -> String {
    let columns = Column::ALL
        .into_iter()
        .map(|column| {
            format!(
                "{} {}",
                quote_column(dialect, column),
                column_definition(dialect, column)
            )
        })
        .collect::<Vec<_>>()
        .join(",\n  ");
    let quoted = quote_identifier(dialect, table);

    match dialect {
        Dialect::MsSql => format!(
            "IF OBJECT_ID(N'{}', N'U') IS NULL\nCREATE TABLE {quoted} (\n  {columns}\n)",
            table.replace('\'', "''")
        ),
        Dialect::MySql | Dialect::Postgres | Dialect::Sqlite => {
            format!("CREATE TABLE IF NOT EXISTS {quoted} (\n  {columns}\n)")
        }
    }
}

fn column_definition(dialect: Dialect, column: Column) -> &'static str {
    match (column, dialect) {
        (Column::Id, _) => "varchar(40) NOT NULL PRIMARY KEY",
        (Column::RecordType, _) => "varchar(100) NOT NULL",
        (Column::Payload, Dialect::MySql) => "longtext NULL",
        (Column::Payload, Dialect::MsSql) => "nvarchar(max) NULL",
        (Column::Payload, Dialect::Postgres | Dialect::Sqlite) => "text NULL",
        (Column::Metas | Column::Memo, Dialect::MsSql) => "nvarchar(max) NULL",
        (Column::Metas | Column::Memo, _) => "text NULL",
        (Column::CreatedAt | Column::UpdatedAt, Dialect::Postgres) => "timestamp NOT NULL",
        (Column::CreatedAt | Column::UpdatedAt, Dialect::MsSql) => "datetime2(0) NOT NULL",
        (Column::CreatedAt | Column::UpdatedAt, _) => "datetime NOT NULL",
        (Column::SoftDeletedAt, Dialect::Postgres) => "timestamp NULL",
        (Column::SoftDeletedAt, Dialect::MsSql) => "datetime2(0) NULL",
        (Column::SoftDeletedAt, _) => "datetime NULL",
    }
}
