//! Record store facade.
//!
//! [`RecordStore`] ties the pieces together: it plans a [`RecordQuery`],
//! renders the plan for the configured [`Dialect`], runs the statement through
//! a [`SqlExecutor`] and hydrates [`Record`]s from the returned rows. Writes
//! are driven by the record's dirty tracking, so an update only touches the
//! columns that changed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{SqlExecutor, SqlExecutorError, Statement};
use crate::domain::{
    Column, Dialect, MAX_DATETIME, Record, RecordError, RecordQuery, format_timestamp,
};
use crate::outbound::sql::{
    create_table_sql, is_valid_identifier, render_count, render_delete, render_insert,
    render_select, render_update,
};

/// Errors returned by [`RecordStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    /// The query or record content was invalid.
    #[error(transparent)]
    Record(#[from] RecordError),
    /// The executor failed to run a statement.
    #[error(transparent)]
    Executor(#[from] SqlExecutorError),
    /// The operation needs a record id and none was given.
    #[error("record id is required")]
    MissingId,
    /// The store was opened without a table name.
    #[error("table name is required")]
    MissingTableName,
    /// The table name is not a plain SQL identifier.
    #[error("invalid table name `{name}`")]
    InvalidTableName {
        /// The rejected name.
        name: String,
    },
    /// A count query returned something other than a non-negative integer.
    #[error("count query returned `{value}`")]
    InvalidCount {
        /// The raw value returned by the backend.
        value: String,
    },
}

/// Options for opening a [`RecordStore`].
///
/// # Example
///
/// ```
/// use recordstore::StoreOptions;
/// use recordstore::domain::Dialect;
///
/// let options = StoreOptions::new("records")
///     .with_dialect(Dialect::Postgres)
///     .with_automigrate(true);
/// assert_eq!(options.table_name(), "records");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    table_name: String,
    dialect: Dialect,
    automigrate: bool,
    debug: bool,
}

impl StoreOptions {
    /// Options for `table_name` on SQLite, without auto-migration or debug
    /// logging.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            dialect: Dialect::Sqlite,
            automigrate: false,
            debug: false,
        }
    }

    /// Set the SQL dialect statements are rendered for.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Create the table when the store is opened.
    pub fn with_automigrate(mut self, automigrate: bool) -> Self {
        self.automigrate = automigrate;
        self
    }

    /// Log every statement at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Get the dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether the table is created on open.
    pub fn automigrate(&self) -> bool {
        self.automigrate
    }

    /// Whether statements are logged.
    pub fn debug(&self) -> bool {
        self.debug
    }
}

/// Record persistence over a [`SqlExecutor`].
pub struct RecordStore<E: ?Sized> {
    executor: Arc<E>,
    clock: Arc<dyn Clock>,
    table_name: String,
    dialect: Dialect,
    debug: AtomicBool,
}

impl<E> RecordStore<E>
where
    E: SqlExecutor + ?Sized,
{
    /// Open a store over `executor`.
    ///
    /// The table name must be a plain identifier. When auto-migration is
    /// enabled the table is created before the store is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::MissingTableName`] or
    /// [`RecordStoreError::InvalidTableName`] for a bad table name, and
    /// [`RecordStoreError::Executor`] when auto-migration fails.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use recordstore::{RecordStore, StoreOptions};
    /// # use recordstore::domain::ports::FixtureSqlExecutor;
    /// # async fn example() -> Result<(), recordstore::RecordStoreError> {
    /// let store = RecordStore::open(
    ///     Arc::new(FixtureSqlExecutor),
    ///     Arc::new(DefaultClock),
    ///     StoreOptions::new("records").with_automigrate(true),
    /// )
    /// .await?;
    /// # drop(store);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn open(
        executor: Arc<E>,
        clock: Arc<dyn Clock>,
        options: StoreOptions,
    ) -> Result<Self, RecordStoreError> {
        let StoreOptions {
            table_name,
            dialect,
            automigrate,
            debug,
        } = options;

        if table_name.is_empty() {
            return Err(RecordStoreError::MissingTableName);
        }
        if !is_valid_identifier(&table_name) {
            return Err(RecordStoreError::InvalidTableName { name: table_name });
        }

        let store = Self {
            executor,
            clock,
            table_name,
            dialect,
            debug: AtomicBool::new(debug),
        };
        if automigrate {
            store.auto_migrate().await?;
        }
        Ok(store)
    }

    /// The table records are stored in.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The dialect statements are rendered for.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether statements are currently logged.
    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Toggle statement logging.
    pub fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    /// The `CREATE TABLE` statement for this store's table and dialect.
    pub fn create_table_sql(&self) -> String {
        create_table_sql(self.dialect, &self.table_name)
    }

    /// Create the record table if it does not exist.
    pub async fn auto_migrate(&self) -> Result<(), RecordStoreError> {
        info!(table = %self.table_name, dialect = %self.dialect, "creating record table");
        self.execute("auto_migrate", Statement::raw(self.create_table_sql()))
            .await?;
        Ok(())
    }

    /// Insert a new record.
    ///
    /// Stamps `created_at` and `updated_at` with the current time and marks
    /// the record clean once the row is written. A record without a
    /// `soft_deleted_at` gets the far-future sentinel so it stays visible.
    pub async fn create(&self, record: &mut Record) -> Result<(), RecordStoreError> {
        if record.id().is_empty() {
            return Err(RecordStoreError::MissingId);
        }

        let now = self.now();
        record.set_created_at(now.as_str());
        record.set_updated_at(now);
        if record.soft_deleted_at().is_empty() {
            record.set_soft_deleted_at(MAX_DATETIME);
        }

        let statement = render_insert(self.dialect, &self.table_name, record.data());
        self.execute("create", statement).await?;
        record.mark_clean();
        Ok(())
    }

    /// Write the record's changed columns.
    ///
    /// The id is never updated. `updated_at` is always refreshed and written,
    /// so a record with no other changes still gets a statement. The record
    /// is marked clean only when the statement succeeds.
    pub async fn update(&self, record: &mut Record) -> Result<(), RecordStoreError> {
        if record.id().is_empty() {
            return Err(RecordStoreError::MissingId);
        }

        record.set_updated_at(self.now());
        let mut changes = record.changed_fields().clone();
        changes.remove(&Column::Id);

        let statement = render_update(self.dialect, &self.table_name, record.id(), &changes);
        self.execute("update", statement).await?;
        record.mark_clean();
        Ok(())
    }

    /// Look up a visible record by id.
    ///
    /// Soft-deleted records are not returned.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Record>, RecordStoreError> {
        if id.is_empty() {
            return Err(RecordStoreError::MissingId);
        }
        let records = self
            .list(&RecordQuery::new().with_id(id).with_limit(1))
            .await?;
        Ok(records.into_iter().next())
    }

    /// Return every record matching `query`.
    pub async fn list(&self, query: &RecordQuery) -> Result<Vec<Record>, RecordStoreError> {
        let plan = query.to_plan(self.dialect, &self.table_name, self.clock.utc())?;
        let rows = self.select("list", render_select(&plan)).await?;
        Ok(rows.into_iter().map(Record::from_row).collect())
    }

    /// Count the records matching `query`, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::InvalidCount`] when the backend returns a
    /// value that is not a non-negative integer.
    pub async fn count(&self, query: &RecordQuery) -> Result<u64, RecordStoreError> {
        let plan = query.clone().with_count_only(true).to_plan(
            self.dialect,
            &self.table_name,
            self.clock.utc(),
        )?;
        let rows = self.select("count", render_count(&plan)).await?;

        let Some(row) = rows.first() else {
            return Ok(0);
        };
        let value = row.get("count").map(String::as_str).unwrap_or_default();
        value.trim().parse::<u64>().map_err(|_| {
            warn!(value, "count query returned a malformed value");
            RecordStoreError::InvalidCount {
                value: value.to_owned(),
            }
        })
    }

    /// Hide a record by stamping `soft_deleted_at` with the current time.
    pub async fn soft_delete(&self, record: &mut Record) -> Result<(), RecordStoreError> {
        record.set_soft_deleted_at(self.now());
        self.update(record).await
    }

    /// Hide the record with `id`.
    ///
    /// A record that does not exist, or is already hidden, is left alone.
    pub async fn soft_delete_by_id(&self, id: &str) -> Result<(), RecordStoreError> {
        match self.find_by_id(id).await? {
            Some(mut record) => self.soft_delete(&mut record).await,
            None => Ok(()),
        }
    }

    /// Permanently remove a record.
    pub async fn delete(&self, record: &Record) -> Result<(), RecordStoreError> {
        self.delete_by_id(record.id()).await
    }

    /// Permanently remove the record with `id`.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), RecordStoreError> {
        if id.is_empty() {
            return Err(RecordStoreError::MissingId);
        }
        let statement = render_delete(self.dialect, &self.table_name, id);
        self.execute("delete", statement).await?;
        Ok(())
    }

    fn now(&self) -> String {
        format_timestamp(self.clock.utc())
    }

    fn log_statement(&self, operation: &'static str, statement: &Statement) {
        if self.is_debug() {
            debug!(
                operation,
                table = %self.table_name,
                sql = %statement.sql,
                params = ?statement.params,
                "record store statement"
            );
        }
    }

    async fn execute(
        &self,
        operation: &'static str,
        statement: Statement,
    ) -> Result<u64, RecordStoreError> {
        self.log_statement(operation, &statement);
        Ok(self.executor.execute(&statement).await?)
    }

    async fn select(
        &self,
        operation: &'static str,
        statement: Statement,
    ) -> Result<Vec<crate::domain::ports::Row>, RecordStoreError> {
        self.log_statement(operation, &statement);
        Ok(self.executor.select_rows(&statement).await?)
    }
}
