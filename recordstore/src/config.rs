//! Record store configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Dialect, RecordError};
use crate::outbound::persistence::ExecutorConfig;
use crate::store::StoreOptions;

const DEFAULT_DIALECT: &str = "sqlite";
const DEFAULT_TABLE_NAME: &str = "records";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Settings for opening a record store.
///
/// Every value can come from the CLI, a `RECORDSTORE_*` environment variable
/// or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECORDSTORE")]
pub struct StoreSettings {
    /// Connection URL, e.g. `sqlite://records.db` or `postgres://...`.
    pub database_url: Option<String>,
    /// SQL dialect name; see [`Dialect`] for accepted aliases.
    pub dialect: Option<String>,
    /// Table holding the records.
    pub table_name: Option<String>,
    /// Create the table when the store opens.
    #[ortho_config(default = false)]
    pub automigrate: bool,
    /// Log every statement at debug level.
    #[ortho_config(default = false)]
    pub debug: bool,
    /// Upper bound on pooled connections for server databases.
    pub max_connections: Option<u32>,
}

impl StoreSettings {
    /// Return the configured dialect name, falling back to `sqlite`.
    pub fn dialect_name(&self) -> &str {
        self.dialect.as_deref().unwrap_or(DEFAULT_DIALECT)
    }

    /// Return the configured table name, falling back to `records`.
    pub fn table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or(DEFAULT_TABLE_NAME)
    }

    /// Return the pool size, falling back to 5.
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Parse the configured dialect.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnknownDialect`] for unrecognised names.
    pub fn parsed_dialect(&self) -> Result<Dialect, RecordError> {
        self.dialect_name().parse()
    }

    /// Convert the settings into [`StoreOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnknownDialect`] for unrecognised dialect names.
    pub fn store_options(&self) -> Result<StoreOptions, RecordError> {
        Ok(StoreOptions::new(self.table_name())
            .with_dialect(self.parsed_dialect()?)
            .with_automigrate(self.automigrate)
            .with_debug(self.debug))
    }

    /// Executor settings, when a database URL is configured.
    pub fn executor_config(&self) -> Option<ExecutorConfig> {
        self.database_url.as_ref().map(|url| {
            ExecutorConfig::new(url.as_str()).with_max_connections(self.max_connections())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for store configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "RECORDSTORE_DATABASE_URL",
        "RECORDSTORE_DIALECT",
        "RECORDSTORE_TABLE_NAME",
        "RECORDSTORE_AUTOMIGRATE",
        "RECORDSTORE_DEBUG",
        "RECORDSTORE_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> StoreSettings {
        StoreSettings::load_from_iter([OsString::from("recordstore")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.dialect_name(), DEFAULT_DIALECT);
        assert_eq!(settings.table_name(), DEFAULT_TABLE_NAME);
        assert_eq!(settings.max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert!(!settings.automigrate);
        assert!(!settings.debug);
        assert!(settings.executor_config().is_none());

        let options = settings.store_options().expect("default options");
        assert_eq!(options, StoreOptions::new("records"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("RECORDSTORE_DATABASE_URL", Some("postgres://db/records".to_owned())),
            ("RECORDSTORE_DIALECT", Some("postgresql".to_owned())),
            ("RECORDSTORE_TABLE_NAME", Some("audit_log".to_owned())),
            ("RECORDSTORE_AUTOMIGRATE", Some("true".to_owned())),
            ("RECORDSTORE_DEBUG", Some("true".to_owned())),
            ("RECORDSTORE_MAX_CONNECTIONS", Some("12".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let options = settings.store_options().expect("options");
        assert_eq!(options.dialect(), Dialect::Postgres);
        assert_eq!(options.table_name(), "audit_log");
        assert!(options.automigrate());
        assert!(options.debug());

        let executor = settings.executor_config().expect("url configured");
        assert_eq!(executor.database_url(), "postgres://db/records");
        assert_eq!(executor.max_connections(), 12);
    }

    #[rstest]
    fn unknown_dialects_are_reported() {
        let _guard = lock_env([
            ("RECORDSTORE_DATABASE_URL", None::<String>),
            ("RECORDSTORE_DIALECT", Some("oracle".to_owned())),
            ("RECORDSTORE_TABLE_NAME", None::<String>),
            ("RECORDSTORE_AUTOMIGRATE", None::<String>),
            ("RECORDSTORE_DEBUG", None::<String>),
            ("RECORDSTORE_MAX_CONNECTIONS", None::<String>),
        ]);

        let error = load_from_empty_args()
            .store_options()
            .expect_err("oracle is unsupported");
        assert_eq!(error.to_string(), "unknown SQL dialect `oracle`");
    }
}
