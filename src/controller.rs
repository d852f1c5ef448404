use std::path::PathBuf;

use crate::catalog::QueryCatalog;
use crate::db::driver::Driver;
use crate::db::schema::SchemaReader;
use crate::error::{Error, ValidationError};
use crate::guard;
use crate::models::{SavedQuery, Table};

/// One browsing session: a database reached through a driver plus the
/// user's saved-query catalog.
///
/// All operations run synchronously on the caller's thread. The database
/// connection opens on first use and lives until [`Controller::close`] or
/// drop.
pub struct Controller<D: Driver> {
    schema: SchemaReader<D>,
    catalog: QueryCatalog,
}

impl<D: Driver> Controller<D> {
    /// Creates a session over `driver` for `database`, with the catalog at
    /// its default per-user location.
    pub fn new(driver: D, database: impl Into<String>) -> Self {
        Controller::with_catalog_path(driver, database, QueryCatalog::default_path())
    }

    /// Same as [`Controller::new`] with an explicit catalog file path.
    pub fn with_catalog_path(
        driver: D,
        database: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Controller {
            schema: SchemaReader::new(driver, database),
            catalog: QueryCatalog::open(path),
        }
    }

    /// Base table names of the configured database.
    pub fn list_tables(&mut self) -> Result<Vec<String>, Error> {
        self.schema.list_tables().map_err(Error::from_execution)
    }

    /// A table's full contents, ordered by its first column.
    pub fn query_table(&mut self, table: &str, ascending: bool) -> Result<Table, Error> {
        let columns = self
            .schema
            .list_columns(table)
            .map_err(Error::from_execution)?;
        self.schema
            .fetch_table_ordered(table, ascending, &columns)
            .map_err(Error::from_execution)
    }

    /// Checks that `sql` is a single read-only statement.
    pub fn validate(&self, sql: &str) -> Result<(), ValidationError> {
        guard::validate(sql)
    }

    /// Suggests a display name for `sql`.
    pub fn suggest_name(&self, sql: &str) -> String {
        guard::suggest_name(sql)
    }

    /// Validates, rewrites and executes `sql`, returning the full result.
    ///
    /// Rejected text never reaches the database. A failure during the
    /// select-star rewrite's column lookup reports as [`Error::Unexpected`];
    /// failures from the statement itself report as [`Error::Execution`],
    /// except the driver's time-of-day overflow, which maps to
    /// [`Error::TimeOverflow`].
    pub fn execute(&mut self, sql: &str) -> Result<Table, Error> {
        guard::validate(sql)?;
        let rewritten = guard::rewrite_select_all(&mut self.schema, sql)
            .map_err(|e| Error::Unexpected(e.to_string()))?;
        let statement = rewritten.trim_end_matches([';', ' ']);
        self.schema
            .fetch_rows(statement)
            .map_err(Error::from_execution)
    }

    /// Runs the saved query with `id`.
    pub fn preview_saved(&mut self, id: &str) -> Result<Table, Error> {
        let sql = match self.catalog.get(id) {
            Some(entry) => entry.sql.clone(),
            None => return Err(Error::UnknownQuery(id.to_string())),
        };
        self.execute(&sql)
    }

    /// Adds a saved query; blank names fall back to "Consulta".
    pub fn add_query(&mut self, name: &str, sql: &str) -> SavedQuery {
        self.catalog.add(name, sql)
    }

    /// Updates a saved query in place; unknown ids are a no-op.
    pub fn update_query(&mut self, id: &str, name: &str, sql: &str) {
        self.catalog.update(id, name, sql)
    }

    /// Deletes a saved query; unknown ids are a no-op.
    pub fn delete_query(&mut self, id: &str) {
        self.catalog.delete(id)
    }

    /// Looks up a saved query by id, case-insensitively.
    pub fn get_query(&self, id: &str) -> Option<&SavedQuery> {
        self.catalog.get(id)
    }

    pub fn saved_queries(&self) -> &[SavedQuery] {
        self.catalog.entries()
    }

    /// Releases the database connection. Dropping the controller does the
    /// same.
    pub fn close(&mut self) {
        self.schema.close();
    }
}
