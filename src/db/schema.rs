use crate::db::driver::{Connection, Connector, Driver};
use crate::error::DriverError;
use crate::models::{ColumnInfo, Table, Value};

/// Read-only metadata lookups and statement execution over the one
/// lazily-opened connection of a session.
///
/// The driver seam takes SQL text only, so the configured database name and
/// table names are interpolated after [`esc`]. Those identifiers come from
/// configuration and schema introspection, not raw user text; the escaping
/// is a narrow compatibility step, not an injection defense.
pub struct SchemaReader<D: Driver> {
    connector: Connector<D>,
    database: String,
}

impl<D: Driver> SchemaReader<D> {
    pub fn new(driver: D, database: impl Into<String>) -> Self {
        SchemaReader {
            connector: Connector::new(driver),
            database: database.into(),
        }
    }

    /// Base table names of the configured database, ordered by name.
    pub fn list_tables(&mut self) -> Result<Vec<String>, DriverError> {
        let sql = format!(
            "SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES \
             WHERE TABLE_TYPE = 'BASE TABLE' AND TABLE_SCHEMA = '{}' \
             ORDER BY TABLE_NAME;",
            esc(&self.database)
        );
        let result = self.fetch_rows(&sql)?;
        Ok(result.rows.iter().map(|row| text_cell(row, 0)).collect())
    }

    /// Columns of a table in physical column order.
    pub fn list_columns(&mut self, table: &str) -> Result<Vec<ColumnInfo>, DriverError> {
        let sql = format!(
            "SELECT COLUMN_NAME, DATA_TYPE FROM INFORMATION_SCHEMA.COLUMNS \
             WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME = '{}' \
             ORDER BY ORDINAL_POSITION;",
            esc(&self.database),
            esc(table)
        );
        let result = self.fetch_rows(&sql)?;
        Ok(result
            .rows
            .iter()
            .map(|row| ColumnInfo {
                name: text_cell(row, 0),
                data_type: text_cell(row, 1),
            })
            .collect())
    }

    /// Executes an already-validated statement and buffers the full result.
    pub fn fetch_rows(&mut self, sql: &str) -> Result<Table, DriverError> {
        self.connector.open()?.execute(sql)
    }

    /// Fetches a table's full contents ordered by the first supplied column.
    ///
    /// An empty column list yields an empty result without issuing a query.
    pub fn fetch_table_ordered(
        &mut self,
        table: &str,
        ascending: bool,
        columns: &[ColumnInfo],
    ) -> Result<Table, DriverError> {
        let first = match columns.first() {
            Some(column) => column.name.clone(),
            None => return Ok(Table::default()),
        };
        let order = if ascending { "ASC" } else { "DESC" };
        let sql = format!(
            "SELECT {} FROM `{}`.`{}` ORDER BY `{}` {};",
            select_list(columns),
            esc(&self.database),
            esc(table),
            esc(&first),
            order
        );
        self.fetch_rows(&sql)
    }

    /// Releases the connection handle. Dropping the reader does the same.
    pub fn close(&mut self) {
        self.connector.close();
    }
}

/// Renders an explicit select list. Columns reported as TIME are read as
/// CHAR(10) text because the downstream driver cannot represent time-of-day
/// values past 24 hours.
pub(crate) fn select_list(columns: &[ColumnInfo]) -> String {
    let parts: Vec<String> = columns
        .iter()
        .map(|column| {
            let quoted = format!("`{}`", esc(&column.name));
            if column.data_type.eq_ignore_ascii_case("time") {
                format!("CAST({} AS CHAR(10)) AS {}", quoted, quoted)
            } else {
                quoted
            }
        })
        .collect();
    parts.join(", ")
}

/// Strips backticks and doubles single quotes in an identifier bound for
/// interpolation into SQL text.
pub(crate) fn esc(identifier: &str) -> String {
    identifier.replace('`', "").replace('\'', "''")
}

fn text_cell(row: &[Value], idx: usize) -> String {
    match row.get(idx) {
        Some(Value::Text(s)) => s.clone(),
        Some(Value::Int(n)) => n.to_string(),
        Some(Value::Float(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
