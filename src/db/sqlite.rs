use std::path::PathBuf;

use rusqlite::types::ValueRef;

use crate::db::driver::{Connection, Driver};
use crate::error::DriverError;
use crate::models::{ColumnDef, Table, Value};

/// Opens SQLite databases, file-backed or in-memory.
///
/// The bundled reference driver. Column types in results are the SQLite
/// storage class of the first non-NULL value seen per column; a column that
/// never yields a value reports "unknown".
#[derive(Debug, Clone)]
pub struct SqliteDriver {
    path: Option<PathBuf>,
}

impl SqliteDriver {
    /// Driver for a database file, created on first connect if absent.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SqliteDriver {
            path: Some(path.into()),
        }
    }

    /// Driver for a fresh in-memory database.
    pub fn in_memory() -> Self {
        SqliteDriver { path: None }
    }
}

impl Driver for SqliteDriver {
    type Conn = SqliteConnection;

    fn connect(&self) -> Result<Self::Conn, DriverError> {
        let conn = match &self.path {
            Some(path) => {
                if let Some(dir) = path.parent() {
                    std::fs::create_dir_all(dir).ok();
                }
                rusqlite::Connection::open(path)?
            }
            None => rusqlite::Connection::open_in_memory()?,
        };
        Ok(SqliteConnection { conn })
    }
}

pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl Connection for SqliteConnection {
    fn execute(&mut self, sql: &str) -> Result<Table, DriverError> {
        let mut stmt = self.conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
        let width = names.len();

        let mut out: Vec<Vec<Value>> = Vec::new();
        let mut types: Vec<Option<String>> = vec![None; width];
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                let cell = row.get_ref(i)?;
                if types[i].is_none() && !matches!(cell, ValueRef::Null) {
                    types[i] = Some(storage_class(&cell).to_string());
                }
                cells.push(decode(cell));
            }
            out.push(cells);
        }

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| ColumnDef {
                name,
                data_type: types[i].take().unwrap_or_else(|| "unknown".to_string()),
            })
            .collect();

        Ok(Table { columns, rows: out })
    }
}

fn storage_class(cell: &ValueRef<'_>) -> &'static str {
    match cell {
        ValueRef::Null => "null",
        ValueRef::Integer(_) => "integer",
        ValueRef::Real(_) => "real",
        ValueRef::Text(_) => "text",
        ValueRef::Blob(_) => "blob",
    }
}

fn decode(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Int(n),
        ValueRef::Real(n) => Value::Float(n),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
    }
}

impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        DriverError(err.to_string())
    }
}
