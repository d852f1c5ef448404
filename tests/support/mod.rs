#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use mirador_core::{ColumnDef, Connection, Driver, DriverError, Table, Value};

/// Routes log output through the test harness. Safe to call from every
/// test; only the first call installs the logger.
pub(crate) fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A driver whose connections replay queued responses in order and record
/// every statement they execute. Clones share the same queue and log.
#[derive(Clone, Default)]
pub(crate) struct ScriptedDriver {
    responses: Rc<RefCell<VecDeque<Result<Table, DriverError>>>>,
    statements: Rc<RefCell<Vec<String>>>,
}

pub(crate) struct ScriptedConnection {
    responses: Rc<RefCell<VecDeque<Result<Table, DriverError>>>>,
    statements: Rc<RefCell<Vec<String>>>,
}

impl ScriptedDriver {
    pub(crate) fn new() -> Self {
        ScriptedDriver::default()
    }

    /// Queues the result of the next executed statement.
    pub(crate) fn push_table(&self, table: Table) {
        self.responses.borrow_mut().push_back(Ok(table));
    }

    pub(crate) fn push_error(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(DriverError::new(message)));
    }

    /// Statements executed so far, oldest first.
    pub(crate) fn statements(&self) -> Vec<String> {
        self.statements.borrow().clone()
    }

    pub(crate) fn last_statement(&self) -> Option<String> {
        self.statements.borrow().last().cloned()
    }
}

impl Driver for ScriptedDriver {
    type Conn = ScriptedConnection;

    fn connect(&self) -> Result<Self::Conn, DriverError> {
        Ok(ScriptedConnection {
            responses: Rc::clone(&self.responses),
            statements: Rc::clone(&self.statements),
        })
    }
}

impl Connection for ScriptedConnection {
    fn execute(&mut self, sql: &str) -> Result<Table, DriverError> {
        self.statements.borrow_mut().push(sql.to_string());
        match self.responses.borrow_mut().pop_front() {
            Some(response) => response,
            None => panic!("unscripted statement: {}", sql),
        }
    }
}

/// A result table with the given `(name, type)` columns and rows.
pub(crate) fn table(columns: &[(&str, &str)], rows: Vec<Vec<Value>>) -> Table {
    Table {
        columns: columns
            .iter()
            .map(|(name, data_type)| ColumnDef {
                name: name.to_string(),
                data_type: data_type.to_string(),
            })
            .collect(),
        rows,
    }
}

/// The shape of an `INFORMATION_SCHEMA.COLUMNS` response: one
/// `(COLUMN_NAME, DATA_TYPE)` row per entry.
pub(crate) fn columns_response(columns: &[(&str, &str)]) -> Table {
    table(
        &[("COLUMN_NAME", "varchar"), ("DATA_TYPE", "varchar")],
        columns
            .iter()
            .map(|(name, data_type)| {
                vec![
                    Value::Text(name.to_string()),
                    Value::Text(data_type.to_string()),
                ]
            })
            .collect(),
    )
}

/// The shape of an `INFORMATION_SCHEMA.TABLES` response: one `TABLE_NAME`
/// row per entry.
pub(crate) fn tables_response(names: &[&str]) -> Table {
    table(
        &[("TABLE_NAME", "varchar")],
        names
            .iter()
            .map(|name| vec![Value::Text(name.to_string())])
            .collect(),
    )
}
