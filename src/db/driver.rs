use crate::error::DriverError;
use crate::models::Table;

/// A database driver: opens connections to one configured database.
pub trait Driver {
    type Conn: Connection;

    fn connect(&self) -> Result<Self::Conn, DriverError>;
}

/// An open connection executing SQL text.
///
/// The seam is string-only: no bound parameters, no cursors. Every statement
/// is materialized into a [`Table`] in full. Dropping the value releases the
/// underlying handle.
pub trait Connection {
    fn execute(&mut self, sql: &str) -> Result<Table, DriverError>;
}

/// Owns the single long-lived connection of a session, opened on first use
/// and reused until [`Connector::close`] or drop.
pub struct Connector<D: Driver> {
    driver: D,
    conn: Option<D::Conn>,
}

impl<D: Driver> Connector<D> {
    pub fn new(driver: D) -> Self {
        Connector { driver, conn: None }
    }

    /// Returns the open connection, connecting first if needed.
    pub fn open(&mut self) -> Result<&mut D::Conn, DriverError> {
        match self.conn {
            Some(ref mut conn) => Ok(conn),
            None => {
                let conn = self.driver.connect()?;
                Ok(self.conn.insert(conn))
            }
        }
    }

    /// Releases the connection handle if one is open.
    pub fn close(&mut self) {
        self.conn = None;
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}
