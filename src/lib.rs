//! Core backend library for the Mirador database query browser.
//!
//! Mirador lets a desktop user browse tables, run ad-hoc read-only queries
//! and keep a personal catalog of saved queries. This crate holds the whole
//! non-UI core: statement admission and rewriting ([`guard`]), schema
//! metadata and execution over a pluggable driver ([`db`]), the persisted
//! catalog ([`catalog`]) and the [`Controller`] a front end talks to.

pub mod catalog;
pub mod controller;
pub mod db;
pub mod error;
pub mod guard;
pub mod models;

pub use catalog::QueryCatalog;
pub use controller::Controller;
pub use db::driver::{Connection, Connector, Driver};
pub use db::schema::SchemaReader;
pub use db::sqlite::SqliteDriver;
pub use error::{DriverError, Error, ValidationError};
pub use models::{CatalogFile, ColumnDef, ColumnInfo, SavedQuery, Table, Value};
