pub mod driver;
pub mod schema;
pub mod sqlite;
