pub mod saved_query;
pub mod schema;
pub mod table;

pub use saved_query::*;
pub use schema::*;
pub use table::*;
