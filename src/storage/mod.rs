mod preferences;
mod schema;
mod types;

pub use schema::{Database, IN_MEMORY};
pub use types::DatabaseError;
