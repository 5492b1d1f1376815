pub mod progress;
pub mod schema;
