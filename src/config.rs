//! Configuration: the settings schema and how it is loaded.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
