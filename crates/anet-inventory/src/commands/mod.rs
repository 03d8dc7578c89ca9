pub mod env;
pub mod host;
pub mod list;
pub mod resources;
