mod config;
mod parser;

pub use config::{ConfigError, IndexConfig};
pub use parser::ResourceParser;
