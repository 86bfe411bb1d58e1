//! The text format: parsing, serializing, and the file/stream surface.

pub mod file;
pub mod parser;
pub mod writer;

pub use file::{
    read_config_bytes, read_config_bytes_with_settings, read_config_file,
    read_config_file_with_settings, ConfigError,
};
pub use parser::{Parser, ReadError};
pub use writer::write_config;
