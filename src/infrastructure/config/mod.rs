//! Config store adapters

mod toml_file;

pub use toml_file::TomlFileStore;
