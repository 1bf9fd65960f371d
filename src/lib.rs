pub mod config;
pub mod generate;
pub mod repo;
pub mod version;
