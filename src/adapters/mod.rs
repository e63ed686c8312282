// Adapters layer: concrete data providers.

pub mod json_file;
pub mod seed;

pub use json_file::JsonFileProvider;
pub use seed::SeedProvider;
